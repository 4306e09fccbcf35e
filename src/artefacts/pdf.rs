//! Optional PDF export
//!
//! PDF rendering sits behind the `pdf-export` cargo feature so the daemon
//! builds without a PDF stack. The capability is resolved once at compile
//! time; callers check [`pdf_export_available`] and report a structured
//! skip instead of probing the environment per call.
//!
//! Layout mirrors the Markdown source as plain text: Letter page,
//! Helvetica 11pt, fixed line advance, word-wrapped at [`WRAP_COLUMNS`].

/// Character budget per PDF line before wrapping.
pub const WRAP_COLUMNS: usize = 95;

/// Whether PDF export was compiled into this binary.
pub fn pdf_export_available() -> bool {
    cfg!(feature = "pdf-export")
}

/// Word-wrap a single line to `max_chars` characters.
///
/// Breaks at the last space before the limit; a line with no space inside
/// the window is hard-cut at the limit. Wrapped fragments are trimmed of
/// the break-point whitespace on both sides.
pub fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current: Vec<char> = line.chars().collect();

    while current.len() > max_chars {
        let cut = current[..max_chars]
            .iter()
            .rposition(|c| *c == ' ')
            .unwrap_or(max_chars);

        let head: String = current[..cut].iter().collect();
        out.push(head.trim_end().to_string());

        let mut rest = current.split_off(cut);
        while rest.first() == Some(&' ') {
            rest.remove(0);
        }
        current = rest;
    }

    if !current.is_empty() {
        out.push(current.into_iter().collect());
    }
    out
}

#[cfg(feature = "pdf-export")]
pub use backend::write_pdf;

#[cfg(feature = "pdf-export")]
mod backend {
    use std::fs;
    use std::io::BufWriter;
    use std::path::Path;

    use printpdf::{BuiltinFont, Mm, PdfDocument};
    use tracing::debug;

    use super::{WRAP_COLUMNS, wrap_line};
    use crate::artefacts::ArtefactError;

    // US Letter, 0.8in margins, 14pt line advance to match the text layout
    const PAGE_WIDTH_MM: f32 = 215.9;
    const PAGE_HEIGHT_MM: f32 = 279.4;
    const MARGIN_MM: f32 = 20.3;
    const LINE_ADVANCE_MM: f32 = 4.94;
    const FONT_SIZE_PT: f32 = 11.0;

    /// Write `text` to `path` as a paginated plain-text PDF.
    pub fn write_pdf(text: &str, path: &Path) -> Result<(), ArtefactError> {
        debug!(path = %path.display(), "write_pdf: called");

        let (doc, first_page, first_layer) =
            PdfDocument::new("specdaemon artefact", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ArtefactError::Pdf(e.to_string()))?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

        for raw_line in text.lines() {
            for line in wrap_line(raw_line, WRAP_COLUMNS) {
                if y < MARGIN_MM {
                    let (page, new_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
                    layer = doc.get_page(page).get_layer(new_layer);
                    y = PAGE_HEIGHT_MM - MARGIN_MM;
                }
                layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
                y -= LINE_ADVANCE_MM;
            }
        }

        let file = fs::File::create(path)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ArtefactError::Pdf(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_untouched() {
        assert_eq!(wrap_line("hello world", 95), vec!["hello world"]);
    }

    #[test]
    fn test_wraps_at_last_space_before_limit() {
        let wrapped = wrap_line("aaaa bbbb cccc", 10);
        assert_eq!(wrapped, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_hard_cut_when_no_space() {
        let wrapped = wrap_line("abcdefghijkl", 5);
        assert_eq!(wrapped, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_exact_limit_not_wrapped() {
        let line = "a".repeat(95);
        assert_eq!(wrap_line(&line, 95), vec![line]);
    }

    #[test]
    fn test_break_whitespace_stripped() {
        let wrapped = wrap_line("word  another", 7);
        assert_eq!(wrapped, vec!["word", "another"]);
    }

    #[test]
    fn test_empty_line_preserved() {
        assert_eq!(wrap_line("", 95), vec![""]);
    }
}
