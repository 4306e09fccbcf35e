//! Structured requirements: extraction, completion detection, normalization
//!
//! This is the core of the daemon. Raw model text goes in one side; a
//! canonical [`RequirementsSpec`] comes out the other. Everything here is
//! pure and stateless - the same inputs always produce the same outputs.

mod completion;
mod extract;
mod normalize;

pub use completion::{COMPLETION_MARKER, infer_done};
pub use extract::{ExtractError, extract_json_block, parse_json_loose};
pub use normalize::{NonFunctionalRequirements, RequirementsSpec, normalize};
