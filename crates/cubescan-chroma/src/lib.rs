//! Facelet classification for cube recognition.
//!
//! Two overlapping labeling paths write the same label field:
//! - centroid grouping against face-center samples,
//! - hue-band classification with a rank-based red/orange split.
//!
//! The hue path runs second and takes precedence wherever it reaches a
//! verdict. [`validate_tally`] then checks the nine-per-label structure of
//! the result; [`FaceletClassifier`] wires the stages in order.

mod chroma;
mod grouping;
mod pipeline;
mod profile;
mod red_orange;
mod tally;

pub use chroma::{classify_facelets, resolve_center_colors, WrapCandidate};
pub use grouping::group_by_centroid;
pub use pipeline::{ClassifyParams, FaceletClassifier};
pub use profile::{ChromaticProfile, HueClass, ProfileError, HUE_WRAP_OFFSET};
pub use red_orange::split_red_orange;
pub use tally::{validate_tally, TallyViolation};
