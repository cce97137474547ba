//! High-level facade crate for the `cubescan-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the cube state and classification crates
//! - the JSON rig configuration format and the recognition driver
//! - (feature-gated) helpers that turn RGB images into the HSV frames the
//!   sampler consumes.
//!
//! ## Quickstart
//!
//! ```no_run
//! use cubescan::capture::{NullIlluminator, StillSource};
//! use cubescan::config::RigConfig;
//! use cubescan::recognize::{Recognizer, DEFAULT_MAX_ATTEMPTS};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RigConfig::load_json("rig.json")?;
//! let mut recognizer = Recognizer::from_config(&config)?;
//! let mut sources = vec![
//!     StillSource::new(cubescan::hsv::load_hsv_frame("cam0.png")?),
//!     StillSource::new(cubescan::hsv::load_hsv_frame("cam1.png")?),
//! ];
//! let outcome = recognizer.recognize(
//!     &mut sources,
//!     &mut NullIlluminator,
//!     DEFAULT_MAX_ATTEMPTS,
//!     None,
//! );
//! for line in outcome.cube.solver_lines() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `cubescan::core`: cube state, HSV frames, window sampling.
//! - `cubescan::chroma`: grouping, hue banding, red/orange split, tally.
//! - `cubescan::config`: the JSON rig description.
//! - `cubescan::capture`: frame source and illuminator seams.
//! - `cubescan::recognize`: the attempt loop.
//! - `cubescan::hsv` (feature `image`): RGB to HSV plane conversion.

pub use cubescan_chroma as chroma;
pub use cubescan_core as core;

pub use cubescan_chroma::{ChromaticProfile, ClassifyParams, FaceletClassifier, TallyViolation};
pub use cubescan_core::{ColorCode, Cube, CubeReading, FaceId};

pub mod capture;
pub mod config;
pub mod recognize;

#[cfg(feature = "image")]
pub mod hsv;
