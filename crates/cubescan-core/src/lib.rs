//! Core state and sampling primitives for cube facelet recognition.
//!
//! This crate is intentionally small: the cube data model, HSV frame views,
//! and the window-mean sampler. It does *not* depend on any capture backend
//! or classification profile.

mod cube;
mod frame;
mod logger;
mod sampling;

pub use cube::{
    ColorCode, Cube, CubeError, CubeReading, Face, FaceId, Facelet, FaceReading, CENTER_FACELET,
    FACELETS_PER_FACE, FACE_COUNT,
};
pub use frame::{FrameError, HsvFrame, HsvFrameView, PlaneView};
pub use sampling::{sample_camera_faces, window_mean};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
