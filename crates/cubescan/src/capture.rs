//! Capture and lighting collaborators at the rig boundary.

use crate::core;

/// Source of HSV frames for one camera slot.
///
/// Implementations wrap whatever delivers frames: a device capture
/// pipeline, a stream decoder, or canned stills in tests. `read` returning
/// `None` marks a dropped frame; the driver skips that camera for the
/// round instead of failing the attempt.
pub trait FrameSource {
    fn read(&mut self) -> Option<core::HsvFrame>;
}

impl<T: FrameSource + ?Sized> FrameSource for &mut T {
    fn read(&mut self) -> Option<core::HsvFrame> {
        (**self).read()
    }
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn read(&mut self) -> Option<core::HsvFrame> {
        (**self).read()
    }
}

/// LED strip the rig normalizes lighting with. Call-only; the driver never
/// reads lighting state back.
pub trait Illuminator {
    fn set_illumination(&mut self, level: u8);
}

/// Frame source that replays one fixed frame forever.
///
/// Covers bench rigs and tests where the scene does not move between
/// attempts.
#[derive(Clone, Debug)]
pub struct StillSource {
    frame: core::HsvFrame,
}

impl StillSource {
    pub fn new(frame: core::HsvFrame) -> Self {
        Self { frame }
    }
}

impl FrameSource for StillSource {
    fn read(&mut self) -> Option<core::HsvFrame> {
        Some(self.frame.clone())
    }
}

/// Illuminator for rigs without a controllable strip.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullIlluminator;

impl Illuminator for NullIlluminator {
    fn set_illumination(&mut self, _level: u8) {}
}
