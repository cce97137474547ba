/// Borrowed single-channel 8-bit plane, row-major, `len = width * height`.
#[derive(Clone, Copy, Debug)]
pub struct PlaneView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Errors building an owned frame from raw plane buffers.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("{plane} plane length {got} does not match {width}x{height}")]
    PlaneLength {
        plane: &'static str,
        width: usize,
        height: usize,
        got: usize,
    },
}

/// Owned three-plane HSV frame.
///
/// Planes are 8-bit and row-major. Hue uses the `0..180` scale common to
/// 8-bit camera pipelines (one hue unit = 2 degrees); saturation and value
/// span `0..=255`.
#[derive(Clone, Debug)]
pub struct HsvFrame {
    pub width: usize,
    pub height: usize,
    pub hue: Vec<u8>,
    pub sat: Vec<u8>,
    pub val: Vec<u8>,
}

impl HsvFrame {
    /// Build a frame from raw planes, checking every buffer length.
    pub fn new(
        width: usize,
        height: usize,
        hue: Vec<u8>,
        sat: Vec<u8>,
        val: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let expected = width * height;
        for (plane, len) in [("hue", hue.len()), ("sat", sat.len()), ("val", val.len())] {
            if len != expected {
                return Err(FrameError::PlaneLength {
                    plane,
                    width,
                    height,
                    got: len,
                });
            }
        }
        Ok(Self {
            width,
            height,
            hue,
            sat,
            val,
        })
    }

    /// Frame filled with a single HSV triple.
    pub fn solid(width: usize, height: usize, hsv: [u8; 3]) -> Self {
        let n = width * height;
        Self {
            width,
            height,
            hue: vec![hsv[0]; n],
            sat: vec![hsv[1]; n],
            val: vec![hsv[2]; n],
        }
    }

    /// Overwrite the rectangle `[x0, x1) × [y0, y1)` with one HSV triple.
    ///
    /// The rectangle is clamped to the frame; nothing outside is touched.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, hsv: [u8; 3]) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        for y in y0.min(y1)..y1 {
            for x in x0.min(x1)..x1 {
                let idx = y * self.width + x;
                self.hue[idx] = hsv[0];
                self.sat[idx] = hsv[1];
                self.val[idx] = hsv[2];
            }
        }
    }

    pub fn view(&self) -> HsvFrameView<'_> {
        HsvFrameView {
            width: self.width,
            height: self.height,
            hue: &self.hue,
            sat: &self.sat,
            val: &self.val,
        }
    }
}

/// Borrowed view over the three planes of an [`HsvFrame`].
#[derive(Clone, Copy, Debug)]
pub struct HsvFrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub hue: &'a [u8],
    pub sat: &'a [u8],
    pub val: &'a [u8],
}

impl<'a> HsvFrameView<'a> {
    pub fn hue_plane(&self) -> PlaneView<'a> {
        PlaneView {
            width: self.width,
            height: self.height,
            data: self.hue,
        }
    }

    pub fn sat_plane(&self) -> PlaneView<'a> {
        PlaneView {
            width: self.width,
            height: self.height,
            data: self.sat,
        }
    }

    pub fn val_plane(&self) -> PlaneView<'a> {
        PlaneView {
            width: self.width,
            height: self.height,
            data: self.val,
        }
    }
}
