//! Window-mean sampling of facelet coordinates from HSV planes.

use nalgebra::Vector3;

use crate::cube::Cube;
use crate::frame::{HsvFrameView, PlaneView};

/// Mean of a `window x window` box centered on `(cx, cy)`, truncated to an
/// integer before conversion.
///
/// The box is clamped to the plane, but the divisor stays `window * window`:
/// a window hanging off the edge is deliberately reported darker rather than
/// renormalized, matching what the rig was tuned against. Out-of-range
/// centers therefore yield `0.0`.
pub fn window_mean(plane: &PlaneView<'_>, cx: u32, cy: u32, window: u32) -> f32 {
    if window == 0 {
        return 0.0;
    }
    let half = i64::from(window / 2);
    let x0 = i64::from(cx) - half;
    let y0 = i64::from(cy) - half;
    let x_lo = x0.max(0) as usize;
    let y_lo = y0.max(0) as usize;
    let x_hi = (x0 + i64::from(window)).clamp(0, plane.width as i64) as usize;
    let y_hi = (y0 + i64::from(window)).clamp(0, plane.height as i64) as usize;

    let mut sum: u64 = 0;
    for y in y_lo..y_hi {
        let row = &plane.data[y * plane.width..(y + 1) * plane.width];
        for &v in &row[x_lo.min(x_hi)..x_hi] {
            sum += u64::from(v);
        }
    }
    (sum / (u64::from(window) * u64::from(window))) as f32
}

/// Sample every facelet of the faces covered by `camera` from one frame.
///
/// Each facelet gets a per-plane window mean folded in via
/// [`crate::cube::Facelet::push_sample`], so a second frame for the same
/// camera blends with the first instead of replacing it.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(cube, frame))
)]
pub fn sample_camera_faces(cube: &mut Cube, camera: usize, frame: &HsvFrameView<'_>, window: u32) {
    let hue = frame.hue_plane();
    let sat = frame.sat_plane();
    let val = frame.val_plane();
    for face in cube.faces_for_camera_mut(camera) {
        for facelet in face.facelets_mut() {
            let p = facelet.coord();
            let sample = Vector3::new(
                window_mean(&hue, p.x, p.y, window),
                window_mean(&sat, p.x, p.y, window),
                window_mean(&val, p.x, p.y, window),
            );
            facelet.push_sample(sample);
        }
    }
}
