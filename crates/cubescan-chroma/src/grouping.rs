//! First-stage labeling by distance to face-center samples.

use cubescan_core::Cube;
use log::debug;

/// Label every sampled facelet with the last face, in configuration order,
/// whose center sample lies within `threshold` of the facelet's sample.
///
/// Distance is plain Euclidean over all three channels. A facelet inside
/// several centers' radii ends up with the last matching face, which makes
/// the tie-break a fixed property of configuration order. The hue stages
/// run afterwards and overwrite these labels wherever they reach a verdict,
/// so grouping only decides stickers the hue path leaves alone.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(cube)))]
pub fn group_by_centroid(cube: &mut Cube, threshold: f32) {
    let centers: Vec<_> = cube
        .faces()
        .iter()
        .filter_map(|face| face.center_sample().map(|s| (face.id(), s)))
        .collect();

    let mut assigned = 0usize;
    for face in cube.faces_mut() {
        for facelet in face.facelets_mut() {
            let Some(sample) = facelet.sample() else {
                continue;
            };
            for &(id, center) in &centers {
                if (sample - center).norm() < threshold {
                    facelet.set_label(id);
                    assigned += 1;
                }
            }
        }
    }
    debug!("centroid grouping made {assigned} assignments");
}
