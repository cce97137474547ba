//! End-to-end classification over a sampled cube.

use cubescan_core::Cube;
use serde::{Deserialize, Serialize};

use crate::chroma::{classify_facelets, resolve_center_colors};
use crate::grouping::group_by_centroid;
use crate::profile::{ChromaticProfile, ProfileError};
use crate::red_orange::split_red_orange;

/// Configuration for the facelet classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyParams {
    /// Euclidean distance below which a facelet sample groups with a face
    /// center sample.
    pub centroid_threshold: f32,
    /// Hue bands and saturation floor for the pigment set.
    pub profile: ChromaticProfile,
}

impl Default for ClassifyParams {
    fn default() -> Self {
        Self {
            centroid_threshold: 70.0,
            profile: ChromaticProfile::default(),
        }
    }
}

/// Two-stage facelet classifier.
///
/// Stage one groups facelets by distance to face-center samples. Stage two
/// resolves center pigments, relabels every facelet by hue band, and ranks
/// the wrap-around stickers into red and orange. Stage two runs last and
/// overwrites stage one wherever it reaches a verdict.
pub struct FaceletClassifier {
    params: ClassifyParams,
}

impl FaceletClassifier {
    /// Create a classifier, validating the profile up front.
    pub fn new(params: ClassifyParams) -> Result<Self, ProfileError> {
        params.profile.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &ClassifyParams {
        &self.params
    }

    /// Run every classification stage over a sampled cube.
    ///
    /// Labels are written into the cube. Completeness is judged separately
    /// by [`crate::tally::validate_tally`], so a partial labeling here is
    /// not an error.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub fn classify(&self, cube: &mut Cube) {
        group_by_centroid(cube, self.params.centroid_threshold);
        resolve_center_colors(cube, &self.params.profile);
        let candidates = classify_facelets(cube, &self.params.profile);
        split_red_orange(cube, candidates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::validate_tally;
    use cubescan_core::{Face, FaceId, FACELETS_PER_FACE};
    use nalgebra::{Point2, Vector3};

    fn sampled_rig_cube() -> Cube {
        // Pigments in the order the rig loads faces: blue, red, white,
        // yellow, orange, green.
        let setup = [
            (FaceId::Back, [110.0, 200.0, 200.0]),
            (FaceId::Right, [175.0, 200.0, 200.0]),
            (FaceId::Down, [90.0, 40.0, 200.0]),
            (FaceId::Up, [30.0, 200.0, 200.0]),
            (FaceId::Left, [8.0, 200.0, 200.0]),
            (FaceId::Front, [70.0, 200.0, 200.0]),
        ];
        let coords: [Point2<u32>; FACELETS_PER_FACE] =
            std::array::from_fn(|i| Point2::new(i as u32, 0));
        let faces = setup.map(|(id, _)| Face::new(id, 0, coords));
        let mut cube = Cube::new(faces).expect("distinct ids");
        for (face, (_, hsv)) in cube.faces_mut().iter_mut().zip(setup) {
            for facelet in face.facelets_mut() {
                facelet.push_sample(Vector3::new(hsv[0], hsv[1], hsv[2]));
            }
        }
        cube
    }

    #[test]
    fn rejects_invalid_profile() {
        let params = ClassifyParams {
            profile: ChromaticProfile {
                hue_bounds: vec![14.0],
                ..ChromaticProfile::default()
            },
            ..ClassifyParams::default()
        };
        assert!(FaceletClassifier::new(params).is_err());
    }

    #[test]
    fn solid_faces_classify_to_a_valid_cube() {
        let mut cube = sampled_rig_cube();
        let classifier =
            FaceletClassifier::new(ClassifyParams::default()).expect("default params");

        classifier.classify(&mut cube);

        assert!(validate_tally(&cube).is_ok());
        for face in cube.faces() {
            for facelet in face.facelets() {
                assert_eq!(facelet.label(), Some(face.id()));
            }
        }
    }

    #[test]
    fn hue_verdict_overrides_near_center_grouping() {
        let mut cube = sampled_rig_cube();
        // The red center sample sits 65 from the blue one, inside the
        // default grouping radius, so grouping relabels blue stickers red;
        // the hue stage must pull them back.
        let classifier =
            FaceletClassifier::new(ClassifyParams::default()).expect("default params");

        classifier.classify(&mut cube);

        assert_eq!(cube.faces()[0].facelets()[0].label(), Some(FaceId::Back));
    }
}
