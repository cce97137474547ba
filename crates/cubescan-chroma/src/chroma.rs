//! Second-stage labeling by hue band, plus center pigment resolution.

use cubescan_core::{ColorCode, Cube, FaceId};

use crate::profile::{ChromaticProfile, HueClass};

/// One facelet whose hue fell outside every band. Red and orange both live
/// in the wrap-around region, so membership is decided later by ranking.
#[derive(Clone, Copy, Debug)]
pub struct WrapCandidate {
    /// Face index in configuration order.
    pub face: usize,
    /// Facelet index in scan order.
    pub facelet: usize,
    /// Normalized hue used for ranking.
    pub hue: f32,
}

/// Resolve every face's center pigment from its center sample.
///
/// Chromatic centers read straight off the profile. The two wrap-around
/// centers cannot be told apart in isolation: the first one seen is held
/// back unlabeled until a second arrives, then the strictly lower
/// normalized hue of the pair is red and the other orange. A lone
/// wrap-around center keeps no pigment, which downstream lookups treat as
/// a classification gap.
pub fn resolve_center_colors(cube: &mut Cube, profile: &ChromaticProfile) {
    let mut pending: Option<(usize, f32)> = None;
    for idx in 0..cube.faces().len() {
        let Some(sample) = cube.faces()[idx].center_sample() else {
            continue;
        };
        if profile.is_achromatic(sample.y) {
            cube.faces_mut()[idx].set_center_color(ColorCode::White);
            continue;
        }
        match profile.hue_class(sample.x) {
            HueClass::Band(code) => cube.faces_mut()[idx].set_center_color(code),
            HueClass::Wrapped(hue) => match pending {
                None => pending = Some((idx, hue)),
                Some((first, first_hue)) => {
                    let (red, orange) = if hue < first_hue { (idx, first) } else { (first, idx) };
                    cube.faces_mut()[red].set_center_color(ColorCode::Red);
                    cube.faces_mut()[orange].set_center_color(ColorCode::Orange);
                }
            },
        }
    }
}

/// Classify every sampled facelet by saturation and hue band, overwriting
/// whatever the grouping stage decided.
///
/// A facelet whose pigment maps to no resolved center face is left alone:
/// the grouping label, or the unclassified state, survives and the tally
/// check catches any gap. Wrap-around facelets are deferred: they are
/// collected and returned for [`crate::red_orange::split_red_orange`] to
/// rank.
pub fn classify_facelets(cube: &mut Cube, profile: &ChromaticProfile) -> Vec<WrapCandidate> {
    let centers: Vec<(ColorCode, FaceId)> = cube
        .faces()
        .iter()
        .filter_map(|f| f.center_color().map(|c| (c, f.id())))
        .collect();
    // First face in configuration order wins, mirroring center lookup
    // everywhere else in the pipeline.
    let face_of =
        |code: ColorCode| centers.iter().find(|(c, _)| *c == code).map(|&(_, id)| id);

    let mut candidates = Vec::new();
    for (face_idx, face) in cube.faces_mut().iter_mut().enumerate() {
        for (facelet_idx, facelet) in face.facelets_mut().iter_mut().enumerate() {
            let Some(sample) = facelet.sample() else {
                continue;
            };
            let verdict = if profile.is_achromatic(sample.y) {
                face_of(ColorCode::White)
            } else {
                match profile.hue_class(sample.x) {
                    HueClass::Band(code) => face_of(code),
                    HueClass::Wrapped(hue) => {
                        candidates.push(WrapCandidate {
                            face: face_idx,
                            facelet: facelet_idx,
                            hue,
                        });
                        continue;
                    }
                }
            };
            if let Some(label) = verdict {
                facelet.set_label(label);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubescan_core::{Face, FaceId, CENTER_FACELET, FACELETS_PER_FACE};
    use nalgebra::{Point2, Vector3};

    fn bare_cube() -> Cube {
        let ids = [
            FaceId::Back,
            FaceId::Right,
            FaceId::Down,
            FaceId::Up,
            FaceId::Left,
            FaceId::Front,
        ];
        let coords: [Point2<u32>; FACELETS_PER_FACE] =
            std::array::from_fn(|i| Point2::new(i as u32, 0));
        Cube::new(ids.map(|id| Face::new(id, 0, coords))).expect("distinct ids")
    }

    fn set_center(cube: &mut Cube, face: usize, hsv: [f32; 3]) {
        cube.faces_mut()[face].facelets_mut()[CENTER_FACELET]
            .push_sample(Vector3::new(hsv[0], hsv[1], hsv[2]));
    }

    #[test]
    fn centers_resolve_bands_white_and_red_orange() {
        let mut cube = bare_cube();
        set_center(&mut cube, 0, [110.0, 200.0, 200.0]); // blue band
        set_center(&mut cube, 1, [175.0, 200.0, 200.0]); // wrapped high: red
        set_center(&mut cube, 2, [30.0, 200.0, 200.0]); // yellow band
        set_center(&mut cube, 3, [90.0, 40.0, 200.0]); // low saturation
        set_center(&mut cube, 4, [8.0, 200.0, 200.0]); // wrapped low: orange
        set_center(&mut cube, 5, [70.0, 200.0, 200.0]); // green band

        resolve_center_colors(&mut cube, &ChromaticProfile::default());

        let colors: Vec<_> = cube.faces().iter().map(|f| f.center_color()).collect();
        assert_eq!(
            colors,
            vec![
                Some(ColorCode::Blue),
                Some(ColorCode::Red),
                Some(ColorCode::Yellow),
                Some(ColorCode::White),
                Some(ColorCode::Orange),
                Some(ColorCode::Green),
            ]
        );
    }

    #[test]
    fn wrapped_center_pair_orders_by_normalized_hue() {
        // 8 + 181 = 189 normalized beats 175, so the low-hue center is the
        // orange one here and the high-hue center is red.
        let mut cube = bare_cube();
        set_center(&mut cube, 0, [8.0, 200.0, 200.0]);
        set_center(&mut cube, 1, [175.0, 200.0, 200.0]);

        resolve_center_colors(&mut cube, &ChromaticProfile::default());

        assert_eq!(cube.faces()[0].center_color(), Some(ColorCode::Orange));
        assert_eq!(cube.faces()[1].center_color(), Some(ColorCode::Red));
    }

    #[test]
    fn lone_wrapped_center_stays_unresolved() {
        let mut cube = bare_cube();
        set_center(&mut cube, 0, [175.0, 200.0, 200.0]);

        resolve_center_colors(&mut cube, &ChromaticProfile::default());

        assert_eq!(cube.faces()[0].center_color(), None);
    }

    #[test]
    fn classification_overwrites_grouping_labels() {
        let mut cube = bare_cube();
        set_center(&mut cube, 0, [110.0, 200.0, 200.0]);
        resolve_center_colors(&mut cube, &ChromaticProfile::default());

        // Grouping thought this facelet was Front; its hue says blue, and
        // blue is the Back face's center pigment.
        cube.faces_mut()[1].facelets_mut()[0].push_sample(Vector3::new(100.0, 200.0, 200.0));
        cube.faces_mut()[1].facelets_mut()[0].set_label(FaceId::Front);

        let candidates = classify_facelets(&mut cube, &ChromaticProfile::default());

        assert!(candidates.is_empty());
        assert_eq!(cube.faces()[1].facelets()[0].label(), Some(FaceId::Back));
    }

    #[test]
    fn unmatched_pigment_keeps_the_grouping_label() {
        let mut cube = bare_cube();
        // No center resolves to white, so the achromatic facelet cannot be
        // relabeled; whatever grouping decided stands.
        cube.faces_mut()[2].facelets_mut()[3].push_sample(Vector3::new(90.0, 40.0, 200.0));
        cube.faces_mut()[2].facelets_mut()[3].set_label(FaceId::Down);

        classify_facelets(&mut cube, &ChromaticProfile::default());

        assert_eq!(cube.faces()[2].facelets()[3].label(), Some(FaceId::Down));
    }

    #[test]
    fn wrap_candidates_carry_normalized_hues() {
        let mut cube = bare_cube();
        cube.faces_mut()[0].facelets_mut()[0].push_sample(Vector3::new(13.0, 200.0, 200.0));
        cube.faces_mut()[0].facelets_mut()[1].push_sample(Vector3::new(160.0, 200.0, 200.0));

        let candidates = classify_facelets(&mut cube, &ChromaticProfile::default());

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].facelet, 0);
        assert!((candidates[0].hue - 194.0).abs() < 1e-3);
        assert!((candidates[1].hue - 160.0).abs() < 1e-3);
    }
}
