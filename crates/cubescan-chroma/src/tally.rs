//! Structural validation of a classified cube.

use std::collections::BTreeMap;

use cubescan_core::{Cube, FaceId, FACELETS_PER_FACE};
use log::debug;
use serde::{Deserialize, Serialize};

/// One reason a classified cube is not a legal sticker assignment.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyViolation {
    /// A facelet never received a label this attempt.
    Unlabeled { face: FaceId, facelet: usize },
    /// A label occurs some number of times other than nine.
    WrongCount { label: FaceId, count: usize },
}

/// Check that every facelet is labeled and every label occurs exactly nine
/// times across the 54 stickers.
///
/// Labels that never occur produce no `WrongCount` of their own: with 54
/// slots, a missing label always shows up as unlabeled facelets or as an
/// inflated count elsewhere.
pub fn validate_tally(cube: &Cube) -> Result<(), Vec<TallyViolation>> {
    let mut violations = Vec::new();
    let mut counts: BTreeMap<FaceId, usize> = BTreeMap::new();

    for face in cube.faces() {
        for (idx, facelet) in face.facelets().iter().enumerate() {
            match facelet.label() {
                Some(label) => *counts.entry(label).or_default() += 1,
                None => violations.push(TallyViolation::Unlabeled {
                    face: face.id(),
                    facelet: idx,
                }),
            }
        }
    }

    for (&label, &count) in &counts {
        debug!("label {label}: {count} facelets");
        if count != FACELETS_PER_FACE {
            violations.push(TallyViolation::WrongCount { label, count });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        debug!("tally check found {} violations", violations.len());
        Err(violations)
    }
}
