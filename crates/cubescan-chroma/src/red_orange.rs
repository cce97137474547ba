//! Rank-based split of the wrap-around candidates into red and orange.

use cubescan_core::{ColorCode, Cube, FACELETS_PER_FACE};
use log::{debug, warn};

use crate::chroma::WrapCandidate;

/// Assign the deferred wrap-around facelets to the red and orange faces.
///
/// Candidates are sorted by normalized hue ascending; the lowest
/// [`FACELETS_PER_FACE`] ranks go to whichever face's center resolved to
/// red and the rest to the orange face. The cut is by rank, not by a hue
/// threshold, so it holds under lighting drift as long as red stickers
/// stay redder than orange ones. A candidate count other than two faces'
/// worth is ranked anyway and logged; the tally check rejects the attempt.
/// When no center resolved to red or orange, the affected candidates keep
/// whatever label they already carry.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip(cube, candidates), fields(count = candidates.len()))
)]
pub fn split_red_orange(cube: &mut Cube, mut candidates: Vec<WrapCandidate>) {
    if candidates.is_empty() {
        return;
    }
    if candidates.len() != 2 * FACELETS_PER_FACE {
        warn!(
            "expected {} red/orange candidates, got {}",
            2 * FACELETS_PER_FACE,
            candidates.len()
        );
    }

    candidates.sort_by(|a, b| a.hue.total_cmp(&b.hue));

    let red_face = cube.find_face_by_color(ColorCode::Red);
    let orange_face = cube.find_face_by_color(ColorCode::Orange);

    for (rank, candidate) in candidates.iter().enumerate() {
        let verdict = if rank < FACELETS_PER_FACE {
            red_face
        } else {
            orange_face
        };
        let face = &mut cube.faces_mut()[candidate.face];
        debug!(
            "wrap rank {rank}: face {} facelet {} hue {:.1}",
            face.id(),
            candidate.facelet,
            candidate.hue
        );
        if let Some(label) = verdict {
            face.facelets_mut()[candidate.facelet].set_label(label);
        }
    }
}
