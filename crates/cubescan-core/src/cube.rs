//! Cube state shared by the sampling and classification stages.
//!
//! A [`Cube`] owns six [`Face`]s in rig-configuration order. Each face keeps
//! nine [`Facelet`]s in row-major scan order; facelet index 4 is the center
//! sticker. Sampling fills the facelets' HSV means, classification fills
//! their labels, and both are cleared between recognition attempts.

use nalgebra::{Point2, Vector3};
use serde::{Deserialize, Serialize};

/// Stickers per face in row-major scan order.
pub const FACELETS_PER_FACE: usize = 9;

/// Index of the center sticker within a face.
pub const CENTER_FACELET: usize = 4;

/// Faces on a cube.
pub const FACE_COUNT: usize = 6;

/// Face identifier in the common solver orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FaceId {
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "F")]
    Front,
    #[serde(rename = "D")]
    Down,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "B")]
    Back,
}

impl FaceId {
    /// One-letter solver notation.
    pub fn letter(&self) -> char {
        match self {
            FaceId::Up => 'U',
            FaceId::Right => 'R',
            FaceId::Front => 'F',
            FaceId::Down => 'D',
            FaceId::Left => 'L',
            FaceId::Back => 'B',
        }
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Sticker color on a standard-pigment cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorCode {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "Y")]
    Yellow,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "B")]
    Blue,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "O")]
    Orange,
}

impl ColorCode {
    pub fn letter(&self) -> char {
        match self {
            ColorCode::White => 'W',
            ColorCode::Yellow => 'Y',
            ColorCode::Green => 'G',
            ColorCode::Blue => 'B',
            ColorCode::Red => 'R',
            ColorCode::Orange => 'O',
        }
    }
}

impl std::fmt::Display for ColorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One sticker position: a fixed pixel coordinate plus per-attempt state.
#[derive(Clone, Debug)]
pub struct Facelet {
    coord: Point2<u32>,
    sample: Option<Vector3<f32>>,
    label: Option<FaceId>,
}

impl Facelet {
    pub fn new(coord: Point2<u32>) -> Self {
        Self {
            coord,
            sample: None,
            label: None,
        }
    }

    /// Pixel coordinate this facelet is sampled at. Fixed for the rig.
    pub fn coord(&self) -> Point2<u32> {
        self.coord
    }

    /// Mean HSV sample accumulated this attempt, if any.
    pub fn sample(&self) -> Option<Vector3<f32>> {
        self.sample
    }

    /// Classified label, if the classification stage has assigned one.
    pub fn label(&self) -> Option<FaceId> {
        self.label
    }

    /// Fold a new window mean into the stored sample.
    ///
    /// The first sample is stored as-is; every later one is blended as the
    /// component-wise mean of the stored value and the new value, so the two
    /// camera exposures of an attempt weigh equally.
    pub fn push_sample(&mut self, sample: Vector3<f32>) {
        self.sample = Some(match self.sample {
            Some(prev) => (prev + sample) * 0.5,
            None => sample,
        });
    }

    pub fn set_label(&mut self, label: FaceId) {
        self.label = Some(label);
    }

    /// Clear per-attempt state, keeping the coordinate.
    pub fn reset(&mut self) {
        self.sample = None;
        self.label = None;
    }
}

/// One face of the rig: identity, owning camera, and nine facelets.
#[derive(Clone, Debug)]
pub struct Face {
    id: FaceId,
    camera: usize,
    center_color: Option<ColorCode>,
    facelets: [Facelet; FACELETS_PER_FACE],
}

impl Face {
    pub fn new(id: FaceId, camera: usize, coords: [Point2<u32>; FACELETS_PER_FACE]) -> Self {
        Self {
            id,
            camera,
            center_color: None,
            facelets: coords.map(Facelet::new),
        }
    }

    pub fn id(&self) -> FaceId {
        self.id
    }

    /// Index of the camera whose frames cover this face.
    pub fn camera(&self) -> usize {
        self.camera
    }

    /// Pigment color of the center sticker, once center resolution has run.
    pub fn center_color(&self) -> Option<ColorCode> {
        self.center_color
    }

    pub fn set_center_color(&mut self, color: ColorCode) {
        self.center_color = Some(color);
    }

    pub fn facelets(&self) -> &[Facelet; FACELETS_PER_FACE] {
        &self.facelets
    }

    pub fn facelets_mut(&mut self) -> &mut [Facelet; FACELETS_PER_FACE] {
        &mut self.facelets
    }

    /// Sample of the center sticker, if the face has been sampled.
    pub fn center_sample(&self) -> Option<Vector3<f32>> {
        self.facelets[CENTER_FACELET].sample()
    }

    fn reset_attempt(&mut self) {
        self.center_color = None;
        for facelet in &mut self.facelets {
            facelet.reset();
        }
    }
}

/// Validation errors for a rig face set.
#[derive(thiserror::Error, Debug)]
pub enum CubeError {
    #[error("face id {id} appears more than once")]
    DuplicateFaceId { id: FaceId },
}

/// The six faces of the rig in configuration order.
///
/// Configuration order is load order, not solver order; every stage that
/// iterates faces does so in this order, which makes classification
/// deterministic when distances tie.
#[derive(Clone, Debug)]
pub struct Cube {
    faces: [Face; FACE_COUNT],
}

impl Cube {
    /// Build a cube, rejecting duplicate face ids. Six distinct ids imply
    /// every face is present exactly once.
    pub fn new(faces: [Face; FACE_COUNT]) -> Result<Self, CubeError> {
        for i in 0..faces.len() {
            for j in (i + 1)..faces.len() {
                if faces[i].id() == faces[j].id() {
                    return Err(CubeError::DuplicateFaceId { id: faces[i].id() });
                }
            }
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[Face; FACE_COUNT] {
        &self.faces
    }

    pub fn faces_mut(&mut self) -> &mut [Face; FACE_COUNT] {
        &mut self.faces
    }

    /// Faces covered by the given camera, in configuration order.
    pub fn faces_for_camera_mut(&mut self, camera: usize) -> impl Iterator<Item = &mut Face> {
        self.faces.iter_mut().filter(move |f| f.camera() == camera)
    }

    /// First face in configuration order whose resolved center matches.
    pub fn find_face_by_color(&self, color: ColorCode) -> Option<FaceId> {
        self.faces
            .iter()
            .find(|f| f.center_color() == Some(color))
            .map(|f| f.id())
    }

    /// Clear all samples, labels and center colors before a fresh attempt.
    pub fn reset_attempt(&mut self) {
        for face in &mut self.faces {
            face.reset_attempt();
        }
    }

    /// Snapshot the labels for reporting.
    pub fn reading(&self) -> CubeReading {
        CubeReading {
            faces: self
                .faces
                .iter()
                .map(|face| FaceReading {
                    id: face.id(),
                    labels: std::array::from_fn(|i| face.facelets()[i].label()),
                })
                .collect(),
        }
    }
}

/// Labels of one face, in scan order. `None` marks an unclassified sticker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceReading {
    pub id: FaceId,
    pub labels: [Option<FaceId>; FACELETS_PER_FACE],
}

impl FaceReading {
    /// Solver-oriented text line, e.g. `U-UUUUUUUUU`.
    ///
    /// Unclassified stickers print their scan index as a digit so partial
    /// attempts stay readable in logs.
    pub fn solver_line(&self) -> String {
        let mut line = String::with_capacity(FACELETS_PER_FACE + 2);
        line.push(self.id.letter());
        line.push('-');
        for (i, label) in self.labels.iter().enumerate() {
            match label {
                Some(label) => line.push(label.letter()),
                None => line.push(char::from_digit(i as u32, 10).unwrap_or('?')),
            }
        }
        line
    }

    pub fn is_complete(&self) -> bool {
        self.labels.iter().all(Option::is_some)
    }
}

/// Snapshot of every face's labels, in configuration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeReading {
    pub faces: Vec<FaceReading>,
}

impl CubeReading {
    pub fn is_complete(&self) -> bool {
        self.faces.iter().all(FaceReading::is_complete)
    }

    /// One solver line per face, in configuration order.
    pub fn solver_lines(&self) -> Vec<String> {
        self.faces.iter().map(FaceReading::solver_line).collect()
    }
}
