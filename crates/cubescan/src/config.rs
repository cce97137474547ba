//! JSON rig configuration: camera bank, facelet coordinates, classifier.

use std::fs;
use std::path::Path;
use std::time::Duration;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{chroma, core};

/// I/O and parse failures loading or saving rig files.
#[derive(thiserror::Error, Debug)]
pub enum RigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Semantic failures in a parsed rig configuration.
#[derive(thiserror::Error, Debug)]
pub enum RigConfigError {
    #[error(transparent)]
    Profile(#[from] chroma::ProfileError),
    #[error(transparent)]
    Cube(#[from] core::CubeError),
    #[error("expected {expected} faces, got {got}")]
    FaceCount { expected: usize, got: usize },
    #[error("face {face} uses camera {camera}, but only {cameras} cameras are configured")]
    CameraOutOfRange {
        face: core::FaceId,
        camera: usize,
        cameras: usize,
    },
    #[error("face {face} facelet {facelet} at ({x}, {y}) lies outside the {width}x{height} frame")]
    CoordOutOfFrame {
        face: core::FaceId,
        facelet: usize,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("averaging window must be positive")]
    ZeroWindow,
}

fn default_device_offset() -> usize {
    1
}

fn default_read_delay_ms() -> u64 {
    500
}

fn default_window() -> u32 {
    5
}

/// The camera bank shared by the rig.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraBankConfig {
    /// Stream URLs or device paths, one per camera slot.
    pub sources: Vec<String>,
    /// Device index offset applied when a source URL is unreachable and the
    /// capture backend falls back to a directly connected device.
    #[serde(default = "default_device_offset")]
    pub device_offset: usize,
    /// Frame width in pixels, shared by every camera.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Total per-round pacing delay in milliseconds, split evenly across
    /// the cameras so slow capture pipelines can settle between reads.
    #[serde(default = "default_read_delay_ms")]
    pub read_delay_ms: u64,
}

impl CameraBankConfig {
    /// Pacing delay applied after each camera read.
    pub fn per_camera_delay(&self) -> Duration {
        let cams = self.sources.len().max(1) as u32;
        Duration::from_millis(self.read_delay_ms) / cams
    }
}

/// Facelet pixel coordinates for one face.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceLayout {
    pub id: core::FaceId,
    /// Index into the camera bank that observes this face.
    pub camera: usize,
    /// Nine `[x, y]` pixel coordinates in scan order, index 4 the center.
    pub facelets: [[u32; 2]; core::FACELETS_PER_FACE],
}

/// LED strip defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Brightness level the strip idles at. Recognition touches the strip
    /// only when asked for a different level.
    pub default_brightness: u8,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            default_brightness: 30,
        }
    }
}

/// Full rig description, loaded once at startup and immutable afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RigConfig {
    pub cameras: CameraBankConfig,
    /// Side length in pixels of the per-facelet averaging window.
    #[serde(default = "default_window")]
    pub window: u32,
    #[serde(default)]
    pub classify: chroma::ClassifyParams,
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Six faces with their camera assignment and facelet coordinates.
    pub faces: Vec<FaceLayout>,
}

impl RigConfig {
    /// Load a JSON rig config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check cross-field consistency. Duplicate face ids are caught when
    /// the cube is built.
    pub fn validate(&self) -> Result<(), RigConfigError> {
        if self.window == 0 {
            return Err(RigConfigError::ZeroWindow);
        }
        self.classify.profile.validate()?;
        if self.faces.len() != core::FACE_COUNT {
            return Err(RigConfigError::FaceCount {
                expected: core::FACE_COUNT,
                got: self.faces.len(),
            });
        }
        for layout in &self.faces {
            if layout.camera >= self.cameras.sources.len() {
                return Err(RigConfigError::CameraOutOfRange {
                    face: layout.id,
                    camera: layout.camera,
                    cameras: self.cameras.sources.len(),
                });
            }
            for (idx, &[x, y]) in layout.facelets.iter().enumerate() {
                if x >= self.cameras.width || y >= self.cameras.height {
                    return Err(RigConfigError::CoordOutOfFrame {
                        face: layout.id,
                        facelet: idx,
                        x,
                        y,
                        width: self.cameras.width,
                        height: self.cameras.height,
                    });
                }
            }
        }
        Ok(())
    }

    /// Build the mutable cube state from the face layouts.
    pub fn build_cube(&self) -> Result<core::Cube, RigConfigError> {
        self.validate()?;
        let faces: Vec<core::Face> = self
            .faces
            .iter()
            .map(|layout| {
                let coords = layout.facelets.map(|[x, y]| Point2::new(x, y));
                core::Face::new(layout.id, layout.camera, coords)
            })
            .collect();
        let faces: [core::Face; core::FACE_COUNT] =
            faces.try_into().map_err(|v: Vec<core::Face>| {
                RigConfigError::FaceCount {
                    expected: core::FACE_COUNT,
                    got: v.len(),
                }
            })?;
        Ok(core::Cube::new(faces)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FaceId;
    use serde_json::json;

    fn grid(x0: u32, y0: u32) -> [[u32; 2]; core::FACELETS_PER_FACE] {
        std::array::from_fn(|i| [x0 + (i as u32 % 3) * 40, y0 + (i as u32 / 3) * 40])
    }

    fn rig_fixture() -> RigConfig {
        let layouts = [
            (FaceId::Back, 0),
            (FaceId::Right, 0),
            (FaceId::Down, 0),
            (FaceId::Up, 1),
            (FaceId::Left, 1),
            (FaceId::Front, 1),
        ];
        RigConfig {
            cameras: CameraBankConfig {
                sources: vec!["cam://0".into(), "cam://1".into()],
                device_offset: 1,
                width: 320,
                height: 240,
                read_delay_ms: 500,
            },
            window: 5,
            classify: chroma::ClassifyParams::default(),
            lighting: LightingConfig::default(),
            faces: layouts
                .into_iter()
                .enumerate()
                .map(|(i, (id, camera))| FaceLayout {
                    id,
                    camera,
                    facelets: grid(40 + (i as u32 % 3) * 20, 40),
                })
                .collect(),
        }
    }

    #[test]
    fn fixture_builds_a_cube() {
        let cube = rig_fixture().build_cube().expect("valid fixture");
        assert_eq!(cube.faces()[0].id(), FaceId::Back);
        assert_eq!(cube.faces()[3].camera(), 1);
        assert_eq!(cube.faces()[1].facelets()[4].coord().x, 100);
    }

    #[test]
    fn json_roundtrip_preserves_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("rig.json");
        let config = rig_fixture();
        config.write_json(&path).expect("write");
        let loaded = RigConfig::load_json(&path).expect("load");
        assert_eq!(loaded.faces.len(), 6);
        assert_eq!(loaded.cameras.width, config.cameras.width);
        assert_eq!(loaded.window, config.window);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let raw = json!({
            "cameras": {
                "sources": ["cam://0", "cam://1"],
                "width": 320,
                "height": 240
            },
            "faces": rig_fixture().faces
        });
        let config: RigConfig =
            serde_json::from_value(raw).expect("minimal config parses");
        assert_eq!(config.cameras.device_offset, 1);
        assert_eq!(config.cameras.read_delay_ms, 500);
        assert_eq!(config.window, 5);
        assert_eq!(config.lighting.default_brightness, 30);
        assert_eq!(config.classify.centroid_threshold, 70.0);
        assert_eq!(config.classify.profile.hue_bounds.len(), 4);
    }

    #[test]
    fn per_camera_delay_splits_the_budget() {
        let config = rig_fixture();
        assert_eq!(config.cameras.per_camera_delay(), Duration::from_millis(250));
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = rig_fixture();
        config.window = 0;
        assert!(matches!(
            config.validate(),
            Err(RigConfigError::ZeroWindow)
        ));
    }

    #[test]
    fn camera_out_of_range_is_rejected() {
        let mut config = rig_fixture();
        config.faces[5].camera = 2;
        assert!(matches!(
            config.validate(),
            Err(RigConfigError::CameraOutOfRange {
                face: FaceId::Front,
                camera: 2,
                cameras: 2
            })
        ));
    }

    #[test]
    fn coordinate_outside_frame_is_rejected() {
        let mut config = rig_fixture();
        config.faces[0].facelets[8] = [320, 100];
        assert!(matches!(
            config.validate(),
            Err(RigConfigError::CoordOutOfFrame {
                face: FaceId::Back,
                facelet: 8,
                x: 320,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_face_id_fails_at_cube_build() {
        let mut config = rig_fixture();
        config.faces[1].id = FaceId::Back;
        assert!(matches!(
            config.build_cube(),
            Err(RigConfigError::Cube(core::CubeError::DuplicateFaceId {
                id: FaceId::Back
            }))
        ));
    }

    #[test]
    fn wrong_face_count_is_rejected() {
        let mut config = rig_fixture();
        config.faces.pop();
        assert!(matches!(
            config.validate(),
            Err(RigConfigError::FaceCount {
                expected: 6,
                got: 5
            })
        ));
    }
}
