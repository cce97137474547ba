//! Recognition driver: attempt loop over sampling, classification and
//! validation.

use std::thread;
use std::time::Duration;

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::capture::{FrameSource, Illuminator};
use crate::config::{RigConfig, RigConfigError};
use crate::{chroma, core};

/// Attempts a recognition run makes before giving up, unless overridden.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Result of a recognition run. Failure is a value, not an error: the
/// snapshot of the last attempt ships either way.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecognitionOutcome {
    /// Whether some attempt produced a structurally valid cube.
    pub success: bool,
    /// Attempts consumed, counting the successful one.
    pub attempts: u32,
    /// Labels from the last attempt that ran.
    pub cube: core::CubeReading,
}

/// Orchestrates repeated sampling attempts over owned cube state.
///
/// The cube is exclusively held here for the whole run; callers observe it
/// only through the [`RecognitionOutcome`] snapshot.
pub struct Recognizer {
    cube: core::Cube,
    classifier: chroma::FaceletClassifier,
    window: u32,
    camera_count: usize,
    per_camera_delay: Duration,
    default_brightness: u8,
}

impl Recognizer {
    /// Build a recognizer from a rig config, validating it on the way.
    pub fn from_config(config: &RigConfig) -> Result<Self, RigConfigError> {
        let cube = config.build_cube()?;
        let classifier = chroma::FaceletClassifier::new(config.classify.clone())?;
        Ok(Self {
            cube,
            classifier,
            window: config.window,
            camera_count: config.cameras.sources.len(),
            per_camera_delay: config.cameras.per_camera_delay(),
            default_brightness: config.lighting.default_brightness,
        })
    }

    /// Current cube state; between runs this holds the last attempt's
    /// samples and labels.
    #[inline]
    pub fn cube(&self) -> &core::Cube {
        &self.cube
    }

    /// Run up to `max_attempts` sampling attempts and return the first
    /// structurally valid reading, or the last attempt's reading marked as
    /// a failure.
    ///
    /// `brightness` other than the rig default triggers one illumination
    /// call before the first attempt. `max_attempts` of zero returns a
    /// failure without touching the cameras.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip(self, sources, lights))
    )]
    pub fn recognize<S, L>(
        &mut self,
        sources: &mut [S],
        lights: &mut L,
        max_attempts: u32,
        brightness: Option<u8>,
    ) -> RecognitionOutcome
    where
        S: FrameSource,
        L: Illuminator,
    {
        if let Some(level) = brightness {
            if level != self.default_brightness {
                info!("normalizing lighting at brightness {level}");
                lights.set_illumination(level);
            }
        }
        if sources.len() != self.camera_count {
            warn!(
                "rig configures {} cameras but {} frame sources were supplied",
                self.camera_count,
                sources.len()
            );
        }

        let mut attempts = 0;
        for attempt in 1..=max_attempts {
            attempts = attempt;
            self.run_attempt(sources);
            match chroma::validate_tally(&self.cube) {
                Ok(()) => {
                    let cube = self.cube.reading();
                    for line in cube.solver_lines() {
                        info!("{line}");
                    }
                    info!("cube recognized on attempt {attempt}");
                    return RecognitionOutcome {
                        success: true,
                        attempts,
                        cube,
                    };
                }
                Err(violations) => {
                    debug!("attempt {attempt} invalid: {} tally violations", violations.len());
                }
            }
        }

        warn!("recognition exhausted after {attempts} attempts");
        RecognitionOutcome {
            success: false,
            attempts,
            cube: self.cube.reading(),
        }
    }

    /// One attempt: reset, sample every camera round-robin, classify.
    fn run_attempt<S: FrameSource>(&mut self, sources: &mut [S]) {
        self.cube.reset_attempt();
        for (camera, source) in sources.iter_mut().enumerate() {
            match source.read() {
                Some(frame) => {
                    core::sample_camera_faces(&mut self.cube, camera, &frame.view(), self.window);
                }
                None => warn!("camera {camera} produced no frame, skipping it this round"),
            }
            if !self.per_camera_delay.is_zero() {
                thread::sleep(self.per_camera_delay);
            }
        }
        self.classifier.classify(&mut self.cube);
        for face in self.cube.faces() {
            debug!(
                "face {} center {:?} resolved {:?}",
                face.id(),
                face.center_sample(),
                face.center_color()
            );
            for (idx, facelet) in face.facelets().iter().enumerate() {
                trace!("  facelet {idx} sample {:?}", facelet.sample());
            }
        }
    }
}
