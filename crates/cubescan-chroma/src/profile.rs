//! Hue-band profile for a pigment set under the rig's lighting.

use cubescan_core::ColorCode;
use serde::{Deserialize, Serialize};

/// Offset added to hues below the lowest band bound before red/orange
/// ranking, so wrap-around reds land above the high-end oranges on one
/// comparable scale. One more than half the 0..360-degree cycle at the
/// half-degree hue resolution of 8-bit planes.
pub const HUE_WRAP_OFFSET: f32 = 181.0;

/// Where a hue falls relative to the chromatic bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HueClass {
    /// Inside a band: the sticker carries that band's pigment.
    Band(ColorCode),
    /// Outside every band: red or orange territory. Carries the normalized
    /// hue used for ranking.
    Wrapped(f32),
}

/// Validation failures for a [`ChromaticProfile`].
#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("{bounds} hue bounds cannot delimit {bands} bands (want bands + 1)")]
    BoundCount { bands: usize, bounds: usize },
    #[error("hue bounds must increase strictly, got {prev} then {next}")]
    UnorderedBounds { prev: f32, next: f32 },
}

/// Hue bands and the saturation floor separating chromatic stickers from
/// white ones.
///
/// `band_codes[i]` covers hues in `[hue_bounds[i], hue_bounds[i + 1])`.
/// Hues below the first bound or at/above the last bound wrap around the
/// cycle; red and orange both live there and are separated by ranking, not
/// by band membership.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaticProfile {
    pub band_codes: Vec<ColorCode>,
    pub hue_bounds: Vec<f32>,
    pub saturation_threshold: f32,
}

impl Default for ChromaticProfile {
    fn default() -> Self {
        Self {
            band_codes: vec![ColorCode::Yellow, ColorCode::Green, ColorCode::Blue],
            hue_bounds: vec![14.0, 50.0, 92.0, 140.0],
            saturation_threshold: 110.0,
        }
    }
}

impl ChromaticProfile {
    /// Check band/bound agreement. Run once when a classifier is built;
    /// [`Self::hue_class`] assumes it passed.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.hue_bounds.len() != self.band_codes.len() + 1 {
            return Err(ProfileError::BoundCount {
                bands: self.band_codes.len(),
                bounds: self.hue_bounds.len(),
            });
        }
        for pair in self.hue_bounds.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ProfileError::UnorderedBounds {
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(())
    }

    /// Saturation at or below the threshold reads as white.
    pub fn is_achromatic(&self, saturation: f32) -> bool {
        saturation <= self.saturation_threshold
    }

    /// Classify a hue against the bands.
    ///
    /// Hues below the lowest bound are normalized by [`HUE_WRAP_OFFSET`];
    /// hues at or above the highest bound are already on the comparable
    /// scale and pass through unchanged.
    pub fn hue_class(&self, hue: f32) -> HueClass {
        match (self.hue_bounds.first(), self.hue_bounds.last()) {
            (Some(&lowest), Some(&highest)) => {
                if hue < lowest {
                    HueClass::Wrapped(hue + HUE_WRAP_OFFSET)
                } else if hue >= highest {
                    HueClass::Wrapped(hue)
                } else {
                    for (code, pair) in self.band_codes.iter().zip(self.hue_bounds.windows(2)) {
                        if pair[0] <= hue && hue < pair[1] {
                            return HueClass::Band(*code);
                        }
                    }
                    // Bounds are contiguous, so one band always matches.
                    HueClass::Wrapped(hue)
                }
            }
            _ => HueClass::Wrapped(hue + HUE_WRAP_OFFSET),
        }
    }
}
