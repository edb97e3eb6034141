use serde::{Deserialize, Serialize};

use crate::error::{PatternError, PatternResult};

// Which way the arms of a bent wire fall away from the apex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VOrientation {
    // Apex on top, arms drooping down (inverted V)
    Inverted,
    // Apex at the bottom, arms rising
    Upright,
}

impl VOrientation {
    // Sign applied to the z component of the arm with negative arc distance.
    pub fn sign(self) -> f64 {
        match self {
            VOrientation::Inverted => 1.,
            VOrientation::Upright => -1.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AntennaShape {
    Straight,
    VBent {
        droop_deg: f64,
        orientation: VOrientation,
    },
    // Off-center-fed dipole. The feed fraction places the apex (and the feed marker),
    // it never changes the current distribution.
    OffCenterFed {
        feed_fraction: f64,
        #[serde(default)]
        droop_deg: f64,
    },
    // Fed at one end, sloping down from the feed point.
    EndFedSloper {
        slope_deg: f64,
    },
}

impl AntennaShape {
    // Whole-wire arc-length fraction at which the apex (structural feed point) sits.
    pub fn apex_fraction(&self) -> f64 {
        match *self {
            AntennaShape::Straight | AntennaShape::VBent { .. } => 0.5,
            AntennaShape::OffCenterFed { feed_fraction, .. } => feed_fraction,
            AntennaShape::EndFedSloper { .. } => 0.,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AntennaShape::Straight => "straight",
            AntennaShape::VBent { .. } => "v_bent",
            AntennaShape::OffCenterFed { .. } => "off_center_fed",
            AntennaShape::EndFedSloper { .. } => "end_fed_sloper",
        }
    }
}

// Everything needed to rebuild one antenna's wire. `harmonic` is the electrical length in
// half-wavelengths, `length` the physical arc length in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AntennaDescriptor {
    pub shape: AntennaShape,
    pub harmonic: u32,
    pub length: f64,
}

impl AntennaDescriptor {
    pub fn straight(harmonic: u32, length: f64) -> AntennaDescriptor {
        AntennaDescriptor {
            shape: AntennaShape::Straight,
            harmonic,
            length,
        }
    }

    pub fn inverted_v(harmonic: u32, length: f64, droop_deg: f64) -> AntennaDescriptor {
        AntennaDescriptor {
            shape: AntennaShape::VBent {
                droop_deg,
                orientation: VOrientation::Inverted,
            },
            harmonic,
            length,
        }
    }

    pub fn off_center_fed(harmonic: u32, length: f64, feed_fraction: f64) -> AntennaDescriptor {
        AntennaDescriptor {
            shape: AntennaShape::OffCenterFed {
                feed_fraction,
                droop_deg: 0.,
            },
            harmonic,
            length,
        }
    }

    pub fn end_fed_sloper(harmonic: u32, length: f64, slope_deg: f64) -> AntennaDescriptor {
        AntennaDescriptor {
            shape: AntennaShape::EndFedSloper { slope_deg },
            harmonic,
            length,
        }
    }

    // Rejects anything that would make the computed pattern meaningless. Values are never clamped.
    pub fn validate(&self) -> PatternResult<()> {
        if !(self.length.is_finite() && self.length > 0.) {
            return Err(PatternError::InvalidLength(self.length));
        }
        if self.harmonic < 1 {
            return Err(PatternError::InvalidHarmonic(self.harmonic));
        }
        match self.shape {
            AntennaShape::Straight => Ok(()),
            AntennaShape::VBent { droop_deg, .. } => check_angle("droop angle", droop_deg),
            AntennaShape::OffCenterFed {
                feed_fraction,
                droop_deg,
            } => {
                if !(feed_fraction > 0. && feed_fraction < 1.) {
                    return Err(PatternError::InvalidFeedFraction(feed_fraction));
                }
                check_angle("droop angle", droop_deg)
            }
            AntennaShape::EndFedSloper { slope_deg } => check_angle("slope angle", slope_deg),
        }
    }
}

fn check_angle(name: &'static str, value: f64) -> PatternResult<()> {
    if value.is_finite() && (0. ..90.).contains(&value) {
        Ok(())
    } else {
        Err(PatternError::InvalidAngle { name, value })
    }
}
