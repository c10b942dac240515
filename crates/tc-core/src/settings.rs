//! Routing parameters.
//!
//! # Units
//!
//! | Field           | Unit                              |
//! |-----------------|-----------------------------------|
//! | `bus_wait_time` | minutes                           |
//! | `bus_velocity`  | distance units (metres) / minute  |
//!
//! Catalogue distances are integer metres, so a ride of `d` metres takes
//! `d / bus_velocity` minutes.  Timetables usually quote speed in km/h; use
//! [`RoutingSettings::from_kmh`] for those.
//!
//! # JSON
//!
//! ```json
//! { "bus_wait_time": 6, "bus_velocity": 40 }
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Boarding delay and cruising speed shared by every bus.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before every boarding.
    pub bus_wait_time: f64,
    /// Distance covered per minute of riding.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Construct and validate.
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> CoreResult<Self> {
        let settings = Self { bus_wait_time, bus_velocity };
        settings.validate()?;
        Ok(settings)
    }

    /// Construct from a velocity in km/h, converted to metres per minute.
    pub fn from_kmh(bus_wait_time: f64, velocity_kmh: f64) -> CoreResult<Self> {
        Self::new(bus_wait_time, velocity_kmh * 1000.0 / 60.0)
    }

    /// Both parameters must be positive and finite.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.bus_wait_time.is_finite() && self.bus_wait_time > 0.0) {
            return Err(CoreError::Config(format!(
                "bus_wait_time must be positive and finite, got {}",
                self.bus_wait_time
            )));
        }
        if !(self.bus_velocity.is_finite() && self.bus_velocity > 0.0) {
            return Err(CoreError::Config(format!(
                "bus_velocity must be positive and finite, got {}",
                self.bus_velocity
            )));
        }
        Ok(())
    }

    /// Minutes needed to ride `distance` units.
    #[inline]
    pub fn ride_time(&self, distance: f64) -> f64 {
        distance / self.bus_velocity
    }

    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        let settings: Self =
            serde_json::from_str(s).map_err(|e| CoreError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`from_json_str`](Self::from_json_str) but reads from any source.
    pub fn from_json_reader<R: Read>(reader: R) -> CoreResult<Self> {
        let settings: Self =
            serde_json::from_reader(reader).map_err(|e| CoreError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}
