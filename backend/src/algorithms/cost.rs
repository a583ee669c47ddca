//! Trailer movement pricing.

use serde::{Deserialize, Serialize};

/// Fee schedule applied to every trailer movement:
/// `max(minimum_fee, base_fee + per_mile_rate * miles)`.
///
/// Read from the `[fees]` section of `routing.toml`. Defaults to £150 base,
/// £1.80 per mile and a £200 minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    #[serde(default = "default_base_fee")]
    pub base_fee: f64,
    #[serde(default = "default_per_mile_rate")]
    pub per_mile_rate: f64,
    #[serde(default = "default_minimum_fee")]
    pub minimum_fee: f64,
}

fn default_base_fee() -> f64 {
    150.0
}

fn default_per_mile_rate() -> f64 {
    1.80
}

fn default_minimum_fee() -> f64 {
    200.0
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_fee: default_base_fee(),
            per_mile_rate: default_per_mile_rate(),
            minimum_fee: default_minimum_fee(),
        }
    }
}

impl FeeSchedule {
    pub fn new(base_fee: f64, per_mile_rate: f64, minimum_fee: f64) -> Self {
        Self {
            base_fee,
            per_mile_rate,
            minimum_fee,
        }
    }

    /// Cost of moving one trailer `distance_miles`.
    pub fn cost(&self, distance_miles: f64) -> f64 {
        (self.base_fee + self.per_mile_rate * distance_miles).max(self.minimum_fee)
    }

    /// Rejects negative rates and fees.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("base_fee", self.base_fee),
            ("per_mile_rate", self.per_mile_rate),
            ("minimum_fee", self.minimum_fee),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("fee schedule field '{}' must be a non-negative number, got {}", name, value));
            }
        }
        Ok(())
    }
}
