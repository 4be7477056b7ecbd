use serde::{Deserialize, Serialize};

/// Number of days to forecast, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct ForecastHorizon(u32);

impl ForecastHorizon {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 365;
    pub const DEFAULT: u32 = 31;

    /// Clamps any requested value into the allowed range.
    pub fn clamped(requested: i64) -> Self {
        let value = requested.clamp(Self::MIN as i64, Self::MAX as i64);
        Self(value as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn days(self) -> usize {
        self.0 as usize
    }
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<i64> for ForecastHorizon {
    fn from(requested: i64) -> Self {
        Self::clamped(requested)
    }
}

impl From<ForecastHorizon> for u32 {
    fn from(horizon: ForecastHorizon) -> Self {
        horizon.0
    }
}

impl std::fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
