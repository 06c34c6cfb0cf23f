#[cfg(feature = "cli")]
pub mod cli;
pub mod content_tables;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 600;
pub const MAX_SIMULATED_DELAY_MS: u64 = 10_000;

/// Tunables of the content facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacadeSettings {
    pub simulated_delay: Duration,
}

impl FacadeSettings {
    pub fn from_millis(delay_ms: u64) -> Self {
        Self {
            simulated_delay: Duration::from_millis(delay_ms),
        }
    }

    /// No simulated latency.
    pub fn immediate() -> Self {
        Self::from_millis(0)
    }
}

impl Default for FacadeSettings {
    fn default() -> Self {
        Self::from_millis(DEFAULT_SIMULATED_DELAY_MS)
    }
}

impl Validate for FacadeSettings {
    fn validate(&self) -> Result<()> {
        let delay_ms = u64::try_from(self.simulated_delay.as_millis()).unwrap_or(u64::MAX);
        validation::validate_range("simulated_delay_ms", delay_ms, 0, MAX_SIMULATED_DELAY_MS)
    }
}
