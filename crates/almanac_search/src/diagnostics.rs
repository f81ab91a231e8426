//! Best-effort bookkeeping for skipped samples.

use almanac_core::{Body, CoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which stage requested a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detector {
    SignIngress,
    RetrogradeStation,
    Aspect,
    MoonPhase,
    Forecast,
}

impl Detector {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SignIngress => "sign_ingress",
            Self::RetrogradeStation => "retrograde_station",
            Self::Aspect => "aspect",
            Self::MoonPhase => "moon_phase",
            Self::Forecast => "forecast",
        }
    }
}

/// A sample that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleFailure {
    pub detector: Detector,
    pub body: Option<Body>,
    pub instant: DateTime<Utc>,
    pub message: String,
}

/// Attempted and failed sample counts plus each failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub attempted: u64,
    pub failed: u64,
    pub failures: Vec<SampleFailure>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one sample; on failure record it and return `None`.
    pub fn observe<T>(
        &mut self,
        detector: Detector,
        instant: DateTime<Utc>,
        result: Result<T, CoreError>,
    ) -> Option<T> {
        self.attempted += 1;
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.failed += 1;
                warn!(detector = detector.name(), %instant, error = %e, "skipping sample");
                self.failures.push(SampleFailure {
                    detector,
                    body: e.body(),
                    instant,
                    message: e.to_string(),
                });
                None
            }
        }
    }

    pub fn merge(&mut self, other: Diagnostics) {
        self.attempted += other.attempted;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }

    /// At least one sample was attempted and none succeeded.
    pub fn is_total_failure(&self) -> bool {
        self.attempted > 0 && self.failed == self.attempted
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
