//! Search budgets and bounds.

use std::fmt;
use std::time::Duration;

use voxnav_core::Pos;

/// Budgets and optional cost bound for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Total wall time across all resumptions.
    pub timeout: Duration,
    /// Wall time of a single [`step`](crate::AStar::step) call.
    pub tick_timeout: Duration,
    /// Nodes whose `g + h` exceeds the start estimate plus this radius are
    /// not generated. `None` is unbounded.
    pub radius: Option<f64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            tick_timeout: Duration::from_millis(40),
            radius: None,
        }
    }
}

impl SearchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tick_timeout(mut self, tick_timeout: Duration) -> Self {
        self.tick_timeout = tick_timeout;
        self
    }

    /// Bound the search radius. A negative radius means unbounded.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = if radius < 0.0 { None } else { Some(radius) };
        self
    }

    /// Check the configuration before a search starts.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(r) = self.radius {
            if !r.is_finite() || r < 0.0 {
                return Err(SearchError::InvalidRadius(r));
            }
        }
        if self.tick_timeout.is_zero() {
            return Err(SearchError::ZeroTickBudget);
        }
        Ok(())
    }
}

/// Errors that prevent a search from starting.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The radius is NaN, infinite or negative.
    InvalidRadius(f64),
    /// The per-step budget is zero, so no step could ever expand a node.
    ZeroTickBudget,
    /// The goal returned an unusable estimate for the start position.
    NonFiniteHeuristic { pos: Pos, value: f64 },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRadius(r) => write!(f, "search radius must be finite and non-negative, got {r}"),
            Self::ZeroTickBudget => write!(f, "tick budget must be non-zero"),
            Self::NonFiniteHeuristic { pos, value } => {
                write!(f, "goal estimate at start {pos} is not a finite non-negative cost: {value}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
