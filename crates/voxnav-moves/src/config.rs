//! Movement costs and limits.

use std::fmt;

/// Tunables of the movement model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveConfig {
    /// Added per placed block.
    pub put_cost: f64,
    /// Added when leaving a liquid cell on a level move.
    pub water_cost: f64,
    /// Multiplier of the digging cost of each broken cell.
    pub break_cost: f64,
    /// Largest height difference between origin feet and landing ground.
    pub max_drop_down: u32,
    /// Descents that cost more than this are not offered.
    pub max_clear_cost: f64,
    /// Whether transitions may break terrain at all.
    pub can_dig: bool,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            put_cost: 1.0,
            water_cost: 1.0,
            break_cost: 1.0,
            max_drop_down: 4,
            max_clear_cost: 100.0,
            can_dig: true,
        }
    }
}

impl MoveConfig {
    pub fn with_put_cost(mut self, cost: f64) -> Self {
        self.put_cost = cost;
        self
    }

    pub fn with_water_cost(mut self, cost: f64) -> Self {
        self.water_cost = cost;
        self
    }

    pub fn with_break_cost(mut self, cost: f64) -> Self {
        self.break_cost = cost;
        self
    }

    pub fn with_max_drop_down(mut self, n: u32) -> Self {
        self.max_drop_down = n;
        self
    }

    pub fn with_max_clear_cost(mut self, cost: f64) -> Self {
        self.max_clear_cost = cost;
        self
    }

    pub fn with_can_dig(mut self, can_dig: bool) -> Self {
        self.can_dig = can_dig;
        self
    }

    /// Check that every cost is a finite non-negative number and that drops
    /// are possible.
    pub fn validate(&self) -> Result<(), MoveConfigError> {
        for (name, value) in [
            ("put_cost", self.put_cost),
            ("water_cost", self.water_cost),
            ("break_cost", self.break_cost),
            ("max_clear_cost", self.max_clear_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MoveConfigError::InvalidCost { name, value });
            }
        }
        if self.max_drop_down == 0 {
            return Err(MoveConfigError::ZeroMaxDrop);
        }
        Ok(())
    }
}

/// Errors reported by [`MoveConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum MoveConfigError {
    /// A cost field is NaN, infinite or negative.
    InvalidCost { name: &'static str, value: f64 },
    /// `max_drop_down` is zero.
    ZeroMaxDrop,
}

impl fmt::Display for MoveConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCost { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::ZeroMaxDrop => write!(f, "max_drop_down must be at least 1"),
        }
    }
}

impl std::error::Error for MoveConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MoveConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.max_drop_down, 4);
        assert_eq!(c.max_clear_cost, 100.0);
        assert!(c.can_dig);
    }

    #[test]
    fn rejects_bad_costs() {
        let c = MoveConfig::default().with_break_cost(-1.0);
        assert_eq!(
            c.validate(),
            Err(MoveConfigError::InvalidCost {
                name: "break_cost",
                value: -1.0
            })
        );
        let c = MoveConfig::default().with_put_cost(f64::NAN);
        let err = c.validate().unwrap_err();
        assert!(err.to_string().starts_with("put_cost must be finite"));
    }

    #[test]
    fn rejects_zero_drop() {
        let c = MoveConfig::default().with_max_drop_down(0);
        assert_eq!(c.validate(), Err(MoveConfigError::ZeroMaxDrop));
    }
}
