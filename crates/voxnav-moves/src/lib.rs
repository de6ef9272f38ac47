//! Movement model for voxnav searches.
//!
//! [`Moves`] implements [`voxnav_paths::CostModel`] for a two-cell-tall agent
//! that can break and place blocks. Digging costs come from a
//! [`ToolSelector`]; everything else is tuned through [`MoveConfig`].

mod config;
mod moves;
mod tool;

pub use config::{MoveConfig, MoveConfigError};
pub use moves::Moves;
pub use tool::{BareHands, Tool, ToolSelector, Toolbelt, dig_time_ms};
