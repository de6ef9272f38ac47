//! Core types for voxel navigation.
//!
//! This crate provides the foundational types shared by the search engine and
//! the movement model: voxel geometry, terrain materials and the [`World`]
//! query interface, the [`Move`] transition record, and [`VoxelGrid`], a
//! dense in-memory world that can be built from ASCII layers.

pub mod action;
pub mod block;
pub mod geom;
pub mod grid;
pub mod layers;

pub use action::{Move, Placement};
pub use block::{Block, Material, ToolKind, World};
pub use geom::{Bounds, CARDINALS, Pos};
pub use grid::VoxelGrid;
pub use layers::{Layers, LayersError};
