//! Game of Life world model.
//!
//! This crate implements the toroidal grid, its persistence and rendering, and
//! the rule that turns one generation into the next.

pub mod world;
pub mod evolution;
pub mod simulation;

pub use world::World;
pub use evolution::{neighbors, next_cell, next_state};
pub use simulation::Simulation;
