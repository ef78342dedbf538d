//! Local search neighbourhoods for Steiner trees.
//!
//! Every move follows the same protocol: edit the current tree, validate
//! the candidate, then commit it or roll the edit back. Each strict
//! improvement is offered to the shared [`SteinerResult`](crate::result::SteinerResult)
//! as soon as it is found, so a cancelled search still reports it.

mod config;
mod delta;
mod key_path;
mod key_vertex;
mod runner;
mod vertex_moves;

pub use config::LocalSearchConfig;
pub use runner::{FastLocalSearch, HybridLocalSearch};
