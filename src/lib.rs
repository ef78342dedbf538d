//! Metaheuristics for the Steiner tree problem in graphs.
//!
//! Given a weighted undirected graph and a set of terminal vertices, finds a
//! low-weight tree spanning all terminals. Provides:
//!
//! - **Approximations**: Kou-Markowsky-Berman heuristic over the metric
//!   closure of the terminals, and Zelikovsky's triple-contraction
//!   refinement of it.
//! - **Constructions**: shortest-path, component-merging and MST-pruning
//!   greedy heuristics used to seed the search.
//! - **Local search**: Steiner vertex insertion and elimination, key-path
//!   exchange and key-vertex elimination.
//! - **Hybrid GRASP**: randomized multi-start construction with trust-based
//!   weight perturbation, an elite archive and path relinking.
//! - **Execution**: time-limited runs with cooperative cancellation and a
//!   best-so-far [`SteinerResult`](result::SteinerResult).
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use steiner_grasp::graph::Graph;
//!
//! let graph = Graph::try_from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)]).unwrap();
//! let result = steiner_grasp::solve(&graph, &BTreeSet::from([1, 3])).unwrap();
//! assert_eq!(result.weight(), 2.0);
//! ```

pub mod algorithm;
pub mod approx;
pub mod cancel;
pub mod construction;
pub mod error;
pub mod execution;
pub mod graph;
pub mod grasp;
pub mod local_search;
pub mod preprocess;
pub mod random;
pub mod relinking;
pub mod result;
pub mod search;

pub use algorithm::Algorithm;
pub use error::SteinerError;
pub use execution::{run_with_time_limit, solve, SteinerAlgorithm};
