//! Distance-network 2-approximation for the Steiner tree problem.
//!
//! Builds the metric closure over the terminals, takes its minimum
//! spanning tree, expands every closure edge back into its shortest path,
//! and cleans the union up with another spanning tree and leaf trimming.
//! The weight is at most `2 (1 - 1/l)` times the optimum for `l` leaves.
//!
//! [`Zelikovsky`] first pins the centers of profitable terminal triples as
//! Steiner vertices and then runs the same construction, which improves the
//! bound to 11/6.
//!
//! # References
//!
//! - Kou, L., Markowsky, G. & Berman, L. (1981). "A fast algorithm for
//!   Steiner trees", *Acta Informatica* 15(2), 141-145.
//! - Zelikovsky, A. (1993). "An 11/6-approximation algorithm for the
//!   network Steiner problem", *Algorithmica* 9(5), 463-470.

mod closure;
mod runner;
mod zelikovsky;

pub use closure::MetricClosure;
pub use runner::TwoApproximation;
pub use zelikovsky::Zelikovsky;
