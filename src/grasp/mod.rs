//! Hybrid GRASP with perturbations and path relinking.
//!
//! Greedy randomized constructions on perturbed edge weights are improved
//! by local search, collected in an elite archive and finally recombined
//! by path relinking.
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive
//!   search procedures", *Journal of Global Optimization* 6(2), 109-133.
//! - Ribeiro, C. C., Uchoa, E. & Werneck, R. F. (2002). "A hybrid GRASP
//!   with perturbations for the Steiner problem in graphs", *INFORMS
//!   Journal on Computing* 14(3), 228-246.

mod config;
mod perturbation;
mod runner;

pub use config::GraspConfig;
pub use perturbation::{perturb_weights, Perturbation};
pub use runner::{GraspReport, GraspRunner};
