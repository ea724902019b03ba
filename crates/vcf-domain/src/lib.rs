//! Domain layer for VCF tonnage calculation
//!
//! Holds the reference/calculation models, the grid rounding and VCF
//! resolution policy, and the repository traits the outer layers implement.

pub mod model;
pub mod repository;
pub mod service;
