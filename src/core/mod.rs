// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

// Re-export public types for convenient access via `deutsch::core::TypeName`
pub use error::DeutschError;
pub use qubit::Qubit;
pub use state::StateVector;
