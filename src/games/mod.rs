//! Game implementations.

pub mod jokenpo;
