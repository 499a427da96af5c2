//! Intake Wizard — client brief intake with a resilient submission path.

pub mod brief;
pub mod config;
pub mod error;
pub mod receiver;
pub mod submission;
pub mod terminal;
pub mod wizard;

pub use error::{Error, Result};
