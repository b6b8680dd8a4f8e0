//! Core types and traits for portfolio analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Money and percentage value types (Usd, Percent)
//! - Position, portfolio and quote types
//! - Trading signals and order input types
//! - Supplier traits for quotes, signals and portfolio snapshots

pub mod types;
pub mod traits;
pub mod error;

pub use error::{FolioError, FolioResult};
pub use types::*;
pub use traits::*;
