//! # fincal-core
//!
//! Core types and error definitions for fincal.
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace: floating-point type aliases, the error taxonomy, the `Compounding`
//! convention, the Observer/Observable pattern and process-wide `Settings`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Compounding conventions.
pub mod compounding;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Design patterns: observable.
pub mod patterns;

/// Global library settings (evaluation date).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
pub use patterns::observable::{Observable, ObservableImpl, Observer};
pub use settings::{SavedSettings, Settings};
