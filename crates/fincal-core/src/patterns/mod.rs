//! Design patterns shared across fincal.

pub mod observable;
