//! Form state for the channel sign-up form
//!
//! Tracks field values against their defaults, runs ordered validation rules
//! per field, manages a dynamically sized list of phone numbers with stable
//! identities, and notifies listeners of every change.

pub mod config;
pub mod error;
pub mod state;

pub use config::{FormConfig, ValidationMode};
pub use error::{FormError, PathError};
pub use state::*;
