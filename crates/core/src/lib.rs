//! Core types for lodestore
//!
//! This crate defines the foundational pieces used throughout the system:
//! - Value: unified value enum for everything the typed store holds
//! - ValueCodec / Overrides: the coercion engine between typed values and
//!   persisted strings, with per-key override precedence
//! - TypedKey / FromValue: compile-time key typing
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod schema;
pub mod value;

pub use codec::{DecodeFn, EncodeFn, Overrides, ValueCodec};
pub use error::{Error, Result};
pub use schema::{FromValue, TypedKey};
pub use value::Value;
