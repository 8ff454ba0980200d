//! Core types for Ponsiv.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod interaction;
pub mod price;
pub mod status;
pub mod tags;

pub use id::*;
pub use interaction::InteractionKind;
pub use price::{CurrencyCode, Price};
pub use status::OrderStatus;
pub use tags::{decode_tags, encode_tags};
