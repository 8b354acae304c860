//! Foundation types for the doxpp toolchain.
//!
//! This module provides fundamental types used throughout the compiler:
//! - [`Position`], [`Extent`] - Line/column positions reported by the front-end
//! - [`is_valid_id`] - Identifier validation for group and page ids
//! - [`split_top_level`] - Comma lists that respect brackets
//! - [`constants`] - The embedded documentation command surface
//!
//! This module has NO dependencies on other doxpp modules.

pub mod constants;
mod ident;
mod position;
mod split;

pub use ident::{is_valid_id, strip_quotes};
pub use position::{Extent, Position};
pub use split::split_top_level;
