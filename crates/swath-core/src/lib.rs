//! Core types and word-level bit helpers for swath regions.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! [`Point`] value type, the [`RegionError`] enum, and the [`bits`] module
//! of 64-bit word tricks (band carries, bit spreading, approximate-density
//! random words) that the region engine is built from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bits;
pub mod error;
pub mod point;

pub use error::RegionError;
pub use point::Point;
