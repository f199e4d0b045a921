//! The packed bit-grid region engine.
//!
//! A [`Region`] is an on/off state over every cell of a `width × height`
//! grid, stored as column-major 64-bit words so that set algebra and
//! neighbourhood operations run a whole band of 64 cells at a time.
//!
//! # Operation families
//!
//! - Storage and conversion: cell access, rectangles and circles, arrays,
//!   point lists, random fills and the plain numeric text format
//! - Set algebra: [`Region::or`], [`Region::and`], [`Region::xor`] and
//!   friends, all over the overlap of two grids
//! - Morphology: expand, retract, fringe, surface, connect, thin and
//!   disperse, each in four-way and eight-way forms
//! - Bounded fills: [`Region::flood`], [`Region::spill`], [`Region::splash`]
//! - Transforms: translate, zoom, flip, rotate, insert and resize
//! - Sampling: rank queries, random subsets, quasi-random and blue-noise
//!   selection, and [`PoissonDisk`] sampling
//!
//! Regions are single-owner values mutated in place. Mutating methods
//! return `&mut Self` so they chain.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blue;
pub mod poisson;
pub mod region;

mod algebra;
mod convert;
mod flood;
mod morph;
mod sample;
mod stencil;
mod text;
mod transform;

#[cfg(test)]
pub(crate) mod testing;

pub use blue::{blue_levels, blue_rank, BLUE_LEVEL_COUNT};
pub use poisson::{PoissonConfigError, PoissonDisk, PoissonDiskBuilder};
pub use region::{Cells, Region};
pub use swath_core::{Point, RegionError};
