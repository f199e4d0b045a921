//! Swath: packed bit-grid regions for procedural generation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all swath sub-crates. For most users, adding `swath` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use swath::prelude::*;
//!
//! // Two rooms joined by a corridor.
//! let mut map = Region::new(24, 8);
//! map.insert_rectangle(1, 1, 6, 6)
//!     .insert_rectangle(17, 1, 6, 6)
//!     .insert_rectangle(7, 4, 10, 1);
//!
//! // Flood from the left room; the corridor carries it into the right one.
//! let mut reached = Region::from_point(24, 8, Point::new(2, 2));
//! reached.flood_n(&map, usize::MAX);
//! assert_eq!(reached, map);
//!
//! // The outline of the map, and a lossless round trip through a string.
//! let mut walls = map.clone();
//! walls.fringe8way();
//! assert!(!walls.intersects(&map));
//! let packed = to_compressed_string(&map);
//! assert_eq!(decompress(&packed).unwrap(), map);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `swath-core` | `Point`, `RegionError`, word-level bit helpers |
//! | [`region`] | `swath-region` | `Region`, blue noise, Poisson-disk sampling |
//! | [`codec`] | `swath-codec` | Compressed string encoding |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates, errors and word-level bit helpers (`swath-core`).
pub use swath_core as types;

/// The packed region type and its samplers (`swath-region`).
///
/// Everything happens on [`region::Region`]: set algebra, morphology,
/// flood fills, transforms, random and well-spread sampling. Poisson-disk
/// sampling is configured with [`region::PoissonDisk::builder`].
pub use swath_region as region;

/// Lossless compressed strings (`swath-codec`).
///
/// [`codec::to_compressed_string`] and [`codec::decompress`].
pub use swath_codec as codec;

/// Common imports for typical swath usage.
///
/// ```rust
/// use swath::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use swath_core::{Point, RegionError};

    // Regions and samplers
    pub use swath_region::{PoissonDisk, Region};

    // Codec
    pub use swath_codec::{decompress, to_compressed_string, CodecError};
}
