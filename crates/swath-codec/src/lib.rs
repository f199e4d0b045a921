//! Lossless string compression for swath regions.
//!
//! [`to_compressed_string`] walks a region tile by tile along a Hilbert
//! curve ([`hilbert`]), run-length encodes the on/off transitions and
//! feeds the runs through a dictionary compressor ([`lz`]). The result is
//! a single printable string; [`decompress`] restores the region exactly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod hilbert;
pub mod lz;

pub use codec::{
    decompress, to_compressed_string, RUN_OFFSET, TILE_DELIMITER, TILE_HEIGHT, TILE_WIDTH,
};
pub use error::CodecError;
pub use hilbert::tile_order;
