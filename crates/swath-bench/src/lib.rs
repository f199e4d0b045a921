//! Benchmark profiles for the swath region engine.
//!
//! - [`dungeon_profile`]: 256x256 grid with rooms joined by corridors
//! - [`noise_profile`]: 256x256 grid with roughly half the cells on
//! - [`cave_profile`]: noise smoothed into open caverns

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swath_core::Point;
use swath_region::Region;

/// Side length of every profile grid.
pub const PROFILE_SIDE: usize = 256;

/// Deterministic generator for benchmark inputs.
pub fn profile_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Rectangular rooms on a 16-cell lattice, each joined to its right and
/// lower neighbour by a one-cell corridor.
pub fn dungeon_profile(seed: u64) -> Region {
    let mut rng = profile_rng(seed);
    let mut region = Region::new(PROFILE_SIDE, PROFILE_SIDE);
    let lattice = (PROFILE_SIDE / 16) as i32;
    for gx in 0..lattice {
        for gy in 0..lattice {
            let (x0, y0) = (gx * 16, gy * 16);
            let w = rng.random_range(4..12);
            let h = rng.random_range(4..12);
            region.insert_rectangle(x0 + 2, y0 + 2, w, h);
            if gx + 1 < lattice {
                region.insert_rectangle(x0 + 4, y0 + 4, 16, 1);
            }
            if gy + 1 < lattice {
                region.insert_rectangle(x0 + 4, y0 + 4, 1, 16);
            }
        }
    }
    region
}

/// Uniform noise with roughly half the cells on.
pub fn noise_profile(seed: u64) -> Region {
    Region::random(&mut profile_rng(seed), PROFILE_SIDE, PROFILE_SIDE)
}

/// Noise thinned by retraction and regrown, leaving blob-shaped caves.
pub fn cave_profile(seed: u64) -> Region {
    let mut rng = profile_rng(seed);
    let mut region = Region::random_fraction(&mut rng, 0.55, PROFILE_SIDE, PROFILE_SIDE);
    region.retract().expand_n(2).retract();
    region
}

/// A single seed cell inside `region`, or the grid centre if it is empty.
pub fn seed_cell(region: &Region) -> Point {
    region
        .first()
        .unwrap_or(Point::new(region.width() as i32 / 2, region.height() as i32 / 2))
}
