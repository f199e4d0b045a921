//! Nested blue-noise tiles.
//!
//! A single 64×64 rank matrix is generated with the void-and-cluster
//! method on a torus: every cell gets a distinct rank in `0..4096`, and
//! the cells ranked below any threshold are spread as evenly as possible.
//! Level `i` is the tile of cells ranked below `16 * (i + 1)`, so levels
//! are nested and level 255 is the full tile.
//!
//! The matrix is computed on first use and shared read-only afterwards.

use std::sync::OnceLock;

/// Number of blue-noise levels.
pub const BLUE_LEVEL_COUNT: usize = 256;

/// Side length of the blue-noise tile.
pub const TILE: usize = 64;

const CELLS: usize = TILE * TILE;
const SIGMA: f64 = 1.5;
/// Share of cells in the initial binary pattern.
const INITIAL_DENSITY: f64 = 0.1;

struct Blue {
    ranks: Vec<u16>,
    levels: Box<[[u64; TILE]; BLUE_LEVEL_COUNT]>,
}

static BLUE: OnceLock<Blue> = OnceLock::new();

fn blue() -> &'static Blue {
    BLUE.get_or_init(|| {
        let ranks = void_and_cluster();
        let mut levels = Box::new([[0u64; TILE]; BLUE_LEVEL_COUNT]);
        let per_level = CELLS / BLUE_LEVEL_COUNT;
        for (i, &rank) in ranks.iter().enumerate() {
            let (x, y) = (i / TILE, i % TILE);
            for level in (rank as usize / per_level)..BLUE_LEVEL_COUNT {
                levels[level][x] |= 1u64 << y;
            }
        }
        log::debug!("generated {BLUE_LEVEL_COUNT} blue-noise levels");
        Blue { ranks, levels }
    })
}

/// All blue-noise levels, sparsest first. Each level is 64 column words
/// (bit `y` of word `x` is cell `(x, y)`), suitable for
/// [`Region::and_wrapping64`](crate::Region::and_wrapping64).
pub fn blue_levels() -> &'static [[u64; TILE]; BLUE_LEVEL_COUNT] {
    &blue().levels
}

/// Rank of cell `(x, y)` in the blue-noise matrix, wrapping both
/// coordinates onto the 64×64 torus.
pub fn blue_rank(x: i32, y: i32) -> u16 {
    let (x, y) = (x.rem_euclid(TILE as i32) as usize, y.rem_euclid(TILE as i32) as usize);
    blue().ranks[x * TILE + y]
}

// ── Generation ──────────────────────────────────────────────────

fn splitmix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Energy field: Gaussian-weighted count of nearby on cells.
struct Field {
    kernel: Vec<f64>,
    energy: Vec<f64>,
    on: Vec<bool>,
}

impl Field {
    fn new() -> Self {
        let mut kernel = vec![0.0; CELLS];
        for dx in 0..TILE {
            for dy in 0..TILE {
                let wx = dx.min(TILE - dx) as f64;
                let wy = dy.min(TILE - dy) as f64;
                kernel[dx * TILE + dy] = (-(wx * wx + wy * wy) / (2.0 * SIGMA * SIGMA)).exp();
            }
        }
        // Tiny per-cell offsets break ties without favouring any direction.
        let energy = (0..CELLS as u64)
            .map(|i| (splitmix(i) >> 11) as f64 * 1e-12 / (1u64 << 53) as f64)
            .collect();
        Self {
            kernel,
            energy,
            on: vec![false; CELLS],
        }
    }

    fn toggle(&mut self, cell: usize, on: bool) {
        self.on[cell] = on;
        let sign = if on { 1.0 } else { -1.0 };
        let (cx, cy) = (cell / TILE, cell % TILE);
        for x in 0..TILE {
            let dx = (x + TILE - cx) % TILE;
            for y in 0..TILE {
                let dy = (y + TILE - cy) % TILE;
                self.energy[x * TILE + y] += sign * self.kernel[dx * TILE + dy];
            }
        }
    }

    /// The on cell with the highest energy.
    fn tightest_cluster(&self) -> Option<usize> {
        (0..CELLS)
            .filter(|&c| self.on[c])
            .max_by(|&a, &b| self.energy[a].total_cmp(&self.energy[b]))
    }

    /// The off cell with the lowest energy.
    fn largest_void(&self) -> Option<usize> {
        (0..CELLS)
            .filter(|&c| !self.on[c])
            .min_by(|&a, &b| self.energy[a].total_cmp(&self.energy[b]))
    }
}

fn void_and_cluster() -> Vec<u16> {
    let mut field = Field::new();

    // Initial pattern: a hash-ordered tenth of the cells, then relaxed by
    // moving the tightest cluster into the largest void until stable.
    let initial = (CELLS as f64 * INITIAL_DENSITY) as usize;
    let mut order: Vec<usize> = (0..CELLS).collect();
    order.sort_by_key(|&c| splitmix(c as u64 ^ 0x5157_4154_48));
    for &c in &order[..initial] {
        field.toggle(c, true);
    }
    for _ in 0..CELLS {
        let Some(cluster) = field.tightest_cluster() else {
            break;
        };
        field.toggle(cluster, false);
        let Some(void) = field.largest_void() else {
            break;
        };
        if void == cluster {
            field.toggle(cluster, true);
            break;
        }
        field.toggle(void, true);
    }
    let prototype_on = field.on.clone();
    let prototype_energy = field.energy.clone();

    let mut ranks = vec![0u16; CELLS];

    // Phase 1: peel the tightest clusters off the prototype, highest rank
    // first.
    for rank in (0..initial).rev() {
        let Some(c) = field.tightest_cluster() else {
            break;
        };
        field.toggle(c, false);
        ranks[c] = rank as u16;
    }

    // Phase 2: from the prototype, fill the largest voids.
    field.on = prototype_on;
    field.energy = prototype_energy;
    for rank in initial..CELLS {
        let Some(c) = field.largest_void() else {
            break;
        };
        field.toggle(c, true);
        ranks[c] = rank as u16;
    }
    ranks
}
