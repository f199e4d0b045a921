//! Poisson-disk sampling restricted to the cells of a region.
//!
//! Bridson-style dart throwing: from each active sample, up to
//! `max_attempts` candidates are drawn in the annulus `[r, 2r)` around it
//! and the first one that is an on cell at least `r` from every accepted
//! sample is accepted. A background grid of cell size `r / √2` (at least
//! one cell) keeps the distance check local.
//!
//! Once the active list runs dry, fresh seeds are drawn from the whole
//! region, so disconnected parts are covered too.
//!
//! Constructed via the builder pattern: [`PoissonDisk::builder`].

use std::error::Error;
use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;
use smallvec::SmallVec;

use swath_core::Point;

use crate::region::Region;

/// Default candidates drawn per active sample.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Rejected [`PoissonDiskBuilder`] configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum PoissonConfigError {
    /// `min_distance` was never set.
    MissingMinDistance,
    /// `min_distance` is not finite or not positive.
    InvalidMinDistance {
        /// The rejected value.
        value: f64,
    },
    /// `max_attempts` is zero.
    ZeroAttempts,
}

impl fmt::Display for PoissonConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMinDistance => write!(f, "min_distance is required"),
            Self::InvalidMinDistance { value } => {
                write!(f, "min_distance must be finite and > 0, got {value}")
            }
            Self::ZeroAttempts => write!(f, "max_attempts must be at least 1"),
        }
    }
}

impl Error for PoissonConfigError {}

/// A validated Poisson-disk sampler configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PoissonDisk {
    min_distance: f64,
    max_attempts: u32,
    limit: Option<usize>,
}

/// Builder for [`PoissonDisk`].
///
/// Required field: `min_distance`.
#[derive(Clone, Debug)]
pub struct PoissonDiskBuilder {
    min_distance: Option<f64>,
    max_attempts: u32,
    limit: Option<usize>,
}

impl PoissonDisk {
    /// Create a new builder.
    pub fn builder() -> PoissonDiskBuilder {
        PoissonDiskBuilder {
            min_distance: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            limit: None,
        }
    }

    /// Minimum Euclidean distance between samples.
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Candidates drawn per active sample.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Cap on the number of samples, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Sample on cells of `region`. Every pair of returned points is at
    /// least `min_distance` apart.
    pub fn sample<R: Rng + ?Sized>(&self, region: &Region, rng: &mut R) -> Vec<Point> {
        let limit = self.limit.unwrap_or(usize::MAX);
        if region.is_empty() || limit == 0 {
            return Vec::new();
        }
        let mut grid = Background::new(region.width(), region.height(), self.min_distance);
        let mut accepted = Vec::new();
        let mut active: Vec<Point> = Vec::new();

        'outer: while accepted.len() < limit {
            if active.is_empty() {
                let mut seeded = false;
                for _ in 0..self.max_attempts {
                    let Some(p) = region.single_random(rng) else {
                        break 'outer;
                    };
                    if grid.is_clear(p) {
                        grid.insert(p);
                        accepted.push(p);
                        active.push(p);
                        seeded = true;
                        break;
                    }
                }
                if !seeded {
                    break;
                }
                continue;
            }

            let slot = rng.random_range(0..active.len());
            let origin = active[slot];
            let mut found = false;
            for _ in 0..self.max_attempts {
                let angle = rng.random::<f64>() * TAU;
                let radius = self.min_distance * (1.0 + rng.random::<f64>());
                let candidate = Point::new(
                    origin.x + (radius * angle.cos()).round() as i32,
                    origin.y + (radius * angle.sin()).round() as i32,
                );
                if region.contains(candidate) && grid.is_clear(candidate) {
                    grid.insert(candidate);
                    accepted.push(candidate);
                    active.push(candidate);
                    found = true;
                    break;
                }
            }
            if !found {
                active.swap_remove(slot);
            }
        }
        log::debug!(
            "poisson disk: {} samples, r = {}, {} still active",
            accepted.len(),
            self.min_distance,
            active.len()
        );
        accepted
    }
}

impl PoissonDiskBuilder {
    /// Set the minimum distance between samples. Must be finite and > 0.
    pub fn min_distance(mut self, distance: f64) -> Self {
        self.min_distance = Some(distance);
        self
    }

    /// Set the candidates drawn per active sample (default: 30).
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Cap the number of samples (default: no cap).
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Build the sampler, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `min_distance` is not set, not finite, or not positive
    /// - `max_attempts` is zero
    pub fn build(self) -> Result<PoissonDisk, PoissonConfigError> {
        let min_distance = self
            .min_distance
            .ok_or(PoissonConfigError::MissingMinDistance)?;
        if !min_distance.is_finite() || min_distance <= 0.0 {
            return Err(PoissonConfigError::InvalidMinDistance {
                value: min_distance,
            });
        }
        if self.max_attempts == 0 {
            return Err(PoissonConfigError::ZeroAttempts);
        }
        Ok(PoissonDisk {
            min_distance,
            max_attempts: self.max_attempts,
            limit: self.limit,
        })
    }
}

/// Accepted samples bucketed by grid cell.
struct Background {
    cell: f64,
    cols: usize,
    rows: usize,
    reach: i64,
    min_sq: f64,
    buckets: Vec<SmallVec<[Point; 1]>>,
}

impl Background {
    fn new(width: usize, height: usize, min_distance: f64) -> Self {
        let cell = (min_distance / std::f64::consts::SQRT_2).max(1.0);
        let cols = (width as f64 / cell).ceil() as usize + 1;
        let rows = (height as f64 / cell).ceil() as usize + 1;
        Self {
            cell,
            cols,
            rows,
            reach: (min_distance / cell).ceil() as i64,
            min_sq: min_distance * min_distance,
            buckets: vec![SmallVec::new(); cols * rows],
        }
    }

    fn bucket_of(&self, p: Point) -> (i64, i64) {
        (
            (f64::from(p.x) / self.cell) as i64,
            (f64::from(p.y) / self.cell) as i64,
        )
    }

    fn is_clear(&self, p: Point) -> bool {
        let (bx, by) = self.bucket_of(p);
        for gx in (bx - self.reach).max(0)..=(bx + self.reach).min(self.cols as i64 - 1) {
            for gy in (by - self.reach).max(0)..=(by + self.reach).min(self.rows as i64 - 1) {
                let bucket = &self.buckets[gx as usize * self.rows + gy as usize];
                if bucket.iter().any(|q| (q.distance_sq(p) as f64) < self.min_sq) {
                    return false;
                }
            }
        }
        true
    }

    fn insert(&mut self, p: Point) {
        let (bx, by) = self.bucket_of(p);
        self.buckets[bx as usize * self.rows + by as usize].push(p);
    }
}

impl Region {
    /// Replace the region with a Poisson-disk sample of its own cells.
    pub fn poisson_disk<R: Rng + ?Sized>(&mut self, disk: &PoissonDisk, rng: &mut R) -> &mut Self {
        let picked = disk.sample(self, rng);
        self.clear().insert_several(picked)
    }
}
