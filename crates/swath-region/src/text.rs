//! Text forms: a human-readable grid dump and a plain numeric format.
//!
//! The numeric format is `width,height,word0,word1,...` with each word of
//! the column-major array written as a decimal `u64`.

use std::fmt;

use swath_core::RegionError;

use crate::region::Region;

impl fmt::Display for Region {
    /// One line per row, `#` for on and `.` for off.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row: String = (0..self.width as i32)
                .map(|x| if self.get(x, y) { '#' } else { '.' })
                .collect();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

fn malformed(reason: impl Into<String>) -> RegionError {
    RegionError::MalformedSerialization {
        reason: reason.into(),
    }
}

impl Region {
    /// Encode as `width,height,word0,word1,...`.
    pub fn serialize_to_string(&self) -> String {
        let mut out = format!("{},{}", self.width, self.height);
        for w in &self.data {
            out.push(',');
            out.push_str(&w.to_string());
        }
        out
    }

    /// Decode the format written by
    /// [`serialize_to_string`](Region::serialize_to_string).
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::MalformedSerialization`] if a dimension is
    /// missing, a field is not a number, or the word count does not match
    /// the dimensions.
    pub fn deserialize_from_string(s: &str) -> Result<Region, RegionError> {
        let mut fields = s.trim().split(',');
        let mut dimension = |name: &str| -> Result<usize, RegionError> {
            let field = fields
                .next()
                .filter(|f| !f.is_empty())
                .ok_or_else(|| malformed(format!("missing {name}")))?;
            field
                .trim()
                .parse()
                .map_err(|_| malformed(format!("{name} {field:?} is not a number")))
        };
        let width = dimension("width")?;
        let height = dimension("height")?;
        let words = fields
            .map(|f| {
                f.trim()
                    .parse::<u64>()
                    .map_err(|_| malformed(format!("word {f:?} is not a number")))
            })
            .collect::<Result<Vec<u64>, _>>()?;
        Region::from_words(width, height, words).map_err(|e| match e {
            RegionError::DimensionMismatch { expected, found } => {
                malformed(format!("expected {expected} words, found {found}"))
            }
            other => other,
        })
    }
}
