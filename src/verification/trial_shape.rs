use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rand::Rng;

use crate::utils::GenericResult;

/// How the shape of the matrices of each trial is chosen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialShape {
    /// Rows and columns are drawn independently and uniformly from `[1, max_dim]`
    Random { max_dim: usize },

    /// Every trial uses the same shape
    Fixed { rows: usize, cols: usize },
}

impl TrialShape {
    pub fn random(max_dim: usize) -> GenericResult<Self> {
        if max_dim == 0 {
            anyhow::bail!("Maximum dimension must be at least 1");
        }
        Ok(TrialShape::Random { max_dim })
    }

    pub fn fixed(rows: usize, cols: usize) -> GenericResult<Self> {
        if rows == 0 || cols == 0 {
            anyhow::bail!("Fixed shape {}x{} has an empty dimension", rows, cols);
        }
        Ok(TrialShape::Fixed { rows, cols })
    }

    /// Shape of the next trial. A `Random` shape built with `max_dim` 0 draws 1x1 matrices.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        match *self {
            TrialShape::Random { max_dim } => {
                let max_dim = max_dim.max(1);
                (rng.gen_range(1..=max_dim), rng.gen_range(1..=max_dim))
            }
            TrialShape::Fixed { rows, cols } => (rows, cols),
        }
    }
}

impl Display for TrialShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TrialShape::Random { max_dim } => write!(f, "random up to {}x{}", max_dim, max_dim),
            TrialShape::Fixed { rows, cols } => write!(f, "{}x{}", rows, cols),
        }
    }
}

/// Parses `<rows>x<cols>` into a fixed shape. `random` is handled by the config, since it needs the
/// maximum dimension.
impl FromStr for TrialShape {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| anyhow::anyhow!("Invalid shape '{}', expected <rows>x<cols>", s))?;
        TrialShape::fixed(rows.trim().parse()?, cols.trim().parse()?)
    }
}
