use std::env::var;
use std::str::FromStr;

use anyhow::Context;

use crate::utils::GenericResult;
use crate::verification::trial_shape::TrialShape;

/// Settings shared by all the loss checks. Read from the environment by the `verify_losses` binary:
/// * `LOSS_CHECK_TESTS`: trials per check (default 10)
/// * `LOSS_CHECK_SEED`: seed of the random generator (default 777)
/// * `LOSS_CHECK_TOLERANCE`: maximum accepted error (default 1e-10)
/// * `LOSS_CHECK_F32_TOLERANCE`: maximum accepted error of single precision backends (default 1e-2)
/// * `LOSS_CHECK_MAX_DIM`: upper bound of the random matrix dimensions (default 100)
/// * `LOSS_CHECK_CE_GRADIENT_SHAPE`: `random` or `<rows>x<cols>` (default 8x8)
#[derive(Clone, Debug, PartialEq)]
pub struct VerifierConfig {
    pub ntests: usize,
    pub seed: u64,
    pub tolerance: f64,
    pub single_precision_tolerance: f64,
    pub shape: TrialShape,
    pub cross_entropy_gradient_shape: TrialShape,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            ntests: 10,
            seed: 777,
            tolerance: 1e-10,
            single_precision_tolerance: 1e-2,
            shape: TrialShape::Random { max_dim: 100 },
            cross_entropy_gradient_shape: TrialShape::Fixed { rows: 8, cols: 8 },
        }
    }
}

fn parse_tolerance(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: f64) -> GenericResult<f64> {
    let tolerance = parse_or(lookup, name, default)?;
    if tolerance.is_nan() || tolerance < 0.0 {
        anyhow::bail!("{} must be a non-negative number", name);
    }
    Ok(tolerance)
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> GenericResult<T>
    where T: FromStr, T::Err: std::error::Error + Send + Sync + 'static {
    match lookup(name) {
        Some(value) => value.trim().parse().with_context(|| format!("Invalid value '{}' for {}", value, name)),
        None => Ok(default),
    }
}

impl VerifierConfig {
    pub fn from_env() -> GenericResult<Self> {
        Self::from_lookup(|name| var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> GenericResult<Self> {
        let default = Self::default();

        let ntests = parse_or(&lookup, "LOSS_CHECK_TESTS", default.ntests)?;
        if ntests == 0 {
            anyhow::bail!("LOSS_CHECK_TESTS must be at least 1");
        }

        let tolerance = parse_tolerance(&lookup, "LOSS_CHECK_TOLERANCE", default.tolerance)?;
        let single_precision_tolerance =
            parse_tolerance(&lookup, "LOSS_CHECK_F32_TOLERANCE", default.single_precision_tolerance)?;

        let max_dim = parse_or(&lookup, "LOSS_CHECK_MAX_DIM", 100)?;
        let shape = TrialShape::random(max_dim).context("Invalid LOSS_CHECK_MAX_DIM")?;

        let cross_entropy_gradient_shape = match lookup("LOSS_CHECK_CE_GRADIENT_SHAPE") {
            Some(value) if value.trim().eq_ignore_ascii_case("random") => shape,
            Some(value) => value.parse().context("Invalid LOSS_CHECK_CE_GRADIENT_SHAPE")?,
            None => default.cross_entropy_gradient_shape,
        };

        Ok(Self {
            ntests,
            seed: parse_or(&lookup, "LOSS_CHECK_SEED", default.seed)?,
            tolerance,
            single_precision_tolerance,
            shape,
            cross_entropy_gradient_shape,
        })
    }
}
