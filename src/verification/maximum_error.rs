/// Running maximum of the errors observed during a check. Once a NaN is recorded the result
/// stays NaN, so it can never pass a tolerance comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaximumError {
    value: f64,
}

impl MaximumError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, error: f64) {
        if error.is_nan() || error > self.value {
            self.value = error;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl FromIterator<f64> for MaximumError {
    fn from_iter<I: IntoIterator<Item=f64>>(iter: I) -> Self {
        let mut result = Self::new();
        iter.into_iter().for_each(|o| result.record(o));
        result
    }
}
