/// A named scalar reported by an [`Evaluation`](crate::evaluation::Evaluation).
///
/// Names in use: `"accuracy"`, `"error_rate"`, `"kappa"`, `"correct"`,
/// `"incorrect"`, `"total_weight"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
