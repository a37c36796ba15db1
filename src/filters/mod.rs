mod discretize;
mod resample;

pub use discretize::{EqualWidthBins, discretize};
pub use resample::resample;
