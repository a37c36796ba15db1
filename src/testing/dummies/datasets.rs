use crate::core::dataset::Dataset;
use crate::testing::dummies::headers::{
    one_numeric_header, two_nominal_header, weather_header, weather_nominal_header,
};

const SUNNY: f64 = 0.0;
const OVERCAST: f64 = 1.0;
const RAINY: f64 = 2.0;
const TRUE: f64 = 0.0;
const FALSE: f64 = 1.0;
const YES: f64 = 0.0;
const NO: f64 = 1.0;

/// The classic 14-row weather data with numeric temperature and humidity.
pub fn weather_dataset() -> Dataset {
    Dataset::from_rows(
        weather_header(),
        vec![
            vec![SUNNY, 85.0, 85.0, FALSE, NO],
            vec![SUNNY, 80.0, 90.0, TRUE, NO],
            vec![OVERCAST, 83.0, 86.0, FALSE, YES],
            vec![RAINY, 70.0, 96.0, FALSE, YES],
            vec![RAINY, 68.0, 80.0, FALSE, YES],
            vec![RAINY, 65.0, 70.0, TRUE, NO],
            vec![OVERCAST, 64.0, 65.0, TRUE, YES],
            vec![SUNNY, 72.0, 95.0, FALSE, NO],
            vec![SUNNY, 69.0, 70.0, FALSE, YES],
            vec![RAINY, 75.0, 80.0, FALSE, YES],
            vec![SUNNY, 75.0, 70.0, TRUE, YES],
            vec![OVERCAST, 72.0, 90.0, TRUE, YES],
            vec![OVERCAST, 81.0, 75.0, FALSE, YES],
            vec![RAINY, 71.0, 91.0, TRUE, NO],
        ],
    )
}

/// The classic 14-row all-nominal weather data.
pub fn weather_nominal_dataset() -> Dataset {
    const HOT: f64 = 0.0;
    const MILD: f64 = 1.0;
    const COOL: f64 = 2.0;
    const HIGH: f64 = 0.0;
    const NORMAL: f64 = 1.0;

    Dataset::from_rows(
        weather_nominal_header(),
        vec![
            vec![SUNNY, HOT, HIGH, FALSE, NO],
            vec![SUNNY, HOT, HIGH, TRUE, NO],
            vec![OVERCAST, HOT, HIGH, FALSE, YES],
            vec![RAINY, MILD, HIGH, FALSE, YES],
            vec![RAINY, COOL, NORMAL, FALSE, YES],
            vec![RAINY, COOL, NORMAL, TRUE, NO],
            vec![OVERCAST, COOL, NORMAL, TRUE, YES],
            vec![SUNNY, MILD, HIGH, FALSE, NO],
            vec![SUNNY, COOL, NORMAL, FALSE, YES],
            vec![RAINY, MILD, NORMAL, FALSE, YES],
            vec![SUNNY, MILD, NORMAL, TRUE, YES],
            vec![OVERCAST, MILD, HIGH, TRUE, YES],
            vec![OVERCAST, HOT, NORMAL, FALSE, YES],
            vec![RAINY, MILD, HIGH, TRUE, NO],
        ],
    )
}

/// Four rows where `A` alone determines the class.
pub fn a_predicts_class_dataset() -> Dataset {
    Dataset::from_rows(
        two_nominal_header(),
        vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ],
    )
}

/// Four rows that all carry class `1`.
pub fn single_class_dataset() -> Dataset {
    Dataset::from_rows(
        two_nominal_header(),
        vec![
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ],
    )
}

/// X = [1, 2, 3, 4] with classes [0, 0, 1, 1].
pub fn numeric_boundary_dataset() -> Dataset {
    Dataset::from_rows(
        one_numeric_header(),
        vec![
            vec![1.0, 0.0],
            vec![2.0, 0.0],
            vec![3.0, 1.0],
            vec![4.0, 1.0],
        ],
    )
}
