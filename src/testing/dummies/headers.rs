use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

fn nominal(name: &str, labels: &[&str]) -> AttributeRef {
    Arc::new(NominalAttribute::from_labels(
        name,
        labels.iter().map(|l| l.to_string()).collect(),
    ))
}

fn numeric(name: &str) -> AttributeRef {
    Arc::new(NumericAttribute::new(name.into()))
}

/// outlook{sunny,overcast,rainy}, temperature, humidity, windy{TRUE,FALSE},
/// play{yes,no}; class is `play`.
pub fn weather_header() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "weather".into(),
        vec![
            nominal("outlook", &["sunny", "overcast", "rainy"]),
            numeric("temperature"),
            numeric("humidity"),
            nominal("windy", &["TRUE", "FALSE"]),
            nominal("play", &["yes", "no"]),
        ],
        4,
    ))
}

/// All-nominal variant of the weather header.
pub fn weather_nominal_header() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "weather.symbolic".into(),
        vec![
            nominal("outlook", &["sunny", "overcast", "rainy"]),
            nominal("temperature", &["hot", "mild", "cool"]),
            nominal("humidity", &["high", "normal"]),
            nominal("windy", &["TRUE", "FALSE"]),
            nominal("play", &["yes", "no"]),
        ],
        4,
    ))
}

/// A{x,y}, B{p,q}, class{0,1}.
pub fn two_nominal_header() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "two-nominal".into(),
        vec![
            nominal("A", &["x", "y"]),
            nominal("B", &["p", "q"]),
            nominal("class", &["0", "1"]),
        ],
        2,
    ))
}

/// X numeric, class{0,1}.
pub fn one_numeric_header() -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::new(
        "one-numeric".into(),
        vec![numeric("X"), nominal("class", &["0", "1"])],
        1,
    ))
}
