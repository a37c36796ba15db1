use crate::classifiers::Classifier;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::evaluation::Measurement;
use crate::utils::math::max_index;
use std::fmt;
use std::sync::Arc;

/// Weighted confusion matrix plus the statistics derived from it.
///
/// Rows are actual classes, columns predicted ones, both in class-attribute
/// order. Instances without a class value are not scored; they are only
/// counted in [`Evaluation::unknown_class`].
#[derive(Debug, Clone)]
pub struct Evaluation {
    header: Arc<InstanceHeader>,
    matrix: Vec<Vec<f64>>,
    unknown_class: usize,
}

impl Evaluation {
    pub fn new(header: Arc<InstanceHeader>) -> Self {
        let k = header.number_of_classes();
        Self {
            header,
            matrix: vec![vec![0.0; k]; k],
            unknown_class: 0,
        }
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn add_prediction(
        &mut self,
        actual: usize,
        predicted: usize,
        weight: f64,
    ) -> Result<(), TreeError> {
        let k = self.matrix.len();
        let cell = self
            .matrix
            .get_mut(actual)
            .and_then(|row| row.get_mut(predicted))
            .ok_or_else(|| {
                TreeError::InvalidDataset(format!(
                    "class pair ({actual}, {predicted}) outside {k} class labels"
                ))
            })?;
        *cell += weight;
        Ok(())
    }

    /// Classifies every entry of `dataset` with `classifier` and records the
    /// outcome under the entry's weight.
    pub fn evaluate_on<C: Classifier + ?Sized>(
        &mut self,
        classifier: &C,
        dataset: &Dataset,
    ) -> Result<(), TreeError> {
        for entry in dataset.iter() {
            let Some(actual) = entry.class_value() else {
                self.unknown_class += 1;
                continue;
            };
            let distribution = classifier.class_probabilities(&*entry.instance())?;
            self.add_prediction(actual, max_index(&distribution), entry.weight())?;
        }
        Ok(())
    }

    pub fn confusion_matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn unknown_class(&self) -> usize {
        self.unknown_class
    }

    pub fn total_weight(&self) -> f64 {
        self.matrix.iter().flatten().sum()
    }

    pub fn correct(&self) -> f64 {
        (0..self.matrix.len()).map(|c| self.matrix[c][c]).sum()
    }

    pub fn incorrect(&self) -> f64 {
        self.total_weight() - self.correct()
    }

    /// `NaN` before anything has been scored.
    pub fn accuracy(&self) -> f64 {
        self.correct() / self.total_weight()
    }

    pub fn error_rate(&self) -> f64 {
        self.incorrect() / self.total_weight()
    }

    /// Cohen's kappa. Zero when nothing has been scored, one when chance
    /// agreement is already perfect.
    pub fn kappa(&self) -> f64 {
        let total = self.total_weight();
        if total <= 0.0 {
            return 0.0;
        }

        let k = self.matrix.len();
        let mut chance = 0.0;
        for c in 0..k {
            let actual: f64 = self.matrix[c].iter().sum();
            let predicted: f64 = self.matrix.iter().map(|row| row[c]).sum();
            chance += (actual / total) * (predicted / total);
        }
        let observed = self.correct() / total;

        if chance < 1.0 {
            (observed - chance) / (1.0 - chance)
        } else {
            1.0
        }
    }

    pub fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.accuracy()),
            Measurement::new("error_rate", self.error_rate()),
            Measurement::new("kappa", self.kappa()),
            Measurement::new("correct", self.correct()),
            Measurement::new("incorrect", self.incorrect()),
            Measurement::new("total_weight", self.total_weight()),
        ]
    }

    pub fn matrix_string(&self) -> String {
        let k = self.matrix.len();
        let labels: Vec<String> = (0..k).map(column_label).collect();
        let cells: Vec<Vec<String>> = self
            .matrix
            .iter()
            .map(|row| row.iter().map(|&w| fmt_count(w)).collect())
            .collect();
        let width = cells
            .iter()
            .flatten()
            .chain(labels.iter())
            .map(String::len)
            .max()
            .unwrap_or(1);

        let mut out = String::from("=== Confusion Matrix ===\n\n");
        for label in &labels {
            out.push_str(&format!(" {label:>width$}"));
        }
        out.push_str("   <-- classified as\n");
        for (c, row) in cells.iter().enumerate() {
            for cell in row {
                out.push_str(&format!(" {cell:>width$}"));
            }
            out.push_str(&format!(
                " | {} = {}\n",
                labels[c],
                self.header.class_label(c)
            ));
        }
        out
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<36}{:>10}{:>14} %",
            "Correctly Classified Instances",
            fmt_count(self.correct()),
            fmt_pct(self.accuracy())
        )?;
        writeln!(
            f,
            "{:<36}{:>10}{:>14} %",
            "Incorrectly Classified Instances",
            fmt_count(self.incorrect()),
            fmt_pct(self.error_rate())
        )?;
        writeln!(f, "{:<36}{:>10.4}", "Kappa statistic", self.kappa())?;
        writeln!(
            f,
            "{:<36}{:>10}",
            "Total Number of Instances",
            fmt_count(self.total_weight())
        )?;
        if self.unknown_class > 0 {
            writeln!(
                f,
                "{:<36}{:>10}",
                "Ignored Class Unknown Instances", self.unknown_class
            )?;
        }
        Ok(())
    }
}

fn fmt_count(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{w:.0}")
    } else {
        format!("{w:.2}")
    }
}

fn fmt_pct(ratio: f64) -> String {
    if ratio.is_nan() {
        "NaN".into()
    } else {
        format!("{:.4}", ratio * 100.0)
    }
}

/// `a`..`z`, then `aa`, `ab`, ...
fn column_label(index: usize) -> String {
    let mut chars = Vec::new();
    let mut i = index;
    loop {
        chars.push((b'a' + (i % 26) as u8) as char);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    chars.iter().rev().collect()
}
