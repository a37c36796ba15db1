use crate::core::TreeError;
use crate::core::dataset::Dataset;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `dataset` in ARFF form. Non-unit weights are appended as `{w}`.
pub fn write_arff<W: Write>(writer: &mut W, dataset: &Dataset) -> Result<(), TreeError> {
    let header = dataset.header();
    write!(writer, "{}", header.arff_header())?;
    writeln!(writer)?;
    writeln!(writer, "@data")?;

    for entry in dataset.iter() {
        let instance = entry.instance();
        let row = header
            .attributes
            .iter()
            .enumerate()
            .map(|(i, attr)| attr.format_value(instance.values.get(i).copied().unwrap_or(f64::NAN)))
            .collect::<Vec<_>>()
            .join(",");
        if entry.weight() == 1.0 {
            writeln!(writer, "{row}")?;
        } else {
            writeln!(writer, "{row},{{{}}}", entry.weight())?;
        }
    }
    Ok(())
}

pub fn save_arff(path: impl AsRef<Path>, dataset: &Dataset) -> Result<(), TreeError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_arff(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}
