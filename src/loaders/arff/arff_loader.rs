use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instances::DenseInstance;
use crate::loaders::arff::parser::{
    is_comment_or_empty, parse_header, parse_instance_values, split_instance_weight,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reads a whole ARFF file into a [`Dataset`].
///
/// Malformed data rows are reported on stderr and skipped, unless the loader
/// is strict, in which case the first one aborts the load.
#[derive(Debug, Clone)]
pub struct ArffLoader {
    path: PathBuf,
    class_index: Option<usize>,
    strict: bool,
}

impl ArffLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            class_index: None,
            strict: false,
        }
    }

    /// Zero-based class attribute; `None` (the default) means the last one.
    pub fn with_class_index(mut self, class_index: Option<usize>) -> Self {
        self.class_index = class_index;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Dataset, TreeError> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        read_arff(&mut reader, self.class_index, self.strict)
    }
}

/// Shorthand for a lenient [`ArffLoader`].
pub fn load_arff(path: impl AsRef<Path>, class_index: Option<usize>) -> Result<Dataset, TreeError> {
    ArffLoader::new(path.as_ref())
        .with_class_index(class_index)
        .load()
}

pub fn read_arff<R: BufRead>(
    reader: &mut R,
    class_index: Option<usize>,
    strict: bool,
) -> Result<Dataset, TreeError> {
    let header = parse_header(reader, class_index)?;
    header.validate()?;
    let header = Arc::new(header);

    let mut dataset = Dataset::new(Arc::clone(&header));
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if is_comment_or_empty(&line) {
            continue;
        }

        let row = line.trim();
        let parsed = split_instance_weight(row).and_then(|(values, weight)| {
            parse_instance_values(&header, values).map(|values| (values, weight))
        });
        match parsed {
            Ok((values, weight)) => {
                dataset.push(DenseInstance::new(Arc::clone(&header), values, weight));
            }
            Err(e) if strict => return Err(e.into()),
            Err(e) => eprintln!("Invalid data found in line '{row}': {e}"),
        }
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{ErrorKind, Write};
    use tempfile::NamedTempFile;

    const WEATHER: &str = r#"% the classic weather data
@relation weather
@attribute outlook {sunny, overcast, rainy}
@attribute temperature numeric
@attribute humidity real
@attribute windy {TRUE, FALSE}
@attribute play {yes, no}

@data
sunny,85,85,FALSE,no
sunny,80,90,TRUE,no
% a comment between rows
overcast,83,86,FALSE,yes
rainy,70,96,FALSE,yes,{2.5}
?,75,?,TRUE,yes
"#;

    fn write_arff(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("tempfile");
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn loads_header_rows_weights_and_missing_values() {
        let tf = write_arff(WEATHER);
        let data = ArffLoader::new(tf.path()).load().unwrap();

        let h = data.header();
        assert_eq!(h.relation_name(), "weather");
        assert_eq!(h.number_of_attributes(), 5);
        assert_eq!(h.class_index(), 4);
        assert_eq!(data.len(), 5);

        assert_eq!(data.entries()[0].instance().values, vec![0.0, 85.0, 85.0, 1.0, 1.0]);
        assert_eq!(data.entries()[3].weight(), 2.5);
        assert!(data.entries()[4].is_missing(0));
        assert!(data.entries()[4].is_missing(2));
        assert!(data.validate().is_ok());
    }

    #[test]
    fn explicit_class_index_is_honoured() {
        let tf = write_arff(WEATHER);
        let data = load_arff(tf.path(), Some(3)).unwrap();
        assert_eq!(data.class_index(), 3);
        assert_eq!(data.number_of_classes(), 2);
    }

    #[test]
    fn numeric_class_is_rejected() {
        let tf = write_arff(WEATHER);
        let err = load_arff(tf.path(), Some(1)).unwrap_err();
        assert!(matches!(err, TreeError::InvalidDataset(_)));
    }

    #[test]
    fn class_index_out_of_range_is_rejected() {
        let tf = write_arff(WEATHER);
        let err = load_arff(tf.path(), Some(9)).unwrap_err();
        assert!(matches!(err, TreeError::InvalidDataset(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_arff("no/such/file.arff", None).unwrap_err();
        assert!(matches!(err, TreeError::Io(e) if e.kind() == ErrorKind::NotFound));
    }

    #[test]
    fn header_without_data_is_unexpected_eof() {
        let tf = write_arff("@relation r\n@attribute a {x}\n");
        let err = load_arff(tf.path(), None).unwrap_err();
        assert!(matches!(err, TreeError::Io(e) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[test]
    fn bad_rows_are_skipped_unless_strict() {
        let arff = "@relation r\n@attribute x numeric\n@attribute c {a,b}\n@data\n1,a\nabc,b\n2,b\n3\n";
        let tf = write_arff(arff);

        let lenient = load_arff(tf.path(), None).unwrap();
        assert_eq!(lenient.len(), 2);

        let strict = ArffLoader::new(tf.path()).strict(true).load().unwrap_err();
        assert!(matches!(strict, TreeError::Io(e) if e.kind() == ErrorKind::InvalidData));
    }
}
