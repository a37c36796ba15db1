use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueHint};

use crate::classifiers::{TreeAlgorithm, TreeModel};
use crate::loaders::ArffLoader;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Decision-tree induction (C4.5 and ID3) over ARFF datasets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train a tree and print it together with its training-set evaluation
    Train(TrainArgs),
    /// Cross-validate, hold out a split and evaluate on the training set
    Evaluate(EvaluateArgs),
    /// Classify every instance of a file with a saved model
    Predict(PredictArgs),
    /// Resample and/or discretize a file
    Filter(FilterArgs),
}

#[derive(Debug, Args)]
pub struct DataArgs {
    /// ARFF file to read
    #[arg(long, short, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// 1-based index of the class attribute (defaults to the last one)
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub class_index: Option<u64>,

    /// Abort on the first malformed data row instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

impl DataArgs {
    /// Zero-based class index, `None` meaning the last attribute.
    pub fn class_index(&self) -> Option<usize> {
        self.class_index.map(|n| (n - 1) as usize)
    }

    pub fn loader(&self) -> ArffLoader {
        ArffLoader::new(&self.input)
            .with_class_index(self.class_index())
            .strict(self.strict)
    }
}

#[derive(Debug, Args)]
pub struct LearnerArgs {
    /// Tree learner (c45, j48, id3)
    #[arg(
        long,
        short,
        default_value = "c45",
        value_name = "ALGORITHM",
        value_parser = parse_algorithm,
    )]
    pub algorithm: TreeAlgorithm,

    /// Keep the unpruned tree (C4.5 only)
    #[arg(long)]
    pub no_prune: bool,
}

impl LearnerArgs {
    pub fn prune(&self) -> bool {
        !self.no_prune
    }

    pub fn build(&self) -> TreeModel {
        TreeModel::new(self.algorithm, self.prune())
    }
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub learner: LearnerArgs,

    /// Write the trained model as JSON
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub save: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub learner: LearnerArgs,

    /// Number of cross-validation folds
    #[arg(
        long,
        default_value_t = 10,
        value_name = "K",
        value_parser = clap::value_parser!(u64).range(2..),
    )]
    pub folds: u64,

    /// Percentage of the file (in order) used for training in the hold-out run
    #[arg(long, default_value_t = 80.0, value_name = "P", value_parser = parse_percent)]
    pub split_percent: f64,

    /// Seed for the fold shuffle
    #[arg(long, default_value_t = 1, value_name = "S")]
    pub seed: u64,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Model written by `train --save`
    #[arg(long, short, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub model: PathBuf,

    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// ARFF file to write
    #[arg(long, short, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Bootstrap sample size as a percentage of the input (bare flag: 100)
    #[arg(
        long,
        value_name = "PERCENT",
        num_args = 0..=1,
        default_missing_value = "100",
    )]
    pub resample_percent: Option<f64>,

    /// Seed for resampling
    #[arg(long, default_value_t = 1, value_name = "S")]
    pub seed: u64,

    /// Equal-width bins for every numeric attribute (bare flag: 10)
    #[arg(
        long,
        value_name = "B",
        num_args = 0..=1,
        default_missing_value = "10",
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub discretize_bins: Option<u64>,
}

fn parse_algorithm(raw: &str) -> Result<TreeAlgorithm, String> {
    parse_kind::<TreeAlgorithm>(raw).map_err(|e| e.to_string())
}

fn parse_percent(raw: &str) -> Result<f64, String> {
    let p: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if p > 0.0 && p < 100.0 {
        Ok(p)
    } else {
        Err(format!("{p} is not strictly between 0 and 100"))
    }
}

fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let candidates = candidate_spellings(raw);
    for cand in candidates {
        if let Ok(parsed) = cand.parse::<T>() {
            return Ok(parsed);
        }
    }
    Err(anyhow!("could not parse value '{raw}'"))
}

fn candidate_spellings(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return out;
    }

    out.push(trimmed.to_string());
    out.push(trimmed.to_lowercase());
    out.push(kebab_from_token(trimmed));
    out.push(trimmed.replace('_', "-"));
    // "C4.5"
    out.push(trimmed.replace('.', "").to_lowercase());
    out.sort();
    out.dedup();
    out
}

fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            for low in ch.to_lowercase() {
                buf.push(low);
            }
            prev_lower = false;
        } else if ch == '_' {
            buf.push('-');
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase();
        }
    }
    if buf.is_empty() {
        token.to_lowercase()
    } else {
        buf
    }
}
