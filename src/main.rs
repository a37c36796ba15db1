use anyhow::{Context, Result};
use clap::Parser;
use cpu_time::ThreadTime;

use arbor::classifiers::{Classifier, TreeModel, load_model, save_model};
use arbor::core::dataset::Dataset;
use arbor::evaluation::{Evaluation, cross_validate, evaluate_model, percentage_split};
use arbor::filters::{discretize, resample};
use arbor::loaders::save_arff;
use arbor::utils::math::max_index;
use arbor::ui::cli::args::{
    Cli, Command, DataArgs, EvaluateArgs, FilterArgs, PredictArgs, TrainArgs,
};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Train(args) => run_train(args),
        Command::Evaluate(args) => run_evaluate(args),
        Command::Predict(args) => run_predict(args),
        Command::Filter(args) => run_filter(args),
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    let mut model = args.learner.build();
    print_header(
        "Train",
        &format!(
            "algorithm={}  criterion={}  prune={}  input={}",
            args.learner.algorithm,
            model.split_criterion(),
            args.learner.prune(),
            args.data.input.display()
        ),
    );

    let dataset = load(&args.data)?;

    let started = ThreadTime::now();
    model.train(&dataset).context("failed to train model")?;
    let elapsed = started.elapsed();

    println!("{model}");
    println!(
        "{DIM}Time taken to build model: {:.3} seconds{RESET}",
        elapsed.as_secs_f64()
    );

    let evaluation =
        evaluate_model(&model, &dataset).context("failed to evaluate on training set")?;
    print_evaluation("Evaluation on training set", &evaluation);

    if let Some(path) = args.save {
        save_model(&path, &model, dataset.header())
            .with_context(|| format!("failed to save model to {}", path.display()))?;
        println!("{FG_GREEN}Model saved to {}{RESET}", path.display());
    }

    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let folds = args.folds as usize;
    print_header(
        "Evaluate",
        &format!(
            "algorithm={}  criterion={}  prune={}  folds={}  split={}%  seed={}  input={}",
            args.learner.algorithm,
            args.learner.build().split_criterion(),
            args.learner.prune(),
            folds,
            args.split_percent,
            args.seed,
            args.data.input.display()
        ),
    );

    let dataset = load(&args.data)?;
    let factory = || args.learner.build();

    let cv = cross_validate(factory, &dataset, folds, args.seed)
        .context("cross-validation failed")?;
    print_evaluation(&format!("{folds}-fold cross-validation"), &cv);

    let split = percentage_split(factory, &dataset, args.split_percent)
        .context("percentage split failed")?;
    print_evaluation(
        &format!("Percentage split ({}% train)", args.split_percent),
        &split,
    );

    let training = dataset.deep_copy();
    let mut model = args.learner.build();
    let started = ThreadTime::now();
    model.train(&training).context("failed to train model")?;
    let elapsed = started.elapsed();
    println!("{model}");
    println!(
        "{DIM}Time taken to build model: {:.3} seconds{RESET}",
        elapsed.as_secs_f64()
    );

    let evaluation =
        evaluate_model(&model, &training).context("failed to evaluate on training set")?;
    print_evaluation("Evaluation on training set", &evaluation);

    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    print_header(
        "Predict",
        &format!(
            "model={}  input={}",
            args.model.display(),
            args.data.input.display()
        ),
    );

    let saved = load_model(&args.model)
        .with_context(|| format!("failed to load model from {}", args.model.display()))?;
    let dataset = load(&args.data)?;
    saved
        .check_compatible(dataset.header())
        .context("model and dataset are incompatible")?;

    print_predictions(&saved.model, &dataset)
}

fn run_filter(args: FilterArgs) -> Result<()> {
    print_header(
        "Filter",
        &format!(
            "input={}  output={}",
            args.data.input.display(),
            args.output.display()
        ),
    );

    let mut dataset = load(&args.data)?;
    let n_in = dataset.len();

    if let Some(percent) = args.resample_percent {
        dataset = resample(&dataset, percent, args.seed).context("resample failed")?;
        println!("{DIM}resampled {percent}% with seed {}{RESET}", args.seed);
    }
    if let Some(bins) = args.discretize_bins {
        dataset = discretize(&dataset, bins as usize).context("discretize failed")?;
        println!("{DIM}discretized numeric attributes into {bins} bins{RESET}");
    }

    save_arff(&args.output, &dataset)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "{FG_GREEN}{n_in} instances read, {} written to {}{RESET}",
        dataset.len(),
        args.output.display()
    );
    Ok(())
}

fn load(data: &DataArgs) -> Result<Dataset> {
    data.loader()
        .load()
        .with_context(|| format!("failed to load {}", data.input.display()))
}

fn print_predictions(model: &TreeModel, dataset: &Dataset) -> Result<()> {
    let header = dataset.header();
    println!(
        "{BOLD}{:>6}  {:>14}  {:>14}  distribution{RESET}",
        "inst#", "actual", "predicted"
    );
    for (i, entry) in dataset.iter().enumerate() {
        let instance = entry.instance();
        let distribution = model
            .class_probabilities(&*instance)
            .with_context(|| format!("failed to classify instance #{}", i + 1))?;
        let predicted = max_index(&distribution);
        let actual = entry
            .class_value()
            .map_or_else(|| "?".to_string(), |c| header.class_label(c));
        let shown = distribution
            .iter()
            .map(|p| format!("{p:.3}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:>6}  {:>14}  {:>14}  {DIM}{shown}{RESET}",
            i + 1,
            actual,
            header.class_label(predicted)
        );
    }
    Ok(())
}

fn print_evaluation(title: &str, evaluation: &Evaluation) {
    println!();
    println!("{BOLD}{FG_GREEN}=== {title} ==={RESET}");
    println!();
    print!("{evaluation}");
    println!();
    print!("{}", evaluation.matrix_string());
}

fn print_header(title: &str, details: &str) {
    println!("{BOLD}{FG_CYAN}▶ {title}{RESET}");
    println!("{DIM}{details}{RESET}  {}", timestamp_now());
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );
    println!();
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
