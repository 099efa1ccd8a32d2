use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use log::{debug, info};
use titan_core::{LearnError, LearnResult, Matrix, Vector};
use titan_io::{Dataset, ModelSnapshot};
use titan_linear::{Classifier, LogisticRegression, TrainerConfig};
use titan_metrics::{ClassificationReport, ModelReport};
use titan_preprocessing::{train_test_split, MinMaxScaler, Scaler};
use titan_stats::DataSummary;

const PREVIEW_ROWS: usize = 5;
const SHOWN_PREDICTIONS: usize = 10;

const USAGE: &str = "\
usage: titan <data.csv> [options]

options:
  --lr F                learning rate (default 0.01)
  --epochs N            training epochs (default 1000)
  --config FILE.json    trainer config; --lr and --epochs override it
  --test-ratio F        hold out this fraction of rows for evaluation (default 0)
  --seed N              shuffle seed for the hold-out split
  --save-model FILE     write the trained model as JSON
  --help                print this message";

#[derive(Debug, Default, PartialEq)]
struct Args {
    data: PathBuf,
    learning_rate: Option<f64>,
    epochs: Option<usize>,
    config: Option<PathBuf>,
    test_ratio: f64,
    seed: Option<u64>,
    save_model: Option<PathBuf>,
    help: bool,
}

fn value<I: Iterator<Item = String>>(it: &mut I, flag: &str) -> Result<String, String> {
    it.next().ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid value for {flag}: {raw}"))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut data = None;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--lr" => parsed.learning_rate = Some(parse_number(&value(&mut it, &arg)?, &arg)?),
            "--epochs" => parsed.epochs = Some(parse_number(&value(&mut it, &arg)?, &arg)?),
            "--test-ratio" => parsed.test_ratio = parse_number(&value(&mut it, &arg)?, &arg)?,
            "--seed" => parsed.seed = Some(parse_number(&value(&mut it, &arg)?, &arg)?),
            "--config" => parsed.config = Some(PathBuf::from(value(&mut it, &arg)?)),
            "--save-model" => parsed.save_model = Some(PathBuf::from(value(&mut it, &arg)?)),
            "--help" | "-h" => parsed.help = true,
            other if other.starts_with("--") => return Err(format!("unknown option: {other}")),
            other => {
                if data.is_some() {
                    return Err(format!("unexpected argument: {other}"));
                }
                data = Some(PathBuf::from(other));
            }
        }
    }

    if parsed.help {
        return Ok(parsed);
    }
    parsed.data = data.ok_or("missing path to the CSV data file")?;
    Ok(parsed)
}

fn trainer_config(args: &Args) -> Result<TrainerConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => TrainerConfig::default(),
    };
    if let Some(lr) = args.learning_rate {
        config.learning_rate = lr;
    }
    if let Some(epochs) = args.epochs {
        config.epochs = epochs;
    }
    Ok(config)
}

fn print_predictions(predictions: &Vector, actual: &Vector) {
    println!("========== PREDICTIONS (first {SHOWN_PREDICTIONS}) ==========");
    for (i, (p, a)) in predictions
        .iter()
        .zip(actual.iter())
        .take(SHOWN_PREDICTIONS)
        .enumerate()
    {
        println!("Sample {}: predicted {}, actual {}", i + 1, p, a);
    }
}

/// Scaled training rows and the rows the model is evaluated on.
struct Prepared {
    scaler: MinMaxScaler,
    x_train: Matrix,
    y_train: Vector,
    x_eval: Matrix,
    y_eval: Vector,
}

/// Split off a hold-out set when `test_ratio` is non-zero, then fit the
/// scaler on the training rows only. With a zero ratio every row is used for
/// both training and evaluation.
fn prepare(x: &Matrix, y: &Vector, test_ratio: f64, seed: Option<u64>) -> LearnResult<Prepared> {
    let mut scaler = MinMaxScaler::new();
    if test_ratio == 0.0 {
        let x_scaled = scaler.fit_transform(x)?;
        return Ok(Prepared {
            scaler,
            x_train: x_scaled.clone(),
            y_train: y.clone(),
            x_eval: x_scaled,
            y_eval: y.clone(),
        });
    }

    let split = train_test_split(x, y, test_ratio, seed)?;
    if split.x_train.rows() == 0 {
        return Err(LearnError::InvalidHyperparameter(format!(
            "test_ratio {} leaves no rows for training",
            test_ratio
        )));
    }
    info!(
        "holding out {} of {} rows for evaluation",
        split.x_test.rows(),
        x.rows()
    );
    let x_train = scaler.fit_transform(&split.x_train)?;
    let x_eval = scaler.transform(&split.x_test)?;
    Ok(Prepared {
        scaler,
        x_train,
        y_train: split.y_train,
        x_eval,
        y_eval: split.y_test,
    })
}

fn fit_and_predict(
    model: &mut dyn Classifier,
    x_train: &Matrix,
    y_train: &Vector,
    x_eval: &Matrix,
) -> Result<Vector, Box<dyn Error>> {
    model.train(x_train, y_train)?;
    info!("{} trained on {} rows", model.name(), x_train.rows());
    Ok(model.predict(x_eval)?)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = trainer_config(args)?;
    let mut model = LogisticRegression::from_config(&config)?;

    let dataset = Dataset::from_csv(&args.data)?;
    println!(
        "Dataset: {} samples, {} features ({})",
        dataset.n_samples(),
        dataset.n_features(),
        dataset.feature_names().join(", ")
    );
    println!();
    println!("First {PREVIEW_ROWS} rows:");
    print!("{}", dataset.head(PREVIEW_ROWS)?);
    println!();

    println!("{}", DataSummary::from_matrix(dataset.features())?);
    println!();

    let (x, y) = dataset.into_parts();
    let prepared = prepare(&x, &y, args.test_ratio, args.seed)?;
    debug!(
        "feature ranges: min={:?} max={:?}",
        prepared.scaler.min_values().map(Vector::as_slice),
        prepared.scaler.max_values().map(Vector::as_slice)
    );
    let Prepared {
        x_train,
        y_train,
        x_eval,
        y_eval,
        ..
    } = prepared;

    let predictions = fit_and_predict(&mut model, &x_train, &y_train, &x_eval)?;

    print_predictions(&predictions, &y_eval);
    println!();
    let report = ClassificationReport::new(&predictions, &y_eval)?;
    println!("{report}");
    println!();
    println!("{}", report.confusion);
    println!();
    println!("{}", ModelReport::of(&model));

    if let Some(path) = &args.save_model {
        ModelSnapshot::from_model(&model)?.save(path)?;
        println!();
        println!("Model saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };
    if args.help {
        println!("{USAGE}");
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
