use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use text_classifier::logistic::SgdParams;
use text_classifier::{
    Dataset, ModelConfig, Pipeline, PipelineConfig, Report, Tokenizer, VectorizerConfig,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelKind {
    /// Multinomial naive Bayes
    Nb,
    /// Softmax logistic regression
    Logreg,
}

/// Trains a TF-IDF text classifier from a labelled CSV file.
#[derive(Debug, Parser)]
#[command(name = "train-classifier", version, about)]
struct Cli {
    /// Labelled CSV file
    #[arg(long)]
    data: PathBuf,

    /// Where to write the fitted pipeline (JSON)
    #[arg(long)]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = ModelKind::Nb)]
    model: ModelKind,

    #[arg(long, default_value = "text")]
    text_column: String,

    #[arg(long, default_value = "label")]
    label_column: String,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Laplace smoothing for naive Bayes
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// SGD passes for logistic regression
    #[arg(long, default_value_t = 30)]
    epochs: usize,

    #[arg(long, default_value_t = 0.5)]
    learning_rate: f64,

    #[arg(long, default_value_t = 1e-4)]
    l2: f64,

    /// Add word bigrams to the features
    #[arg(long)]
    bigrams: bool,

    #[arg(long, default_value_t = 1)]
    min_df: usize,

    #[arg(long)]
    max_features: Option<usize>,

    #[arg(long)]
    sublinear_tf: bool,

    /// Also write the evaluation report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        let model = match self.model {
            ModelKind::Nb => ModelConfig::NaiveBayes { alpha: self.alpha },
            ModelKind::Logreg => ModelConfig::Logistic(SgdParams {
                learning_rate: self.learning_rate,
                l2: self.l2,
                epochs: self.epochs,
                seed: self.seed,
            }),
        };

        PipelineConfig {
            tokenizer: Tokenizer::new(self.bigrams),
            vectorizer: VectorizerConfig {
                min_df: self.min_df,
                max_features: self.max_features,
                sublinear_tf: self.sublinear_tf,
            },
            model,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let dataset = Dataset::from_csv_path(&cli.data, &cli.text_column, &cli.label_column)
        .with_context(|| format!("Failed to load dataset {}", cli.data.display()))?;
    tracing::info!(
        rows = dataset.len(),
        classes = dataset.class_counts().len(),
        "Dataset loaded"
    );

    let (train, test) = dataset
        .split(cli.test_size, cli.seed)
        .context("Failed to split dataset")?;
    tracing::info!(train = train.len(), test = test.len(), "Dataset split");

    let pipeline = Pipeline::fit(cli.pipeline_config(), &train.texts, &train.labels)
        .context("Training failed")?;

    let predicted = pipeline.predict_labels(&test.texts);
    let report = Report::evaluate(pipeline.labels(), &test.labels, &predicted);
    println!("{}", report);

    pipeline
        .save(&cli.output)
        .with_context(|| format!("Failed to write pipeline to {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), accuracy = report.accuracy, "Pipeline saved");

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    Ok(())
}
