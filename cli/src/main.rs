//! `iaa`: compares two annotations of the same text, where markables are delimited by brackets.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use rusiaa::{agreement_report, Annotation, AgreementConfig, AgreementConfigBuilder, Brackets, Metric};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "iaa", version, about = "Inter-annotator agreement of two annotated texts")]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
#[command(group(ArgGroup::new("metric").required(true).multiple(true).args(["naive", "ngram", "levenshtein"])))]
struct Args {
    /// Two annotated texts
    #[arg(short, long, num_args = 2, value_names = ["TEXT1", "TEXT2"])]
    text: Option<Vec<String>>,
    /// Two files holding the annotated texts
    #[arg(short, long, num_args = 2, value_names = ["FILE1", "FILE2"])]
    file: Option<Vec<PathBuf>>,
    /// Naive accuracy over annotated and unannotated tokens
    #[arg(long)]
    naive: bool,
    /// Mean ngreement of the markable boundaries
    #[arg(long)]
    ngram: bool,
    /// Group alignment (Levenshtein) distance of the markables
    #[arg(long)]
    levenshtein: bool,
    /// Opening bracket of a markable
    #[arg(long, default_value = "[")]
    opening: String,
    /// Closing bracket of a markable
    #[arg(long, default_value = "]")]
    closing: String,
    /// Exponent rewarding longer matching spans in the ngreement
    #[arg(short = 'n', long, default_value_t = rusiaa::DEFAULT_EXPONENT)]
    exponent: f64,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Log more and list the markables of both annotations
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> AgreementConfig {
        let selected = [
            (self.naive, Metric::Naive),
            (self.ngram, Metric::NGreement),
            (self.levenshtein, Metric::Levenshtein),
        ];
        AgreementConfigBuilder::new()
            .opening(self.opening.as_str())
            .closing(self.closing.as_str())
            .exponent(self.exponent)
            .metrics(selected.into_iter().filter(|(on, _)| *on).map(|(_, m)| m))
            .build()
    }

    fn texts(&self) -> Result<(String, String)> {
        match (&self.text, &self.file) {
            (Some(texts), _) => match texts.as_slice() {
                [first, second] => Ok((first.clone(), second.clone())),
                _ => anyhow::bail!("Expected exactly two texts"),
            },
            (None, Some(files)) => match files.as_slice() {
                [first, second] => Ok((read(first)?, read(second)?)),
                _ => anyhow::bail!("Expected exactly two files"),
            },
            (None, None) => anyhow::bail!("Either --text or --file is required"),
        }
    }
}

fn read(path: &PathBuf) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Log directives used when `RUST_LOG` is not set, for the library and for this binary.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "rusiaa=debug,iaa=info"
    } else {
        "rusiaa=warn,iaa=warn"
    }
}

fn list_markables(label: &str, text: &str, brackets: &Brackets) -> Result<()> {
    let annotation = Annotation::extract(text, brackets.clone())
        .with_context(|| format!("Failed to extract the markables of the {label} text"))?;
    println!("Markables of the {} text:", label);
    for markable in annotation.markables() {
        println!("  {}", markable);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(args.verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.config();
    info!("Comparing annotations with {}", config);
    let (first, second) = args.texts()?;
    if args.verbose {
        list_markables("first", &first, config.brackets())?;
        list_markables("second", &second, config.brackets())?;
    }
    let report = agreement_report(&first, &second, &config)
        .context("Failed to compare the annotations")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
