//! sondeo - Survey Severity Pipeline CLI
//!
//! Usage:
//!   sondeo train --data survey.csv --out model.bin    # Train and persist the bundle
//!   sondeo predict --model model.bin [selections]     # Single-row inference
//!   sondeo options --model model.bin                  # List valid selection labels
//!   sondeo options --model model.bin --json           # Same, as JSON
//!   sondeo summary --data survey.csv                  # Dataset headline stats

use clap::{Parser, Subcommand};
use sondeo::bundle::ModelBundle;
use sondeo::dataset;
use sondeo::pipeline::{self, Selections};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// sondeo - train, inspect, and serve the survey severity model.
#[derive(Parser)]
#[command(name = "sondeo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the severity model and persist the inference bundle
    Train {
        /// Path to the survey responses CSV (Latin-1 compatible)
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Output path for the model bundle
        #[arg(long, value_name = "FILE", default_value = "severity_model.bin")]
        out: PathBuf,
    },

    /// Predict a severity score from one row of selections
    Predict {
        /// Path to the model bundle
        #[arg(long, value_name = "FILE", default_value = "severity_model.bin")]
        model: PathBuf,

        /// Age group label
        #[arg(long)]
        age: String,

        /// Education level label
        #[arg(long)]
        education: String,

        /// Employment status label
        #[arg(long)]
        employment: String,

        /// Gender label (must be one of the fitted labels)
        #[arg(long)]
        gender: String,

        /// Skill alignment label (must be one of the fitted labels)
        #[arg(long)]
        skill_alignment: String,

        /// Skill training label (must be one of the fitted labels)
        #[arg(long)]
        skill_training: String,

        /// Job-seeking status label (must be one of the fitted labels)
        #[arg(long)]
        job_seeking: String,
    },

    /// Print the selection labels a bundle accepts per field
    Options {
        /// Path to the model bundle
        #[arg(long, value_name = "FILE", default_value = "severity_model.bin")]
        model: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print headline statistics for a survey dataset
    Summary {
        /// Path to the survey responses CSV
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sondeo=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> sondeo::Result<ExitCode> {
    match command {
        Commands::Train { data, out } => cmd_train(&data, &out),
        Commands::Predict {
            model,
            age,
            education,
            employment,
            gender,
            skill_alignment,
            skill_training,
            job_seeking,
        } => {
            let selections = Selections {
                age_group: age,
                education_level: education,
                employment_status: employment,
                gender,
                skill_alignment,
                skill_training,
                job_seeking_status: job_seeking,
            };
            cmd_predict(&model, &selections)
        }
        Commands::Options { model, json } => cmd_options(&model, json),
        Commands::Summary { data } => cmd_summary(&data),
    }
}

fn cmd_train(data: &PathBuf, out: &PathBuf) -> sondeo::Result<ExitCode> {
    let trained = pipeline::train_from_csv(data)?;
    trained.bundle.save(out)?;

    let report = &trained.report;
    println!(
        "Trained {}-tree forest on {} records",
        trained.bundle.model.n_estimators(),
        report.n_records
    );
    println!("Training R²: {:.4}", report.r_squared);
    println!("Feature importances:");
    for (name, importance) in &report.feature_importances {
        println!("  {name:<22} {importance:.4}");
    }
    println!("Bundle written to {}", out.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_predict(model: &PathBuf, selections: &Selections) -> sondeo::Result<ExitCode> {
    // Missing assets disable prediction; they are not a crash.
    let Some(bundle) = ModelBundle::try_load(model) else {
        eprintln!(
            "Model assets not found at {}. Run `sondeo train` first.",
            model.display()
        );
        return Ok(ExitCode::from(2));
    };

    let score = pipeline::predict(&bundle, selections)?;
    println!("Predicted severity score: {score:.2}/5.0");
    Ok(ExitCode::SUCCESS)
}

fn cmd_options(model: &PathBuf, json: bool) -> sondeo::Result<ExitCode> {
    let Some(bundle) = ModelBundle::try_load(model) else {
        eprintln!(
            "Model assets not found at {}. Run `sondeo train` first.",
            model.display()
        );
        return Ok(ExitCode::from(2));
    };

    let options = bundle.selection_options();
    if json {
        let object: serde_json::Map<String, serde_json::Value> = options
            .into_iter()
            .map(|(field, labels)| (field, serde_json::json!(labels)))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&object)
                .map_err(|e| sondeo::SondeoError::Serialization(e.to_string()))?
        );
    } else {
        for (field, labels) in options {
            println!("{field}: {}", labels.join(", "));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_summary(data: &PathBuf) -> sondeo::Result<ExitCode> {
    let records = dataset::clean_records(dataset::load_csv(data)?);
    let summary = dataset::summarize(&records);

    println!("Total sample: {}", summary.n_records);
    println!(
        "Unemployment rate: {:.1}%",
        summary.unemployment_rate * 100.0
    );
    Ok(ExitCode::SUCCESS)
}
