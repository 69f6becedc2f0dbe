//! Sleep model inspection commands.

use std::path::PathBuf;

use clap::Subcommand;
use betterrest_core::error::Result;
use betterrest_core::{Config, ModelSource};

#[derive(Subcommand)]
pub enum ModelAction {
    /// Show model metadata
    Info {
        /// Model artifact to inspect (defaults to the configured model)
        #[arg(long)]
        model: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a model artifact
    Check {
        /// Model artifact to validate (defaults to the configured model)
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

pub fn run(action: ModelAction) -> Result<()> {
    match action {
        ModelAction::Info { model, json } => show_info(resolve_source(model), json),
        ModelAction::Check { model } => {
            resolve_source(model).load()?;
            println!("ok");
            Ok(())
        }
    }
}

fn resolve_source(path: Option<PathBuf>) -> ModelSource {
    match path {
        Some(path) => ModelSource::File(path),
        None => Config::load_or_default().model_source(),
    }
}

fn show_info(source: ModelSource, json: bool) -> Result<()> {
    let model = source.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    let origin = match &source {
        ModelSource::Bundled => "bundled".to_string(),
        ModelSource::File(path) => path.display().to_string(),
    };

    println!("Model:   {} {}", model.name, model.version);
    println!("Source:  {origin}");
    if !model.description.is_empty() {
        println!("About:   {}", model.description);
    }
    println!("Inputs:  {}", model.inputs.join(", "));
    println!("Output:  {}", model.output);
    Ok(())
}
