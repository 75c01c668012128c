use anyhow::Result;
use network::{
    output_paths, render_report, render_summary, write_connections_csv, write_network_html,
    CertaintyClassifier, Pipeline,
};
use std::path::Path;
use tracing::info;

use crate::cli::CommonOptions;
use crate::config::AppConfig;

fn build_pipeline(config: &AppConfig, options: &CommonOptions) -> Result<Pipeline> {
    let mut recognizer_config = config.recognizer.clone();
    if let Some(kind) = options.recognizer {
        recognizer_config.kind = kind.into();
    }

    info!(
        recognizer = ?recognizer_config.kind,
        offline = options.offline,
        "Building pipeline"
    );

    let recognizer = extract::build_recognizer(&recognizer_config)?;
    let verifier = geocode::build_verifier(&config.geocoder, options.offline)?;
    let classifier = CertaintyClassifier::new(config.vocabulary.clone(), verifier);

    Ok(Pipeline::new(recognizer, classifier, config.merge_policy))
}

pub async fn graph(input: &Path, options: &CommonOptions) -> Result<()> {
    let config = AppConfig::load(options.config.as_deref())?;
    let pipeline = build_pipeline(&config, options)?;

    let document = ingest::ingest_file(input).await?;
    let analysis = pipeline.analyze(&document).await?;

    let paths = output_paths(input);
    let title = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    write_network_html(&paths.html, &analysis, &config.palette, &title, &document.doc_id)?;
    write_connections_csv(&paths.csv, &analysis.connections)?;

    println!("\nNetwork visualization saved to: {}", paths.html.display());
    println!("Connections summary saved to: {}", paths.csv.display());
    print!("{}", render_summary(&analysis.entities));

    Ok(())
}

pub async fn report(input: &Path, places_only: bool, options: &CommonOptions) -> Result<()> {
    let config = AppConfig::load(options.config.as_deref())?;
    let mut pipeline = build_pipeline(&config, options)?;
    if places_only {
        pipeline = pipeline.places_only();
    }

    let document = ingest::ingest_file(input).await?;
    let analysis = pipeline.analyze(&document).await?;

    print!("{}", render_report(&analysis.mentions));

    Ok(())
}
