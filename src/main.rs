use anyhow::Result;
use rank_applications::backend::BackendClient;
use rank_applications::extract::HttpDocumentReader;
use rank_applications::hardship::{
    HardshipScorer, HttpGenerativeModel, HttpTranslator, LexiconScorer, ModelScorer, NoTranslator,
};
use rank_applications::lexicon::Lexicon;
use rank_applications::{pipeline, storage};
use tracing::{info, warn};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_telemetry();

    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());

    let backend = BackendClient::from_env()?;
    let reader = HttpDocumentReader::from_env()?;
    let scorer = build_scorer(&root)?;

    let ranked = pipeline::run_batch(&backend, &reader, scorer.as_ref());

    if ranked.is_empty() {
        info!("No applications to rank.");
        return Ok(());
    }

    // a failed local save should not keep the records from reaching the store
    if let Err(e) = storage::save_results(&root, &ranked) {
        warn!("Could not save local results: {:#}", e);
    }
    backend.push_rankings(&ranked);

    info!("Ranked {} applications", ranked.len());
    Ok(())
}

/// Hardship scorer selection: HARDSHIP_MODE=model switches to the
/// generative-model rubric; the default is the lexicon scorer, translating
/// only when TRANSLATE_URL is configured.
fn build_scorer(root: &str) -> Result<Box<dyn HardshipScorer>> {
    if std::env::var("HARDSHIP_MODE").as_deref() == Ok("model") {
        let model = HttpGenerativeModel::from_env()?;
        return Ok(Box::new(ModelScorer::new(model)));
    }

    let lexicon = Lexicon::load(root)?;

    match std::env::var("TRANSLATE_URL") {
        Ok(endpoint) => Ok(Box::new(LexiconScorer::new(
            lexicon,
            HttpTranslator::new(endpoint)?,
        ))),
        Err(_) => Ok(Box::new(LexiconScorer::new(lexicon, NoTranslator))),
    }
}

fn init_telemetry() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
