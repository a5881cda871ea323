//! Command-line interface for The Daily Distill pipeline.
//!
//! Wires the JSON artifact store, the SQLite subscriber store, and the
//! Anthropic backend into the orchestrator. Ingestion itself stays
//! outside: `run` expects a staged `news_feed.json` in the data
//! directory.

use std::sync::Arc;
use std::time::Duration;

use anthropic_client::models;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use curation::{
    AnthropicInference, ClassifierConfig, InferenceCredentials, JsonArtifactStore, Orchestrator,
    PipelineConfig, SqliteSubscriberStore, SubscriberProfile, SubscriberStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "distill")]
#[command(about = "LLM-driven news curation for The Daily Distill")]
struct Cli {
    /// Data directory for feed and corpus artifacts (default: DISTILL_DATA_DIR or .)
    #[arg(long)]
    data_dir: Option<String>,

    /// SQLite URL for the subscriber database (default: DISTILL_DB)
    #[arg(long)]
    db: Option<String>,

    /// Model id for inference (default: ANTHROPIC_MODEL or claude-haiku-4-5)
    #[arg(long)]
    model: Option<String>,

    /// Items per classifier batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// Cap on items accepted per run
    #[arg(long)]
    max_items: Option<usize>,

    /// Pause between pipeline stages, in milliseconds
    #[arg(long)]
    settle_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feed pipeline over the staged raw feed
    Run,

    /// Create or update a subscriber
    Subscribe {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        preferences: String,
    },

    /// Generate and store a digest for a subscriber
    Digest {
        #[arg(long)]
        email: String,
    },

    /// Show a stored subscriber and their digest
    Show {
        #[arg(long)]
        email: String,
    },
}

/// CLI flag, then environment variable, then default.
fn resolve(flag: Option<String>, var: &str, default: &str) -> String {
    flag.or_else(|| std::env::var(var).ok())
        .unwrap_or_else(|| default.to_string())
}

struct Settings {
    data_dir: String,
    db: String,
    model: String,
    batch_size: Option<usize>,
    max_items: Option<usize>,
    settle_ms: Option<u64>,
}

impl Settings {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: resolve(cli.data_dir.clone(), "DISTILL_DATA_DIR", "."),
            db: resolve(cli.db.clone(), "DISTILL_DB", "sqlite:subscribers.db?mode=rwc"),
            model: resolve(cli.model.clone(), "ANTHROPIC_MODEL", models::CLAUDE_HAIKU_4_5),
            batch_size: cli.batch_size,
            max_items: cli.max_items,
            settle_ms: cli.settle_ms,
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let mut classifier = ClassifierConfig::default();
        if let Some(batch_size) = self.batch_size {
            classifier = classifier.with_batch_size(batch_size);
        }
        if let Some(max_items) = self.max_items {
            classifier = classifier.with_max_items(max_items);
        }
        let mut config = PipelineConfig::new().with_classifier(classifier);
        if let Some(ms) = self.settle_ms {
            config = config.with_settle_delay(Duration::from_millis(ms));
        }
        config
    }

    fn inference(&self) -> Result<AnthropicInference> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").context("ANTHROPIC_API_KEY not set")?;
        let mut credentials = InferenceCredentials::new(api_key, self.model.as_str());
        if let Ok(base_url) = std::env::var("ANTHROPIC_BASE_URL") {
            credentials = credentials.with_base_url(base_url);
        }
        Ok(AnthropicInference::from_credentials(&credentials))
    }

    async fn subscribers(&self) -> Result<SqliteSubscriberStore> {
        SqliteSubscriberStore::new(&self.db)
            .await
            .context("Failed to open subscriber database")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,curation=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli);

    match cli.command {
        Commands::Run => cmd_run(&settings).await,
        Commands::Subscribe {
            email,
            first_name,
            last_name,
            preferences,
        } => cmd_subscribe(&settings, &email, &first_name, &last_name, &preferences).await,
        Commands::Digest { email } => cmd_digest(&settings, &email).await,
        Commands::Show { email } => cmd_show(&settings, &email).await,
    }
}

async fn cmd_run(settings: &Settings) -> Result<()> {
    tracing::info!(
        data_dir = %settings.data_dir,
        model = %settings.model,
        "Starting The Daily Distill pipeline"
    );

    let artifacts = Arc::new(JsonArtifactStore::new(&settings.data_dir));
    let subscribers = Arc::new(settings.subscribers().await?);
    let inference = Arc::new(settings.inference()?);

    let orchestrator = Orchestrator::new(
        artifacts.clone(),
        inference,
        artifacts,
        subscribers,
        settings.pipeline_config(),
    );

    let summary = orchestrator.run().await?;
    println!("Run {} finished", summary.run_id);
    println!("  items ingested: {}", summary.items_ingested);
    println!("  classified:     {}", summary.classified);
    println!("  failed batches: {}", summary.batches_failed);
    println!("  duplicates out: {}", summary.removed);
    println!("  final corpus:   {}", summary.final_len);
    Ok(())
}

async fn cmd_subscribe(
    settings: &Settings,
    email: &str,
    first_name: &str,
    last_name: &str,
    preferences: &str,
) -> Result<()> {
    let store = settings.subscribers().await?;
    let profile = SubscriberProfile::new(email, first_name, last_name, preferences);
    let id = store.upsert(&profile).await?;
    println!("Subscribed {} as {}", email, id);
    Ok(())
}

async fn cmd_digest(settings: &Settings, email: &str) -> Result<()> {
    let artifacts = Arc::new(JsonArtifactStore::new(&settings.data_dir));
    let subscribers = Arc::new(settings.subscribers().await?);
    let inference = Arc::new(settings.inference()?);

    let subscriber = subscribers
        .get_by_email(email)
        .await?
        .with_context(|| format!("No subscriber for {}", email))?;
    tracing::info!(model = %settings.model, "Generating digest for {}", subscriber.id);

    let orchestrator = Orchestrator::new(
        artifacts.clone(),
        inference,
        artifacts,
        subscribers,
        settings.pipeline_config(),
    );

    let document = orchestrator.generate_digest(&subscriber.id).await?;
    println!("{}", document);
    Ok(())
}

async fn cmd_show(settings: &Settings, email: &str) -> Result<()> {
    let store = settings.subscribers().await?;
    match store.get_by_email(email).await? {
        Some(subscriber) => {
            println!("{} <{}>", subscriber.id, subscriber.email);
            println!(
                "  name:        {} {}",
                subscriber.first_name, subscriber.last_name
            );
            println!("  preferences: {}", subscriber.preferences);
            match subscriber.digest_content {
                Some(content) => {
                    if let Some(at) = subscriber.digest_generated_at {
                        println!("  digest from: {}", at.to_rfc3339());
                    }
                    println!();
                    println!("{}", content);
                }
                None => println!("  digest:      none"),
            }
        }
        None => println!("No subscriber for {}", email),
    }
    Ok(())
}
