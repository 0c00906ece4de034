//! InsightDeck CLI
//!
//! Thin presentation layer over the lifecycle service and the
//! classification gateway. Stages feedback, requests suggestions, promotes
//! confirmed records, and prints aggregate counts.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use insightdeck::{
    classify::{Classifier, GeminiClassifier},
    config::DeckConfig,
    insights::{stats, FileStore, InsightService},
    Sentiment, Topic,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "insightdeck")]
#[command(version)]
#[command(about = "Local-first triage pipeline for free-text customer insights")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "INSIGHTDECK_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage a new insight
    Add {
        /// Source URL of the content
        #[arg(short, long)]
        url: String,

        /// The feedback text
        #[arg(short = 't', long)]
        content: String,
    },

    /// List a collection
    List {
        /// Which collection to list
        #[arg(value_enum)]
        which: Which,
    },

    /// Promote a staged insight with final labels
    Process {
        /// Insight id
        id: String,

        /// Sentiment label (Positive, Negative, Neutral)
        #[arg(short, long)]
        sentiment: String,

        /// Topic label (Campaign, Shipping, Price, "Product Quality",
        /// "Customer Service", General)
        #[arg(short, long)]
        topic: String,
    },

    /// Delete a staged insight
    Delete {
        /// Insight id
        id: String,
    },

    /// Empty a collection
    Clear {
        /// Which collection to clear
        #[arg(value_enum)]
        which: Which,
    },

    /// Ask the classification provider for a label suggestion
    Suggest {
        /// The feedback text to classify
        content: String,
    },

    /// Print sentiment and topic distributions over the processed set
    Stats,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

/// Collection selector for list/clear
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Which {
    Staged,
    Processed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("insightdeck={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        let content = std::fs::read_to_string(config_path)?;
        toml::from_str(&content)?
    } else {
        DeckConfig::default()
    };

    match cli.command {
        Commands::Add { url, content } => {
            let service = build_service(&config).await?;
            let insight = service.add_insight(&url, &content).await?;
            println!("Staged insight {}", insight.id);
        }
        Commands::List { which } => {
            let service = build_service(&config).await?;
            let records = match which {
                Which::Staged => service.list_staged().await,
                Which::Processed => service.list_processed().await,
            };
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Process { id, sentiment, topic } => {
            let sentiment: Sentiment = sentiment.parse().map_err(|e: String| anyhow!(e))?;
            let topic: Topic = topic.parse().map_err(|e: String| anyhow!(e))?;
            let service = build_service(&config).await?;
            service.process_insight(&id, sentiment, topic).await?;
            println!("Processed {}", id);
        }
        Commands::Delete { id } => {
            let service = build_service(&config).await?;
            service.delete_staged(&id).await?;
            println!("Deleted {}", id);
        }
        Commands::Clear { which } => {
            let service = build_service(&config).await?;
            match which {
                Which::Staged => service.clear_staged().await?,
                Which::Processed => service.clear_processed().await?,
            }
            println!("Cleared {:?} collection", which);
        }
        Commands::Suggest { content } => {
            let classifier = GeminiClassifier::new(config.classifier.clone());
            let suggestion = classifier.suggest(&content).await?;
            println!(
                "Suggestion: sentiment={} topic={}",
                suggestion.sentiment, suggestion.topic
            );
        }
        Commands::Stats => {
            let service = build_service(&config).await?;
            let processed = service.list_processed().await;
            println!("Processed insights: {}", processed.len());
            println!();
            println!("Sentiment distribution:");
            for (sentiment, count) in stats::sentiment_distribution(&processed) {
                println!("  {:<18} {}", sentiment.as_str(), count);
            }
            println!();
            println!("Topic distribution:");
            for (topic, count) in stats::topic_distribution(&processed) {
                println!("  {:<18} {}", topic.as_str(), count);
            }
        }
        Commands::Config { default } => {
            let config = if default { DeckConfig::default() } else { config };
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn build_service(config: &DeckConfig) -> Result<InsightService> {
    let store = FileStore::new(config.storage.data_dir.clone()).await?;
    Ok(InsightService::new(Arc::new(store)))
}
