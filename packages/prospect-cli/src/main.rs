//! `prospect` - score leads and fill in missing emails from the terminal.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use prospecting::{
    discover_missing_emails, enrich_contacts, qualify_contact, rescore_all, waterfall_order,
    ApolloFinder, BulkDiscoveryConfig, ContactStore, DiscoveryConfig, FileStore, FinderRegistry,
    HunterFinder, RateLimitedFinder, SettingsStore, WaterfallResolver,
};

use config::Config;

#[derive(Parser)]
#[command(name = "prospect")]
#[command(about = "Lead qualification and waterfall contact discovery")]
struct Cli {
    /// Store document (overrides PROSPECT_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print machine-readable JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score contacts against the saved ICP and strategy profile
    Score {
        /// Score a single contact instead of rescanning all
        #[arg(long)]
        contact: Option<Uuid>,
    },

    /// Find emails for contacts that have none
    Discover {
        /// Contacts resolved at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Seconds allowed for one provider lookup
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Report what would be found without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the integration waterfall
    Providers,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,prospecting=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let store = FileStore::new(&config.store_path);
    tracing::debug!(path = %config.store_path.display(), "Using store");

    match cli.command {
        Commands::Score { contact } => score(&store, contact, cli.json).await,
        Commands::Discover {
            concurrency,
            timeout_secs,
            dry_run,
        } => {
            if let Some(concurrency) = concurrency {
                config.concurrency = concurrency;
            }
            if let Some(secs) = timeout_secs {
                config.provider_timeout = Duration::from_secs(secs);
            }
            discover(&store, &config, dry_run, cli.json).await
        }
        Commands::Providers => providers(&store, &config, cli.json).await,
    }
}

async fn score(store: &FileStore, contact_id: Option<Uuid>, json: bool) -> Result<()> {
    let icp = store.load_icp().await?;
    let profile = store.load_profile().await?;

    if !icp.is_set && profile.is_none() {
        eprintln!(
            "{}",
            "No ICP or strategy profile saved; every contact will stay pending.".bright_yellow()
        );
    }

    if let Some(id) = contact_id {
        let mut contact = store
            .get_contact(id)
            .await?
            .with_context(|| format!("Contact {} not found", id))?;
        let fit = qualify_contact(&mut contact, &icp, profile.as_ref());
        store.upsert_contact(&contact).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&fit)?);
        } else {
            output::print_fit(&contact, &fit);
        }
        return Ok(());
    }

    let summary = rescore_all(store).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for contact in store.list_contacts().await? {
        output::print_stored(&contact);
    }
    output::print_summary(&summary);
    Ok(())
}

fn build_resolver(config: &Config) -> Result<WaterfallResolver<RateLimitedFinder<FinderRegistry>>> {
    let registry = FinderRegistry::new()
        .register(
            "hunter",
            HunterFinder::with_base_url(&config.hunter_api_base)
                .context("Failed to build Hunter client")?,
        )
        .register(
            "apollo",
            ApolloFinder::with_base_url(&config.apollo_api_base)
                .context("Failed to build Apollo client")?,
        );

    let finder = RateLimitedFinder::new(registry, config.rate_limit_per_sec);
    Ok(WaterfallResolver::new(finder)
        .with_config(DiscoveryConfig::new().with_provider_timeout(config.provider_timeout)))
}

async fn discover(store: &FileStore, config: &Config, dry_run: bool, json: bool) -> Result<()> {
    let resolver = build_resolver(config)?;
    let bulk = BulkDiscoveryConfig::new().with_concurrency(config.concurrency);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!(
                "{}",
                "Stopping: waiting for lookups already in flight...".bright_yellow()
            );
            trigger.cancel();
        }
    });

    let report = if dry_run {
        let contacts = store.list_contacts().await?;
        let integrations = store.load_integrations().await?;
        discover_missing_emails(&resolver, &contacts, &integrations, &bulk, &cancel).await
    } else {
        enrich_contacts(store, &resolver, &bulk, &cancel).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let contacts = store.list_contacts().await?;
        output::print_discovery(&report, &contacts);
        if dry_run {
            println!("{}", "Dry run: nothing was saved.".dimmed());
        }
    }
    Ok(())
}

async fn providers(store: &FileStore, config: &Config, json: bool) -> Result<()> {
    let integrations = store.load_integrations().await?;
    if json {
        let redacted: Vec<serde_json::Value> = integrations
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                    "enabled": p.enabled,
                    "priority": p.priority,
                    "hasApiKey": !p.api_key.is_empty(),
                    "eligible": p.is_eligible(),
                    "costPerMatch": p.cost_per_match,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&redacted)?);
        return Ok(());
    }
    if integrations.is_empty() {
        println!("{}", "No integrations configured.".bright_yellow());
        return Ok(());
    }

    let resolver = build_resolver(config)?;
    let registry = resolver.finder().inner();

    let order = waterfall_order(&integrations);
    for (n, provider) in order.iter().enumerate() {
        output::print_provider(Some(n + 1), provider, registry.supports(&provider.id));
    }
    for provider in integrations.iter().filter(|p| !p.is_eligible()) {
        output::print_provider(None, provider, registry.supports(&provider.id));
    }
    Ok(())
}
