//! Storefront CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List sections and products
//! storefront-cli sections
//! storefront-cli products
//!
//! # Manage the persisted cart
//! storefront-cli cart add 64f1c2d9e8
//! storefront-cli cart show
//!
//! # Pay for the cart
//! storefront-cli checkout --email ada@example.com --name "Ada Lovelace" ...
//! ```
//!
//! # Environment Variables
//!
//! See `storefront_checkout::config` for the full list. `STOREFRONT_API_ADDRESS`
//! is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use storefront_checkout::AppState;
use storefront_checkout::config::StorefrontConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::checkout::CheckoutArgs;

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(author, version, about = "Storefront catalog, cart and checkout")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog sections with their categories and collections
    Sections,
    /// List all products
    Products,
    /// Show a single product
    Product {
        /// Product ID
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Pay for the cart
    Checkout(Box<CheckoutArgs>),
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents with prices
    Show,
    /// Add one unit of a stock item
    Add {
        /// Stock ID
        stock_id: String,
    },
    /// Remove one unit of a stock item
    Remove {
        /// Stock ID
        stock_id: String,
    },
    /// Empty the cart
    Clear,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_checkout=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration is needed before Sentry, and Sentry before tracing
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };

    let sentry_guard = init_sentry(&config);
    init_tracing();

    let result = async {
        let state = AppState::new(config)?;
        run(cli, &state).await
    }
    .await;

    if let Err(e) = result {
        e.report();
        // Flush queued events; process::exit skips destructors
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, state: &AppState) -> storefront_checkout::Result<()> {
    match cli.command {
        Commands::Sections => commands::catalog::sections(state).await?,
        Commands::Products => commands::catalog::products(state).await?,
        Commands::Product { id } => commands::catalog::product(state, &id).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state).await?,
            CartAction::Add { stock_id } => commands::cart::add(state, &stock_id).await?,
            CartAction::Remove { stock_id } => commands::cart::remove(state, &stock_id)?,
            CartAction::Clear => commands::cart::clear(state)?,
        },
        Commands::Checkout(args) => commands::checkout::run(state, *args).await?,
    }
    Ok(())
}
