//! FX CLI
//!
//! Command-line front end for the currency converter:
//! - Load configuration from flags and environment
//! - Pick the live (HTTP) or offline rate provider
//! - Run one conversion or lookup and print the result

mod config;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand, builder::BoolishValueParser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_client::{DEFAULT_BASE_URL, HttpRateProvider};
use converter_hex::{ConversionService, parse_request};
use converter_types::{ConversionError, CurrencyCode, CurrencyListing, RateProvider, RateQuote};
use exchange_rates::StaticRateProvider;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency converter with live exchange rates", long_about = None)]
struct Cli {
    /// Base URL of a ratesapi-compatible exchange rate service
    #[arg(long, env = "FX_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "FX_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Use built-in reference rates instead of the network
    #[arg(
        long,
        global = true,
        env = "FX_OFFLINE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    offline: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Amount in the source currency
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source currency code (e.g. USD)
        from: String,
        /// Target currency code (e.g. EUR)
        to: String,
        /// Use the rate of a past day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the exchange rate for a pair
    Rate {
        from: String,
        to: String,
        /// Use the rate of a past day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the display symbol of a currency
    Symbol {
        /// Currency code (e.g. USD)
        code: String,
    },
    /// List supported currencies
    Currencies {
        /// Base currency to query the provider with
        #[arg(long, default_value = "USD")]
        base: String,
    },
}

/// Filter used when `RUST_LOG` is unset. Binary events log under `fx`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn,fx=info" }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::Config::new(&cli.api_url, cli.timeout_secs, cli.offline)?;

    let outcome = if config.offline {
        tracing::debug!("using offline reference rates");
        let service = ConversionService::new(StaticRateProvider::new());
        run(&service, cli.command, cli.json).await
    } else {
        tracing::debug!(api_url = %config.api_url, "using live rates");
        let provider = HttpRateProvider::new(&config.api_url).with_timeout(config.timeout);
        let service = ConversionService::new(provider);
        run(&service, cli.command, cli.json).await
    };

    if let Err(err) = outcome {
        match err.downcast_ref::<ConversionError>() {
            Some(conversion) => eprintln!("✗ {}", render::error_message(conversion)),
            None => eprintln!("✗ {:#}", err),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run<P: RateProvider>(
    service: &ConversionService<P>,
    command: Commands,
    json: bool,
) -> Result<()> {
    match command {
        Commands::Convert {
            amount,
            from,
            to,
            date,
        } => {
            let request = parse_request(&amount, &from, &to)?.as_of(date);
            let result = service.quote(&request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result);
            }
        }

        Commands::Rate { from, to, date } => {
            let rate = service.get_rate(&from, &to, date).await?;
            let quote = RateQuote {
                from: CurrencyCode::new(&from)?,
                to: CurrencyCode::new(&to)?,
                rate,
                date,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("{}", render::rate_line(&quote));
            }
        }

        Commands::Symbol { code } => {
            let symbol = service.get_symbol(&code).await?;
            if json {
                let listing = CurrencyListing {
                    code: CurrencyCode::new(&code)?,
                    name: exchange_rates::name(&code).map(String::from),
                    symbol: Some(symbol),
                };
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                println!("{}", symbol);
            }
        }

        Commands::Currencies { base } => {
            let listings: Vec<CurrencyListing> = service
                .supported_currencies(&base)
                .await?
                .into_iter()
                .map(|code| {
                    let entry = exchange_rates::lookup(code.as_str());
                    CurrencyListing {
                        name: entry.map(|e| e.name.to_string()),
                        symbol: entry.map(|e| e.symbol.to_string()),
                        code,
                    }
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&listings)?);
            } else {
                for listing in &listings {
                    println!("{}", render::listing_line(listing));
                }
            }
        }
    }

    Ok(())
}
