//! party-vendors - Browse the vendor directory and book vendors for events

use clap::{Parser, Subcommand};
use libpartyplan::logging;
use libpartyplan::service::vendors::ALL_CATEGORIES;
use libpartyplan::types::VENDOR_CATEGORIES;
use libpartyplan::{Config, PartyPlanError, PartyPlanService, Vendor};

#[derive(Parser, Debug)]
#[command(name = "party-vendors")]
#[command(version)]
#[command(about = "Browse the vendor directory and book vendors for events")]
#[command(long_about = "\
party-vendors - Browse the vendor directory and book vendors for events

DESCRIPTION:
    party-vendors lists and searches the Party Planner vendor directory and
    books a vendor for an event. Every run starts from a fresh store and
    waits out the simulated network delay of each call, unless --fast is
    given.

COMMANDS:
    list      List vendors, optionally in one category
    search    Search vendors by name or category
    book      Book a vendor for an event

USAGE EXAMPLES:
    # Every caterer
    party-vendors list --category Food

    # Florists among the decorators
    party-vendors search floral --category Decoration

    # Book DJ Spectacular for the charity gala
    party-vendors book 6 6

CONFIGURATION:
    Configuration file: ~/.config/partyplan/config.toml

    Override with environment variables:
        PARTYPLAN_CONFIG      - Path to config file
        PARTYPLAN_LOG_FORMAT  - text, json or pretty
        PARTYPLAN_LOG_LEVEL   - error, warn, info, debug or trace

EXIT CODES:
    0 - Success
    1 - Configuration error
    2 - Event or vendor not found
    3 - Invalid input
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: text or json
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    /// Skip the simulated network delay
    #[arg(long, global = true)]
    fast: bool,

    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List vendors
    List {
        /// Food, Venue, Equipment, Entertainment, Decoration, Photography or All
        #[arg(long)]
        category: Option<String>,
    },

    /// Search vendors by name or category, case-insensitive
    Search {
        query: String,

        /// Exact category to search within
        #[arg(long)]
        category: Option<String>,
    },

    /// Book a vendor for an event
    Book {
        event_id: u32,
        vendor_id: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, PartyPlanError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(PartyPlanError::InvalidInput(format!(
            "Invalid format '{}'. Must be 'text' or 'json'",
            format
        ))),
    }
}

/// Accept "All" or one of the directory's categories, exactly as written
fn check_category(category: Option<&str>) -> Result<(), PartyPlanError> {
    match category {
        None | Some(ALL_CATEGORIES) => Ok(()),
        Some(category) if VENDOR_CATEGORIES.iter().any(|c| *c == category) => Ok(()),
        Some(category) => Err(PartyPlanError::InvalidInput(format!(
            "Invalid category '{}'. Valid options: {}, {}",
            category,
            ALL_CATEGORIES,
            VENDOR_CATEGORIES.join(", ")
        ))),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_default(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        let code = e
            .downcast_ref::<PartyPlanError>()
            .map(PartyPlanError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::debug!("party-vendors started with args: {:?}", cli);

    let format = parse_format(&cli.format)?;

    let mut config = Config::load_or_default()?;
    if cli.fast {
        config.latency.enabled = false;
    }
    let service = PartyPlanService::from_config(config);

    match cli.command {
        Commands::List { category } => {
            check_category(category.as_deref())?;
            let vendors = match category.as_deref() {
                None | Some(ALL_CATEGORIES) => service.vendors().fetch_vendors().await,
                Some(category) => service.vendors().fetch_vendors_by_category(category).await,
            };
            output_vendors(&vendors, format)?;
        }
        Commands::Search { query, category } => {
            check_category(category.as_deref())?;
            let vendors = service
                .vendors()
                .search_vendors(query.trim(), category.as_deref())
                .await;
            output_vendors(&vendors, format)?;
        }
        Commands::Book {
            event_id,
            vendor_id,
        } => cmd_book(&service, event_id, vendor_id, format).await?,
    }

    Ok(())
}

async fn cmd_book(
    service: &PartyPlanService,
    event_id: u32,
    vendor_id: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    // Resolve both sides first so a refusal can say which one is missing
    let event = service.events().get_event(event_id).await?;
    let vendor = service
        .vendors()
        .fetch_vendors()
        .await
        .into_iter()
        .find(|v| v.id == vendor_id)
        .ok_or(PartyPlanError::NotFound {
            kind: "Vendor",
            id: vendor_id,
        })?;

    if !service.vendors().book_vendor(event_id, vendor_id).await {
        anyhow::bail!(
            "Could not book {} for event {}",
            vendor.name,
            event_id
        );
    }

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "eventId": event_id,
                "vendorId": vendor_id,
                "booked": true,
            })
        ),
        OutputFormat::Text => println!("Booked {} for {}", vendor.name, event.title),
    }

    Ok(())
}

fn output_vendors(vendors: &[Vendor], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(vendors)?),
        OutputFormat::Text => {
            for vendor in vendors {
                println!(
                    "{} | {} | {} | {:.1} | {} | {}",
                    vendor.id,
                    vendor.name,
                    vendor.category,
                    vendor.rating,
                    vendor.price_range,
                    vendor.contact
                );
            }
        }
    }
    Ok(())
}
