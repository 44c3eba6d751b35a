//! party-events - Browse, create and register for events
//!
//! Unix-style tool over the Party Planner event store.

use anyhow::bail;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use libpartyplan::logging;
use libpartyplan::service::events::{filter_events, EventFilter};
use libpartyplan::service::validation::FieldErrors;
use libpartyplan::types::placeholder_image_url;
use libpartyplan::when::parse_when;
use libpartyplan::{Config, Event, EventForm, EventPatch, PartyPlanError, PartyPlanService};

#[derive(Parser, Debug)]
#[command(name = "party-events")]
#[command(version)]
#[command(about = "Browse, create and register for events")]
#[command(long_about = "\
party-events - Browse, create and register for events

DESCRIPTION:
    party-events works against the Party Planner mock store. Every run starts
    from a fresh store (the sample events unless the config disables seeding)
    and waits out the simulated network delay of each call, unless --fast is
    given.

COMMANDS:
    list        List events
    show        Show one event
    search      Search titles, descriptions, locations and categories
    create      Create an event
    update      Change fields of an event
    delete      Delete an event
    register    Take a seat at an event

USAGE EXAMPLES:
    # Upcoming large events as JSON
    party-events list --upcoming --filter large --format json

    # Search
    party-events search \"san francisco\"

    # Create an event three days from now
    party-events create --title \"Book Club\" --description \"Monthly meetup\" \\
        --location Library --organizer Dana --category Education \\
        --price 0 --max-attendees 12 --date 3d

    # Register twice as a specific user
    party-events register 3 --user guest-7 --times 2

CONFIGURATION:
    Configuration file: ~/.config/partyplan/config.toml

    Override with environment variables:
        PARTYPLAN_CONFIG      - Path to config file
        PARTYPLAN_LOG_FORMAT  - text, json or pretty
        PARTYPLAN_LOG_LEVEL   - error, warn, info, debug or trace

EXIT CODES:
    0 - Success
    1 - Operation refused or configuration error
    2 - Event not found
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
    /// List events
    List {
        /// Only events dated after now
        #[arg(long)]
        upcoming: bool,

        /// Home screen tab: all, surprise or large
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Show one event
    Show {
        id: u32,
    },

    /// Search events
    Search {
        query: String,
    },

    /// Create an event
    Create {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// RFC 3339, YYYY-MM-DD [HH:MM], or an offset like 3d (default: now)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        organizer: String,

        #[arg(long, default_value = "")]
        price: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        max_attendees: String,

        #[arg(long = "virtual")]
        is_virtual: bool,

        #[arg(long = "private")]
        is_private: bool,
    },

    /// Change fields of an event; fields not given keep their value
    Update {
        id: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        organizer: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        max_attendees: Option<u32>,

        #[arg(long = "virtual")]
        is_virtual: Option<bool>,

        #[arg(long = "private")]
        is_private: Option<bool>,
    },

    /// Delete an event
    Delete {
        id: u32,
    },

    /// Take a seat at an event
    Register {
        id: u32,

        /// User to register (default: defaults.user_id from config)
        #[arg(long)]
        user: Option<String>,

        /// Number of seats to take, one registration each
        #[arg(long, default_value_t = 1)]
        times: u32,
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
    tracing::debug!("party-events started with args: {:?}", cli);

    let format = parse_format(&cli.format)?;

    let mut config = Config::load_or_default()?;
    if cli.fast {
        config.latency.enabled = false;
    }
    let service = PartyPlanService::from_config(config);
    let now = Utc::now();

    match cli.command {
        Commands::List { upcoming, filter } => {
            let filter: EventFilter = filter.parse().map_err(PartyPlanError::InvalidInput)?;
            let events = if upcoming {
                service.events().fetch_upcoming_events(now).await
            } else {
                service.events().fetch_events().await
            };
            output_events(&filter_events(events, filter), format)?;
        }
        Commands::Show { id } => {
            let event = service.events().get_event(id).await?;
            output_event(&event, format)?;
        }
        Commands::Search { query } => {
            let events = service.events().search_events(&query).await;
            output_events(&events, format)?;
        }
        Commands::Create {
            title,
            description,
            date,
            location,
            organizer,
            price,
            category,
            max_attendees,
            is_virtual,
            is_private,
        } => {
            let date = match date {
                Some(input) => parse_when(&input, now)?,
                None => now,
            };
            let form = EventForm {
                title,
                description,
                date,
                location,
                organizer,
                price,
                category,
                max_attendees,
                is_virtual,
                is_private,
            };
            let new_event = service.validation().check_event(form, now)?;
            let event = service
                .events()
                .create_event(new_event)
                .await
                .ok_or_else(|| {
                    PartyPlanError::InvalidInput("Event has more attendees than seats".to_string())
                })?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
                OutputFormat::Text => println!("Created event {}: {}", event.id, event.title),
            }
        }
        Commands::Update {
            id,
            title,
            description,
            date,
            location,
            organizer,
            price,
            category,
            max_attendees,
            is_virtual,
            is_private,
        } => {
            let date = date.map(|input| parse_when(&input, now)).transpose()?;
            let patch = EventPatch {
                title,
                description,
                date,
                location,
                organizer,
                price,
                category,
                max_attendees,
                is_virtual,
                is_private: is_private.map(Some),
                ..Default::default()
            };
            let current = service.events().get_event(id).await?;
            check_patch(&patch, &current, now)?;

            let event = service
                .events()
                .update_event(id, patch)
                .await
                .ok_or(PartyPlanError::NotFound { kind: "Event", id })?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
                OutputFormat::Text => println!("Updated event {}: {}", event.id, event.title),
            }
        }
        Commands::Delete { id } => {
            if !service.events().delete_event(id).await {
                return Err(PartyPlanError::NotFound { kind: "Event", id }.into());
            }
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "id": id, "deleted": true }))
                }
                OutputFormat::Text => println!("Deleted event {}", id),
            }
        }
        Commands::Register { id, user, times } => {
            let user = user.unwrap_or_else(|| service.default_user_id().to_string());
            cmd_register(&service, id, &user, times, format).await?;
        }
    }

    Ok(())
}

/// Reject edits the create form would not accept
/// Per-field checks for the fields a patch sets. `current` is the stored
/// event, which bounds how far the seat count may shrink.
fn check_patch(
    patch: &EventPatch,
    current: &Event,
    now: DateTime<Utc>,
) -> Result<(), PartyPlanError> {
    if patch.is_empty() {
        return Err(PartyPlanError::InvalidInput(
            "Nothing to update. Pass at least one field to change".to_string(),
        ));
    }

    let mut errors = FieldErrors::default();
    let required = [
        ("title", &patch.title, "Title is required"),
        ("description", &patch.description, "Description is required"),
        ("location", &patch.location, "Location is required"),
        ("organizer", &patch.organizer, "Organizer is required"),
        ("category", &patch.category, "Category is required"),
    ];
    for (field, value, message) in required {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.insert(field, message);
        }
    }
    match patch.max_attendees {
        Some(0) => errors.insert("maxAttendees", "Maximum attendees must be a positive number"),
        Some(max) if max < current.attendees => errors.insert(
            "maxAttendees",
            format!(
                "Maximum attendees cannot be below the {} already registered",
                current.attendees
            ),
        ),
        _ => {}
    }
    if patch.price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        errors.insert("price", "Price must be a non-negative number");
    }
    if patch.date.is_some_and(|d| d < now) {
        errors.insert("date", "Event date cannot be in the past");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PartyPlanError::Validation(errors))
    }
}

async fn cmd_register(
    service: &PartyPlanService,
    id: u32,
    user: &str,
    times: u32,
    format: OutputFormat,
) -> anyhow::Result<()> {
    // Distinguish a missing event from a full one
    service.events().get_event(id).await?;

    let mut registered = 0;
    for _ in 0..times {
        if !service.events().register_for_event(id, user).await {
            break;
        }
        registered += 1;
    }

    let event = service.events().get_event(id).await?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "id": id,
                "user": user,
                "requested": times,
                "registered": registered,
                "attendees": event.attendees,
                "maxAttendees": event.max_attendees,
            })
        ),
        OutputFormat::Text => println!(
            "Registered {} of {} for {} ({}/{} seats taken)",
            registered, times, event.title, event.attendees, event.max_attendees
        ),
    }

    if registered < times {
        bail!("Event {} is full", id);
    }
    Ok(())
}

fn output_events(events: &[Event], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(events)?),
        OutputFormat::Text => {
            for event in events {
                println!(
                    "{} | {} | {} | {} | {}/{}",
                    event.id,
                    event.date.format("%Y-%m-%d %H:%M"),
                    event.title,
                    event.location,
                    event.attendees,
                    event.max_attendees
                );
            }
        }
    }
    Ok(())
}

fn format_price(price: f64) -> String {
    if price == 0.0 {
        "Free".to_string()
    } else {
        format!("${:.2}", price)
    }
}

fn output_event(event: &Event, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(event)?);
        return Ok(());
    }

    println!("{} (#{})", event.title, event.id);
    println!("  {}", event.description);
    println!("  When:      {}", event.date.format("%Y-%m-%d %H:%M UTC"));
    println!(
        "  Where:     {}{}",
        event.location,
        if event.is_virtual { " (virtual)" } else { "" }
    );
    println!("  Organizer: {}", event.organizer);
    println!("  Category:  {}", event.category);
    println!("  Price:     {}", format_price(event.price));
    println!(
        "  Seats:     {}/{} ({} left)",
        event.attendees,
        event.max_attendees,
        event.spots_left()
    );
    if event.is_private() {
        println!("  Private:   yes");
    }
    if let Some(vendors) = event.vendors.as_ref().filter(|v| !v.is_empty()) {
        let names: Vec<String> = vendors
            .iter()
            .map(|v| format!("{} ({})", v.name, v.category))
            .collect();
        println!("  Vendors:   {}", names.join(", "));
    }
    let image = if event.image_url.is_empty() {
        placeholder_image_url(&event.title, event.id)
    } else {
        event.image_url.clone()
    };
    println!("  Image:     {}", image);

    Ok(())
}
