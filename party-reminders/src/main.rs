//! party-reminders - Keep track of birthdays, anniversaries and meetings
//!
//! Unix-style tool over the Party Planner reminder store.

use chrono::Utc;
use clap::{Parser, Subcommand};
use libpartyplan::logging;
use libpartyplan::service::reminders::{days_until, ReminderDetails};
use libpartyplan::when::parse_when;
use libpartyplan::{Config, PartyPlanError, PartyPlanService, Reminder, ReminderForm, ReminderType};

#[derive(Parser, Debug)]
#[command(name = "party-reminders")]
#[command(version)]
#[command(about = "Keep track of birthdays, anniversaries and meetings")]
#[command(long_about = "\
party-reminders - Keep track of birthdays, anniversaries and meetings

DESCRIPTION:
    party-reminders works against the Party Planner mock store. Every run
    starts from a fresh store and waits out the simulated network delay of
    each call, unless --fast is given.

COMMANDS:
    list      List reminders with the days left until each
    show      Show a reminder and the event planned for it
    create    Create a reminder
    update    Edit a reminder
    delete    Delete a reminder

USAGE EXAMPLES:
    # All reminders
    party-reminders list

    # Birthday reminder with gift ideas, notified a day and a week ahead
    party-reminders create --title \"Dad's Birthday\" --type birthday \\
        --date 2030-06-01 --recipient Robert --gifts \"Book, Watch\" --notify 1,7

    # Edit just the description
    party-reminders update 3 --description \"Call before noon\"

CONFIGURATION:
    Configuration file: ~/.config/partyplan/config.toml

    Override with environment variables:
        PARTYPLAN_CONFIG      - Path to config file
        PARTYPLAN_LOG_FORMAT  - text, json or pretty
        PARTYPLAN_LOG_LEVEL   - error, warn, info, debug or trace

EXIT CODES:
    0 - Success
    1 - Configuration error
    2 - Reminder not found
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
    /// List reminders
    List {
        /// Only reminders of this type
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Show a reminder and its planned event
    Show {
        id: u32,
    },

    /// Create a reminder
    Create {
        #[arg(long, default_value = "")]
        title: String,

        /// RFC 3339, YYYY-MM-DD [HH:MM], or an offset like 3d (default: now)
        #[arg(long)]
        date: Option<String>,

        /// birthday, anniversary, meeting or other
        #[arg(long = "type", default_value = "birthday")]
        kind: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        recipient: String,

        #[arg(long, default_value = "")]
        relationship: String,

        /// Days before the date to notify, comma-separated
        #[arg(long, default_value = "1,7")]
        notify: String,

        /// Gift ideas, comma-separated
        #[arg(long, default_value = "")]
        gifts: String,

        /// A surprise is being planned
        #[arg(long)]
        surprise: bool,

        /// Event planned for this reminder
        #[arg(long)]
        event: Option<u32>,
    },

    /// Edit a reminder; fields not given keep their value
    Update {
        id: u32,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        recipient: Option<String>,

        #[arg(long)]
        relationship: Option<String>,

        #[arg(long)]
        notify: Option<String>,

        #[arg(long)]
        gifts: Option<String>,

        #[arg(long)]
        surprise: Option<bool>,

        #[arg(long)]
        event: Option<u32>,
    },

    /// Delete a reminder
    Delete {
        id: u32,
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

fn parse_kind(kind: &str) -> Result<ReminderType, PartyPlanError> {
    kind.parse().map_err(PartyPlanError::InvalidInput)
}

/// "1, 7,30" -> [1, 7, 30]; an empty string means no notifications
fn parse_notify(input: &str) -> Result<Vec<u32>, PartyPlanError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>().map_err(|_| {
                PartyPlanError::InvalidInput(format!(
                    "Invalid notification offset '{}'. Use whole days, e.g. 1,7,30",
                    s
                ))
            })
        })
        .collect()
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
    tracing::debug!("party-reminders started with args: {:?}", cli);

    let format = parse_format(&cli.format)?;

    let mut config = Config::load_or_default()?;
    if cli.fast {
        config.latency.enabled = false;
    }
    let service = PartyPlanService::from_config(config);
    let now = Utc::now();

    match cli.command {
        Commands::List { kind } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let mut reminders = service.reminders().fetch_upcoming_reminders().await;
            if let Some(kind) = kind {
                reminders.retain(|r| r.kind == kind);
            }
            output_reminders(&reminders, format)?;
        }
        Commands::Show { id } => {
            let details = service
                .reminders()
                .fetch_reminder_with_event(id)
                .await
                .ok_or(PartyPlanError::NotFound {
                    kind: "Reminder",
                    id,
                })?;
            output_details(&details, format)?;
        }
        Commands::Create {
            title,
            date,
            kind,
            description,
            recipient,
            relationship,
            notify,
            gifts,
            surprise,
            event,
        } => {
            let form = ReminderForm {
                title,
                date: match date {
                    Some(input) => parse_when(&input, now)?,
                    None => now,
                },
                kind: Some(parse_kind(&kind)?),
                description,
                recipient_name: recipient,
                relationship,
                notify_before: parse_notify(&notify)?,
                gift_ideas: gifts,
                planned_surprise: surprise,
                planned_event_id: event,
            };
            let new_reminder = service.validation().check_reminder(form, now)?;
            let reminder = service.reminders().create_reminder(new_reminder).await;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminder)?),
                OutputFormat::Text => {
                    println!("Created reminder {}: {}", reminder.id, reminder.title)
                }
            }
        }
        Commands::Update {
            id,
            title,
            date,
            kind,
            description,
            recipient,
            relationship,
            notify,
            gifts,
            surprise,
            event,
        } => {
            let current = service.reminders().get_reminder(id).await?;

            // Same as the edit screen: start from the stored reminder, apply
            // the edits, then validate the whole form
            let form = ReminderForm {
                title: title.unwrap_or(current.title),
                date: match date {
                    Some(input) => parse_when(&input, now)?,
                    None => current.date,
                },
                kind: Some(match kind {
                    Some(kind) => parse_kind(&kind)?,
                    None => current.kind,
                }),
                description: description.unwrap_or(current.description),
                recipient_name: recipient
                    .or(current.recipient_name)
                    .unwrap_or_default(),
                relationship: relationship.or(current.relationship).unwrap_or_default(),
                notify_before: match notify {
                    Some(input) => parse_notify(&input)?,
                    None => current.notify_before,
                },
                gift_ideas: gifts
                    .or_else(|| current.gift_ideas.map(|ideas| ideas.join(", ")))
                    .unwrap_or_default(),
                planned_surprise: surprise
                    .or(current.planned_surprise)
                    .unwrap_or(false),
                planned_event_id: current.planned_event_id,
            };

            let mut patch = service.validation().check_reminder_edit(form, now)?;
            if let Some(event_id) = event {
                patch.planned_event_id = Some(Some(event_id));
            }

            let reminder = service
                .reminders()
                .update_reminder(id, patch)
                .await
                .ok_or(PartyPlanError::NotFound {
                    kind: "Reminder",
                    id,
                })?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminder)?),
                OutputFormat::Text => {
                    println!("Updated reminder {}: {}", reminder.id, reminder.title)
                }
            }
        }
        Commands::Delete { id } => {
            if !service.reminders().delete_reminder(id).await {
                return Err(PartyPlanError::NotFound {
                    kind: "Reminder",
                    id,
                }
                .into());
            }
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "id": id, "deleted": true }))
                }
                OutputFormat::Text => println!("Deleted reminder {}", id),
            }
        }
    }

    Ok(())
}

fn output_reminders(reminders: &[Reminder], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(reminders)?);
        return Ok(());
    }

    let now = Utc::now();
    for reminder in reminders {
        println!(
            "{} | {} | {} | {} | {} days left",
            reminder.id,
            reminder.date.format("%Y-%m-%d"),
            reminder.kind,
            reminder.title,
            days_until(reminder, now)
        );
    }
    Ok(())
}

fn output_details(details: &ReminderDetails, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(details)?);
        return Ok(());
    }

    let reminder = &details.reminder;
    println!("{} (#{})", reminder.title, reminder.id);
    if !reminder.description.is_empty() {
        println!("  {}", reminder.description);
    }
    println!("  Type:      {}", reminder.kind);
    println!(
        "  Date:      {} ({} days left)",
        reminder.date.format("%Y-%m-%d"),
        days_until(reminder, Utc::now())
    );
    if let Some(name) = &reminder.recipient_name {
        match &reminder.relationship {
            Some(relationship) => println!("  For:       {} ({})", name, relationship),
            None => println!("  For:       {}", name),
        }
    }
    if !reminder.notify_before.is_empty() {
        let days: Vec<String> = reminder.notify_before.iter().map(u32::to_string).collect();
        println!("  Notify:    {} days before", days.join(", "));
    }
    if let Some(ideas) = reminder.gift_ideas.as_ref().filter(|i| !i.is_empty()) {
        println!("  Gifts:     {}", ideas.join(", "));
    }
    if reminder.planned_surprise == Some(true) {
        println!("  Surprise:  planned");
    }
    if let Some(event) = &details.planned_event {
        println!("  Event:     {} (#{})", event.title, event.id);
    }

    Ok(())
}
