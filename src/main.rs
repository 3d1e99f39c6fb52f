use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Deserialize;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use parley::MenuTarget;
use parley::api::{MessageApi, ZulipClient, search_messages};
use parley::core::action::Route;
use parley::core::config::{self, CliOverrides};
use parley::core::dispatch::{cancel_action, dispatch, execute_by_title};
use parley::core::handlers::{ActionParams, strip_tags};
use parley::core::localize::Localizer;
use parley::core::menu::{MenuContext, build_menu};
use parley::core::message::{Flags, Message, MuteTuple, Recipient, Subscription};
use parley::core::narrow::Narrow;
use parley::core::registry::ActionRegistry;
use parley::platform::TerminalPlatform;
use parley::tui;

#[derive(Parser)]
#[command(name = "parley", about = "Long-press action sheets for chat messages")]
struct Args {
    /// Server URL, overrides config and PARLEY_REALM
    #[arg(long, global = true)]
    realm: Option<String>,

    /// Account email, overrides config and PARLEY_EMAIL
    #[arg(long, global = true)]
    email: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the action sheet for a message and run the chosen action
    Menu {
        /// JSON file with the message and the session state around it
        snapshot: PathBuf,

        /// Which sheet to open
        #[arg(short, long, default_value_t, value_enum)]
        target: MenuTarget,

        /// Choose this title instead of showing the sheet
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Show the newest messages matching a search
    Search { query: String },
}

/// What the app knows when a message is long-pressed.
#[derive(Deserialize)]
struct SessionSnapshot {
    message: Message,
    #[serde(default)]
    narrow: Narrow,
    #[serde(default)]
    flags: Flags,
    #[serde(default)]
    subscriptions: Vec<Subscription>,
    #[serde(default)]
    mute: Vec<MuteTuple>,
    #[serde(default)]
    route: Route,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config()?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            realm: args.realm.as_deref(),
            email: args.email.as_deref(),
        },
    );

    // Initialize file logger - writes to parley.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = resolved.log_level.parse().unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create("parley.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    info!("Parley starting up");

    let Some(auth) = resolved.auth() else {
        return Err("missing credentials: set realm, email and api_key in ~/.parley/config.toml \
                    or PARLEY_REALM, PARLEY_EMAIL and PARLEY_API_KEY"
            .into());
    };
    let api: Arc<dyn MessageApi> = Arc::new(ZulipClient::new());
    let localizer: Arc<dyn Localizer> = Arc::new(resolved.localizer());

    match args.command {
        Command::Menu {
            snapshot,
            target,
            select,
        } => {
            let snapshot: SessionSnapshot = serde_json::from_str(&fs::read_to_string(&snapshot)?)?;
            let registry = ActionRegistry::standard();
            let (tx, mut rx) = mpsc::unbounded_channel();

            let params = ActionParams {
                auth,
                message: snapshot.message.clone(),
                subscriptions: snapshot.subscriptions.clone(),
                dispatch: tx,
                current_route: snapshot.route,
                on_reply_select: Some(Arc::new(|| info!("Compose box focused"))),
                localizer: localizer.clone(),
                api,
                platform: Arc::new(TerminalPlatform::new()),
            };

            let handle = match select {
                Some(title) => execute_by_title(&registry, &target, &title, params),
                None => {
                    let ctx = MenuContext {
                        message: &snapshot.message,
                        auth: &params.auth,
                        narrow: &snapshot.narrow,
                        flags: &snapshot.flags,
                        subscriptions: &snapshot.subscriptions,
                        mute: &snapshot.mute,
                    };
                    let menu = build_menu(&target, &registry, &ctx, localizer.as_ref());
                    let title = match target {
                        MenuTarget::Message => "Message",
                        MenuTarget::Header => "Conversation",
                    };
                    let chosen = tui::show_action_sheet(title, menu.titles(), Some(menu.cancel_index()))?;
                    let action = chosen
                        .and_then(|index| menu.action_at(index))
                        .unwrap_or_else(|| cancel_action(&target));
                    dispatch(action, params)
                }
            };

            if let Some(handle) = handle
                && let Err(e) = handle.await
            {
                warn!("Handler task failed: {}", e);
            }

            while let Ok(intent) = rx.try_recv() {
                println!("{}", serde_json::to_string(&intent)?);
            }
        }
        Command::Search { query } => {
            let messages = search_messages(api.as_ref(), &auth, &query).await?;
            if messages.is_empty() {
                println!("No results");
            }
            for message in &messages {
                println!("{}", format_search_result(message));
            }
        }
    }

    Ok(())
}

fn format_search_result(message: &Message) -> String {
    let time = chrono::DateTime::from_timestamp(message.timestamp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let container = match &message.recipient {
        Recipient::Stream { name } => format!("#{} > {}", name, message.subject),
        Recipient::Private { participants } => participants
            .iter()
            .map(|p| p.email.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    };
    format!(
        "#{} {} {} [{}]\n    {}",
        message.id,
        time,
        message.sender_email,
        container,
        strip_tags(&message.content).trim()
    )
}
