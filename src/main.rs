mod cli_messages;
mod config;
mod consts;
mod dispatcher;
mod error;
mod error_classifier;
mod events;
mod gateway;
mod guild;
mod logging;
mod modules;
mod network;
mod relay;
mod session;
mod state;
mod status;
mod ui;

use crate::config::{Config, ConfigField, get_config_path};
use crate::dispatcher::Action;
use crate::error::WarroomError;
use crate::guild::{TreeRow, filter_members};
use crate::relay::{NewChannelType, Relay};
use crate::session::{SessionData, run_tui_mode, setup_session};
use crate::state::{AppState, SelectionKind, load_snapshot};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::error::Error;
use std::io::stdin;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal war room for a Discord bot Gateway and its Relay
struct Args {
    /// Command to execute; opens the dashboard when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard
    Start {
        /// Disable background colors
        #[arg(long)]
        no_background_color: bool,
    },
    /// Check the Gateway and the Relay
    Status {
        /// Also print the Gateway's health report
        #[arg(long)]
        verbose: bool,
    },
    /// Print the guild's channel tree
    Guild {
        /// Also list members matching this query (empty matches everyone)
        #[arg(long, value_name = "QUERY", num_args = 0..=1, default_missing_value = "")]
        members: Option<String>,
    },
    /// Print configuration (keys masked), guild and selection as JSON
    Debug,
    /// Rename a channel or category
    Rename { channel_id: String, name: String },
    /// Move a channel under a category, or out of any category
    Move {
        channel_id: String,
        parent_id: Option<String>,
    },
    /// Delete a channel or category
    Delete {
        channel_id: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Create a channel, category or role
    Create {
        #[command(subcommand)]
        target: CreateTarget,
    },
    /// Remove a role from a member
    RoleRemove { user_id: String, role_id: String },
    /// Run a named bot command
    Exec {
        name: String,
        /// Options as a JSON object
        #[arg(long, default_value = "{}")]
        options: String,
    },
    /// Ask the Relay to take a guild snapshot
    Snapshot,
    /// Manage Gateway modules
    Modules {
        #[command(subcommand)]
        action: ModulesCommand,
    },
    /// Show or change the saved settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum CreateTarget {
    Channel {
        name: String,
        /// Parent category id
        #[arg(long)]
        parent: Option<String>,
        #[arg(long = "type", value_enum, default_value_t = NewChannelType::Text)]
        kind: NewChannelType,
    },
    Category {
        name: String,
    },
    Role {
        name: String,
    },
}

#[derive(Subcommand)]
enum ModulesCommand {
    List,
    Enable {
        name: String,
    },
    Disable {
        name: String,
    },
    Lock {
        name: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    Unlock {
        name: String,
    },
    /// Print a module's config
    Config {
        name: String,
    },
    /// Replace a module's config with a JSON value
    SetConfig {
        name: String,
        json: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    Set {
        #[arg(value_enum)]
        field: ConfigField,
        value: String,
    },
    /// Delete the settings file
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_tracing();

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Start {
        no_background_color: false,
    });
    if let Err(e) = run(command).await {
        print_cmd_error!(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    match command {
        Command::Start {
            no_background_color,
        } => {
            let session = setup_session(config_path);
            run_tui_mode(session, !no_background_color).await
        }
        Command::Config { action } => run_config(action, &config_path).map_err(Into::into),
        Command::Status { verbose } => {
            let session = setup_session(config_path);
            let gateway = status::check_gateway(session.gateway.as_ref()).await;
            println!("{}", gateway);
            println!("{}", status::check_relay(session.relay.as_ref()).await);
            if verbose && gateway.up {
                let health = session.gateway.core_health().await?;
                cli_messages::print_response("Gateway health", &health);
            }
            Ok(())
        }
        Command::Guild { members } => {
            let session = setup_session(config_path);
            print_guild(&session, members.as_deref()).await.map_err(Into::into)
        }
        Command::Debug => {
            let session = setup_session(config_path);
            let mut state = AppState::new(session.config.clone());
            match load_snapshot(session.relay.as_ref(), session.guild_id()).await {
                Ok(snapshot) => state.replace_snapshot(snapshot),
                Err(e) => print_cmd_warn!("Guild not loaded", "{}", e),
            }
            println!("{}", serde_json::to_string_pretty(&state.debug_json())?);
            Ok(())
        }
        Command::Modules { action } => {
            let session = setup_session(config_path);
            run_modules(action, &session).await.map_err(Into::into)
        }
        other => {
            let session = setup_session(config_path);
            run_action(other, &session).await.map_err(Into::into)
        }
    }
}

fn run_config(action: ConfigCommand, config_path: &std::path::Path) -> Result<(), WarroomError> {
    match action {
        ConfigCommand::Show => {
            let config = Config::load(config_path);
            print_cmd_info!("Settings file", "{}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config.masked())?);
        }
        ConfigCommand::Set { field, value } => {
            let mut config = Config::load(config_path);
            config.set(field, &value)?;
            config.save(config_path)?;
            let shown = config.masked().get(field).to_string();
            print_cmd_success!("Saved", "{} = {}", field, shown);
        }
        ConfigCommand::Clear => {
            Config::clear(config_path)?;
            print_cmd_success!("Settings cleared", "{}", config_path.display());
        }
    }
    Ok(())
}

async fn print_guild(session: &SessionData, query: Option<&str>) -> Result<(), WarroomError> {
    let snapshot = load_snapshot(session.relay.as_ref(), session.guild_id()).await?;
    let guild_id = snapshot
        .guild
        .as_ref()
        .map(|g| g.id.clone())
        .unwrap_or_default();
    println!("{} ({})", snapshot.guild_name(), guild_id);

    for row in snapshot.tree().rows(&HashSet::new()) {
        match row {
            TreeRow::RootHeader => println!("(no category)"),
            TreeRow::Category { id, name, .. } => println!("{}  [{}]", name.to_uppercase(), id),
            TreeRow::Channel {
                id,
                name,
                icon,
                nested,
            } => {
                let indent = if nested { "    " } else { "  " };
                println!("{}{} {}  [{}]", indent, icon, name, id);
            }
        }
    }

    if let Some(query) = query {
        let members = filter_members(&snapshot.members, query);
        println!();
        println!("Members ({}):", members.len());
        for member in members {
            let roles: Vec<&str> = member
                .roles
                .iter()
                .map(|r| snapshot.role_name(r))
                .collect();
            println!(
                "  {}  {}  {}  [{}]",
                member.display_name(),
                member.tag,
                member.id,
                roles.join(", ")
            );
        }
    }
    Ok(())
}

/// Asks on stdin; `NONINTERACTIVE` answers no.
fn confirm(question: &str) -> Result<bool, WarroomError> {
    if std::env::var_os("NONINTERACTIVE").is_some() {
        return Ok(false);
    }
    println!("{} [y/N]", question);
    let mut buf = String::new();
    stdin().read_line(&mut buf)?;
    Ok(buf.trim().eq_ignore_ascii_case("y"))
}

/// Loads the guild and selects `id` as a channel or category.
async fn select_target(
    state: &mut AppState,
    relay: &dyn Relay,
    id: &str,
) -> Result<(), WarroomError> {
    let snapshot = load_snapshot(relay, state.config.guild_id().map(str::to_string)).await?;
    let kind = if snapshot.find_category(id).is_some() {
        SelectionKind::Category
    } else {
        SelectionKind::Channel
    };
    state.replace_snapshot(snapshot);
    state.select_item(kind, id);
    Ok(())
}

async fn run_action(command: Command, session: &SessionData) -> Result<(), WarroomError> {
    let relay = session.relay.as_ref();
    let mut state = AppState::new(session.config.clone());

    let action = match command {
        Command::Rename { channel_id, name } => {
            select_target(&mut state, relay, &channel_id).await?;
            Action::Rename { name }
        }
        Command::Move {
            channel_id,
            parent_id,
        } => {
            select_target(&mut state, relay, &channel_id).await?;
            Action::Move { parent_id }
        }
        Command::Delete { channel_id, yes } => {
            select_target(&mut state, relay, &channel_id).await?;
            let confirmed = yes || confirm(&format!("Delete {}?", state.selected_title()))?;
            Action::Delete { confirmed }
        }
        Command::Create { target } => match target {
            CreateTarget::Channel { name, parent, kind } => Action::CreateChannel {
                name,
                parent_id: parent,
                kind,
            },
            CreateTarget::Category { name } => Action::CreateCategory { name },
            CreateTarget::Role { name } => Action::CreateRole { name },
        },
        Command::RoleRemove { user_id, role_id } => Action::RemoveMemberRole { user_id, role_id },
        Command::Exec { name, options } => Action::ExecuteCommand { name, options },
        Command::Snapshot => Action::TakeSnapshot,
        _ => return Err(WarroomError::validation("Not an action")),
    };

    let description = action.clone().prepare(&state)?.describe();
    let (response, reload_error) = dispatcher::dispatch(&mut state, relay, action).await?;
    cli_messages::print_response(&description, &response);
    if let Some(e) = reload_error {
        print_cmd_warn!("Reload failed", "{}", e);
    }
    response.into_success().map(|_| ())
}

async fn run_modules(action: ModulesCommand, session: &SessionData) -> Result<(), WarroomError> {
    let gateway = session.gateway.as_ref();
    let update = match action {
        ModulesCommand::List => {
            print_module_list(&modules::list_modules(gateway).await?);
            return Ok(());
        }
        ModulesCommand::Config { name } => {
            println!("{}", modules::edit_config(gateway, &name).await?);
            return Ok(());
        }
        ModulesCommand::SetConfig { name, json } => {
            let response = modules::save_config(gateway, &name, &json).await?;
            cli_messages::print_response(&format!("Save {} config", name), &response);
            return response.into_success().map(|_| ());
        }
        ModulesCommand::Enable { name } => (
            format!("Enable {}", name),
            modules::toggle_active(gateway, &name, true).await?,
        ),
        ModulesCommand::Disable { name } => (
            format!("Disable {}", name),
            modules::toggle_active(gateway, &name, false).await?,
        ),
        ModulesCommand::Lock { name, reason } => (
            format!("Lock {}", name),
            modules::lock(gateway, &name, &reason).await?,
        ),
        ModulesCommand::Unlock { name } => (
            format!("Unlock {}", name),
            modules::unlock(gateway, &name).await?,
        ),
    };

    let (description, update) = update;
    cli_messages::print_response(&description, &update.response);
    print_module_list(&update.modules);
    update.response.into_success().map(|_| ())
}

fn print_module_list(modules: &[modules::ModuleInfo]) {
    for module in modules {
        let mut line = format!("{:<20} {:<8}", module.name, module.state_label());
        if !module.owner.is_empty() {
            line.push_str(&format!(" @{}", module.owner));
        }
        if let Some(reason) = module.lock_reason.as_deref().filter(|_| module.locked) {
            line.push_str(&format!(" (locked: {})", reason));
        } else if !module.description.is_empty() {
            line.push_str(&format!("  {}", module.description));
        }
        println!("{}", line);
    }
}
