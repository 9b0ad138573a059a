use std::fs;
use std::io::{self, IsTerminal, Read};

use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use trakt_sync_config::{
    KNOWN_KEYS, SyncConfig, config_exists, get_config_value, load_config, mask_secret,
    open_in_editor, resolve_access_token, resolve_api_base, resolve_client_id,
    resolve_json_output, resolve_media_type, save_config, set_config_value,
};
use trakt_sync_core::{RawParameters, ResultCard, SyncError, SyncReport, SyncResult, form};
use trakt_sync_history::{HistorySync, ReqwestTransport, card_for};

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the widget settings form as JSON
    Form,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Open config file in editor
    Edit,
}

#[derive(Debug, Parser)]
#[command(name = "trakt-sync")]
#[command(version, about = "Record watched movies and episodes in your Trakt history", long_about = None)]
struct Cli {
    /// Media type of the given ids: movie or episode
    #[arg(long = "type", value_name = "TYPE")]
    media_type: Option<String>,
    /// Read TMDB ids from a file, one per line
    #[arg(long)]
    input: Option<String>,
    /// Print result cards as JSON
    #[arg(long)]
    json: bool,
    #[arg(long)]
    client_id: Option<String>,
    #[arg(long)]
    access_token: Option<String>,
    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
    #[arg(value_name = "TMDB_ID")]
    ids: Vec<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Default)]
struct Tally {
    synced: usize,
    unchanged: usize,
    failed: usize,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(err) = handle_config_command(action) {
                exit_with(&err);
            }
            return;
        }
        Some(Commands::Form) => {
            match serde_json::to_string_pretty(form::FORM_FIELDS) {
                Ok(json) => println!("{json}"),
                Err(err) => exit_with(&SyncError::InvalidInput(err.to_string())),
            }
            return;
        }
        None => {}
    }

    let mut config = load_config().unwrap_or_else(|err| exit_with(&err));

    let ids = gather_inputs(&cli).unwrap_or_else(|err| exit_with(&err));
    if ids.is_empty() {
        exit_with(&SyncError::InvalidInput("no TMDB ids provided".to_string()));
    }

    let (client_id, access_token) = resolve_or_prompt_credentials(&cli, &mut config);
    let media_type = cli.media_type.clone().or_else(|| resolve_media_type(&config));
    let api_base = resolve_api_base(&config);
    if let Err(err) = trakt_sync_core::validate_url(&api_base) {
        exit_with(&err);
    }
    let json = cli.json || resolve_json_output(&config).unwrap_or(false);

    let transport = ReqwestTransport::new().unwrap_or_else(|err| exit_with(&err));
    let sync = HistorySync::new(transport, api_base);
    debug!(count = ids.len(), "syncing history");

    let mut tally = Tally::default();
    for id in ids {
        let params = RawParameters {
            client_id: client_id.clone(),
            access_token: access_token.clone(),
            media_type: media_type.clone(),
            external_id: Some(id),
        };
        let report = sync.sync(&params).await;
        match &report {
            SyncReport::Recorded { .. } => tally.synced += 1,
            SyncReport::Unchanged { .. } => tally.unchanged += 1,
            SyncReport::Failed(_) | SyncReport::NeedsConfiguration { .. } => tally.failed += 1,
        }

        let card = card_for(&report);
        if json {
            print_json(&card);
        } else {
            print_card(&card, &report);
        }
    }

    if !json {
        print_summary(&tally);
    }
    if tally.failed > 0 {
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(err: &SyncError) -> ! {
    eprintln!("{} {err}", style("Error:").red());
    std::process::exit(1);
}

fn gather_inputs(cli: &Cli) -> SyncResult<Vec<String>> {
    let mut ids = cli.ids.clone();

    if let Some(path) = &cli.input {
        let content = fs::read_to_string(path)
            .map_err(|err| SyncError::InvalidInput(format!("failed to read input file: {err}")))?;
        ids.extend(parse_lines(&content));
    }

    if ids.is_empty() && !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| SyncError::InvalidInput(format!("failed to read stdin: {err}")))?;
        ids.extend(parse_lines(&buffer));
    }

    Ok(ids)
}

fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

fn resolve_or_prompt_credentials(
    cli: &Cli,
    config: &mut SyncConfig,
) -> (Option<String>, Option<String>) {
    let client_id = cli.client_id.clone().or_else(|| resolve_client_id(config));
    let access_token = cli
        .access_token
        .clone()
        .or_else(|| resolve_access_token(config));

    // Only a first run without any config file gets interactive setup.
    if (client_id.is_some() && access_token.is_some())
        || config_exists().unwrap_or(true)
        || !io::stdin().is_terminal()
    {
        return (client_id, access_token);
    }

    let theme = ColorfulTheme::default();
    println!(
        "{} Let's configure your Trakt credentials",
        style("First-time setup:").bold().cyan()
    );

    if client_id.is_none() {
        let input: String = Input::with_theme(&theme)
            .with_prompt(form::CLIENT_ID.label)
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default();
        if !input.trim().is_empty() {
            config.api.client_id = Some(input.trim().to_string());
        }
    }
    if access_token.is_none() {
        let input = Password::with_theme(&theme)
            .with_prompt(form::ACCESS_TOKEN.label)
            .allow_empty_password(true)
            .interact()
            .unwrap_or_default();
        if !input.trim().is_empty() {
            config.api.access_token = Some(input.trim().to_string());
        }
    }

    if let Err(err) = save_config(config) {
        eprintln!("{} {err}", style("Warning:").yellow());
    } else {
        println!(
            "{} Config file created at ~/.trakt-sync/config.toml",
            style("✓").green()
        );
    }

    (
        client_id.or_else(|| config.api.client_id.clone()),
        access_token.or_else(|| config.api.access_token.clone()),
    )
}

fn handle_config_command(action: ConfigAction) -> SyncResult<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config()?;
            match get_config_value(&config, &key) {
                Some(v) => println!("{key} = {v}"),
                None => println!("{key} = <null>"),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            set_config_value(&key, &value)?;
            let shown = if key == "api.access_token" {
                mask_secret(&value)
            } else {
                value
            };
            println!("{} Set {key} = {shown}", style("✓").green());
            Ok(())
        }
        ConfigAction::List => {
            let config = load_config()?;
            println!("Current configuration:");
            let mut section = "";
            for key in KNOWN_KEYS {
                let (head, name) = key.split_once('.').unwrap_or(("", *key));
                if head != section {
                    println!("\n[{head}]");
                    section = head;
                }
                let value = get_config_value(&config, key).map(|value| {
                    if *key == "api.access_token" {
                        mask_secret(&value)
                    } else {
                        value
                    }
                });
                println!("{name} = {}", value.as_deref().unwrap_or("<null>"));
            }
            Ok(())
        }
        ConfigAction::Edit => open_in_editor(),
    }
}

fn print_json(card: &ResultCard) {
    match serde_json::to_string(&[card]) {
        Ok(line) => println!("{line}"),
        Err(err) => eprintln!("{} {err}", style("Failed").red()),
    }
}

fn print_card(card: &ResultCard, report: &SyncReport) {
    let title = match report {
        SyncReport::Recorded { .. } => style(&card.title).green(),
        SyncReport::Unchanged { .. } => style(&card.title).yellow(),
        SyncReport::Failed(_) | SyncReport::NeedsConfiguration { .. } => style(&card.title).red(),
    };
    println!("{title}");
    println!("  {}", card.description);
    if !card.link.is_empty() {
        println!("  {} {}", style("Link:").dim(), card.link);
    }
    if matches!(report, SyncReport::NeedsConfiguration { .. }) {
        println!(
            "  {} trakt-sync config set api.client_id <ID>",
            style("Hint:").dim()
        );
    }
    println!();
}

fn print_summary(tally: &Tally) {
    println!(
        "{} Total: {} | Synced: {} | Unchanged: {} | Failed: {}",
        style("Summary:").bold(),
        tally.synced + tally.unchanged + tally.failed,
        tally.synced,
        tally.unchanged,
        tally.failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_skips_blanks_and_comments() {
        let content = "27205\n\n  603  \n# watched last week\n";
        assert_eq!(parse_lines(content), vec!["27205", "603"]);
    }

    #[test]
    fn cli_accepts_type_and_ids() {
        let cli = Cli::try_parse_from(["trakt-sync", "--type", "episode", "62085", "62086"]).unwrap();
        assert_eq!(cli.media_type.as_deref(), Some("episode"));
        assert_eq!(cli.ids, vec!["62085", "62086"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_config_set() {
        let cli =
            Cli::try_parse_from(["trakt-sync", "config", "set", "api.client_id", "abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Set { .. }
            })
        ));
    }
}
