use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use voicevars::{Participant, PlaceholderExtractor, ProfileStore, SessionBootstrap, SessionPrompts, VariableHandler};

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, TemplateArgs};
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("voicevars")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("voicevars.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let profile_path = cli.profiles.as_deref().unwrap_or(config.profile_path.as_path());
    if cli.is_verbose() {
        println!("{} {}", "Profile store:".yellow(), profile_path.display());
    }

    match &cli.command {
        Commands::Resolve { user, templates, json } => handle_resolve_command(user, templates, *json, profile_path, config),
        Commands::Extract { text, file } => handle_extract_command(text.as_deref(), file.as_deref()),
        Commands::Profile { user } => handle_profile_command(user, profile_path),
        Commands::Session { participant, json } => handle_session_command(participant, *json, profile_path, config),
    }
}

/// Inline text wins; otherwise read the file if one was given.
fn read_template(inline: Option<&str>, file: Option<&Path>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text.to_string())),
        (None, Some(path)) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read template {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn handle_resolve_command(
    user: &str,
    templates: &TemplateArgs,
    json: bool,
    profile_path: &Path,
    config: &Config,
) -> Result<()> {
    info!("Resolving templates for user: {}", user);
    let first_message = read_template(templates.first_message.as_deref(), templates.first_message_file.as_deref())?;
    let system_prompt = read_template(templates.system_prompt.as_deref(), templates.system_prompt_file.as_deref())?;

    let mut handler = VariableHandler::new()
        .with_identity_variable(config.identity_variable.clone())
        .with_mode(config.mode);
    let (first, system) =
        handler.load_and_resolve(user, first_message.as_deref(), system_prompt.as_deref(), profile_path);

    if json {
        let output = serde_json::json!({
            "first_message": first,
            "system_prompt": system,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "First message:".green());
        println!("{}", first);
        println!("{}", "System prompt:".green());
        println!("{}", system);
    }
    Ok(())
}

fn handle_extract_command(text: Option<&str>, file: Option<&Path>) -> Result<()> {
    let template = read_template(text, file)?.unwrap_or_default();
    let names = PlaceholderExtractor::extract(&template);
    info!("Found {} placeholders", names.len());

    if names.is_empty() {
        println!("{}", "No placeholders found".yellow());
    }
    for name in names {
        println!("{{{}}}", name.cyan());
    }
    Ok(())
}

fn handle_profile_command(user: &str, profile_path: &Path) -> Result<()> {
    info!("Showing profile for user: {}", user);
    let record = ProfileStore::read_record(profile_path, user).context("Failed to read profile store")?;

    let Some(record) = record else {
        println!("{} {}", "No profile for:".red(), user);
        return Ok(());
    };

    println!("{} {}", "Profile for:".green(), user);
    let mut fields: Vec<_> = record.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in fields {
        println!("  {}: {}", name.cyan(), value);
    }
    Ok(())
}

fn handle_session_command(participant_path: &Path, json: bool, profile_path: &Path, config: &Config) -> Result<()> {
    info!("Preparing session from: {}", participant_path.display());
    let participant = Participant::from_file(participant_path)
        .with_context(|| format!("Failed to load participant from {}", participant_path.display()))?;

    let bootstrap = SessionBootstrap::new(config.session_settings(Some(profile_path)));
    let prompts = bootstrap.prepare(&participant);

    if json {
        println!("{}", serde_json::to_string_pretty(&prompts)?);
    } else {
        print_session(&prompts);
    }
    Ok(())
}

fn print_session(prompts: &SessionPrompts) {
    println!("{} {}", "User:".green(), prompts.user);
    println!("{}", "Greeting:".green());
    println!("{}", prompts.greeting);
    println!("{}", "Instructions:".green());
    println!("{}", prompts.instructions);
    println!("{} {}", "Inactivity prompt:".green(), prompts.inactivity_prompt);
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = config::load_config(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
