/// CLI argument definitions and command dispatch.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::{ApiClient, SearchQuery};
use crate::config::{self, DEFAULT_CONFIG_FILE};
use crate::error::LookupError;
use crate::{render, ui};

/// datashop — look up person records by email, mobile or ID number.
#[derive(Debug, Parser)]
#[command(
    name = "datashop",
    about = "Look up person records by email, mobile or ID number",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path of the config file.
    #[arg(
        long,
        global = true,
        env = "DATASHOP_CONFIG",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the API key and preferred display type.
    Configure(ConfigureArgs),
    /// Look up records by email, mobile or aadhar number.
    Search(SearchArgs),
    /// Show the remaining credits for the configured API key.
    Credits,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Configure(_) => "configure",
            Command::Search(_) => "search",
            Command::Credits => "credits",
        }
    }
}

/// Arguments for `datashop configure`. Missing values are prompted for.
#[derive(Debug, Parser)]
pub struct ConfigureArgs {
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// TABLE or PLAIN.
    #[arg(long, value_name = "TYPE")]
    pub display_type: Option<String>,
}

/// Arguments for `datashop search`.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Lookup type: email, mobile or aadhar. Sent to the service unchanged.
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Value to look up.
    pub query: String,

    /// Ask the service for partially redacted values (true or false).
    pub masked: Option<bool>,

    /// Same as passing `true` for MASKED.
    #[arg(long = "masked", id = "masked_flag")]
    pub masked_flag: bool,
}

impl SearchArgs {
    /// Build the request parameters, rejecting a blank query.
    pub fn to_query(&self) -> Result<SearchQuery, LookupError> {
        if self.query.trim().is_empty() {
            return Err(LookupError::Usage("search query must not be empty".into()));
        }
        Ok(SearchQuery {
            kind: self.kind.clone(),
            query: self.query.clone(),
            masked: self.masked_flag || self.masked.unwrap_or(false),
        })
    }
}

/// Run the parsed command to completion.
pub fn run(cli: &Cli) -> Result<()> {
    debug!(command = cli.command.name(), config = %cli.config.display(), "dispatching");
    match &cli.command {
        Command::Configure(args) => {
            ui::configure(
                &cli.config,
                args.api_key.as_deref(),
                args.display_type.as_deref(),
            )?;
            Ok(())
        }
        Command::Search(args) => search(&cli.config, args),
        Command::Credits => credits(&cli.config),
    }
}

fn search(config_path: &Path, args: &SearchArgs) -> Result<()> {
    let query = args.to_query()?;
    let cfg = config::load(config_path)?;
    let client = ApiClient::from_env(&cfg.api_key)?;

    let pb = ui::spinner("Searching...");
    let result = client.search(&query);
    pb.finish_and_clear();
    let records = result?;

    if records.is_empty() {
        println!("No results found.");
        return Ok(());
    }
    render::print_records(&records, cfg.display()).context("failed to write results")?;
    Ok(())
}

fn credits(config_path: &Path) -> Result<()> {
    let cfg = config::load(config_path)?;
    let client = ApiClient::from_env(&cfg.api_key)?;

    let pb = ui::spinner("Fetching credits...");
    let result = client.credits();
    pb.finish_and_clear();

    println!("Credits: {}", result?);
    Ok(())
}
