use crate::export::DEFAULT_OUTPUT;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sncli")]
#[command(about = "Command line interface tool for ServiceNow table APIs and schema export")]
#[command(version)]
#[command(after_help = "Examples:
  sncli connect                                 # Prompt for instance and credentials
  sncli connect --instance dev12345             # Prompt only for the rest
  sncli schema --scope global                   # Export global tables to tables.csv
  sncli schema -s x_acme_app -d -o acme.csv     # Include fields, custom output path
  sncli records incident --limit 5              # Show 5 incident records

Environment Variables:
  SNCLI_INSTANCE   ServiceNow instance name (e.g. dev12345)
  SNCLI_USERNAME   ServiceNow username
  SNCLI_PASSWORD   ServiceNow password")]
pub struct Cli {
    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Custom configuration file path (default: ~/.sncli/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate against an instance and save the credentials
    Connect(ConnectArgs),
    /// Export table, field and relationship metadata of a scope to CSV
    Schema(SchemaArgs),
    /// Fetch records from a table
    Records(RecordsArgs),
}

/// Connection arguments; anything omitted is prompted for
#[derive(Args, Debug)]
#[command(after_help = "Examples:
  sncli connect                                   # Interactive login
  sncli connect --instance dev12345 --username admin")]
pub struct ConnectArgs {
    /// Instance name or host (dev12345, dev12345.service-now.com)
    #[arg(long, env = "SNCLI_INSTANCE")]
    pub instance: Option<String>,

    /// Username to authenticate as
    #[arg(long, env = "SNCLI_USERNAME")]
    pub username: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(long, env = "SNCLI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  sncli schema --scope global                     # Tables in the global scope
  sncli schema --scope x_acme_app --detailed      # Include per-table fields
  sncli schema -s x_acme_app --concurrency 4      # Up to 4 requests in flight")]
pub struct SchemaArgs {
    /// Application scope to crawl ('global' or a scope name such as x_acme_app)
    #[arg(short, long)]
    pub scope: String,

    /// Output CSV file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also fetch the fields of every table
    #[arg(short, long)]
    pub detailed: bool,

    /// Maximum number of per-table requests in flight
    #[arg(long, default_value = "1")]
    pub concurrency: usize,
}

#[derive(Args, Debug)]
#[command(after_help = "Examples:
  sncli records incident                          # First 10 incidents
  sncli records incident --query active=true^priority=1 --limit 20")]
pub struct RecordsArgs {
    /// Table name (e.g. incident, sys_user)
    pub table: String,

    /// Maximum number of records to return
    #[arg(long, default_value = "10")]
    pub limit: u32,

    /// Encoded query passed as sysparm_query
    #[arg(long)]
    pub query: Option<String>,

    /// Maximum display width of a single cell
    #[arg(long, default_value = "40")]
    pub max_width: usize,
}
