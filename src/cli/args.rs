use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Record product sales and report on them over a REST API",
    long_about = "Stores products and sales records in SQLite and serves a filterable, paginated list endpoint plus aggregation by category or month.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long,
        env = "SALES_DATA_DIR",
        default_value = ".sales/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long = "log-file",
        env = "SALES_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "log-sql",
        env = "SALES_LOG_SQL",
        default_value_t = false,
        help = "Log every executed SQL statement with its duration (debug level)"
    )]
    pub log_sql: bool,

    #[arg(
        long = "api-listen",
        env = "SALES_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8000",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long = "default-limit",
        env = "SALES_DEFAULT_LIMIT",
        value_name = "N",
        help = "Page size used when a list request carries no valid limit (unpaginated if unset)"
    )]
    pub default_limit: Option<u64>,

    #[arg(
        long = "max-limit",
        env = "SALES_MAX_LIMIT",
        value_name = "N",
        help = "Upper bound applied to the requested page size"
    )]
    pub max_limit: Option<u64>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
