use std::path::PathBuf;

use crate::rest::pagination::PaginationConfig;

/// Runtime settings resolved from the command line and environment.
#[derive(Clone, Debug)]
pub struct Context {
    pub data_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub log_sql: bool,
    pub reset: bool,
    pub api_listen: std::net::SocketAddr,
    pub pagination: PaginationConfig,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: PathBuf::from(&cli.data_dir),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            log_sql: cli.log_sql,
            reset: cli.reset,
            api_listen: cli.api_listen,
            pagination: PaginationConfig {
                default_limit: cli.default_limit,
                max_limit: cli.max_limit,
            },
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("sales.sqlite")
    }
}
