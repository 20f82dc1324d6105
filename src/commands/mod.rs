use anyhow::Result;

use crate::cli::Command;
use crate::context;
use crate::populate::{populate, PopulateOptions};
use crate::storage::SqliteStorage;

impl Command {
    /// Runs a one-shot command. `Serve` is handled by the application loop.
    pub fn run(&self, _ctx: &context::Context, storage: &SqliteStorage) -> Result<()> {
        match self {
            Command::Serve => Ok(()),
            Command::Populate { products, records } => {
                let options = PopulateOptions {
                    products: *products,
                    records: *records,
                };
                let summary = populate(
                    storage,
                    options,
                    &mut rand::thread_rng(),
                    chrono::Utc::now(),
                )?;
                log::info!(
                    "✅ Populated {} products and {} sales records",
                    summary.products,
                    summary.records
                );
                Ok(())
            }
        }
    }
}
