use anyhow::{Context as _, Result};

use crate::{context, storage};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.data_dir)?;
    Ok(())
}

pub fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    let sqlite = storage::SqliteStorage::new(ctx.db_path()).with_sql_logging(ctx.log_sql);
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}
