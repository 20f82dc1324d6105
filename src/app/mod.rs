mod wiring;

use crate::{cli, context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
    pub storage: storage::SqliteStorage,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let cli = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::tracing::init(ctx.log_file.as_deref());
        log::info!("🚀 Starting sales-data");
        log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
        if let Some(path) = ctx.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }

        wiring::init_data_dir(&ctx).context("initializing data dir")?;
        let storage = wiring::init_storage(&ctx)?;

        Ok((Self { ctx, storage }, cli))
    }
}

pub async fn run_server(app: App) -> Result<()> {
    log::info!("🌐 REST API: http://{}", app.ctx.api_listen);
    match app.ctx.pagination.default_limit {
        Some(limit) => log::info!("📄 Default page size: {}", limit),
        None => log::info!("📄 Lists are unpaginated unless a limit is requested"),
    }
    if app.ctx.log_sql {
        log::info!("🔎 SQL statement logging enabled (debug level)");
    }

    let shutdown = CancellationToken::new();
    let rest_shutdown = shutdown.clone();
    let mut rest_handle = tokio::spawn(rest::serve(
        app.ctx.api_listen,
        app.storage,
        app.ctx.pagination,
        rest_shutdown,
    ));

    let joined = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            shutdown.cancel();
            rest_handle.await
        }
        joined = &mut rest_handle => joined,
    };
    joined.context("joining REST server")??;

    log::info!("✅ Shutdown complete");
    Ok(())
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    match &cli.cmd {
        None | Some(cli::Command::Serve) => run_server(app).await,
        Some(cmd) => cmd.run(&app.ctx, &app.storage),
    }
}
