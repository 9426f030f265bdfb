use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

use configs::AppConfig;

fn main() -> ExitCode {
    // .env first so RUST_LOG, DATABASE_URL and CONFIG_PATH apply
    dotenv().ok();
    let loaded = AppConfig::load_or_env();
    let format = loaded.as_ref().map(|c| c.server.log_format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(format);

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        error!(event = "panic", thread = thread.name().unwrap_or("unnamed"), message = %info, "unhandled panic");
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        workers = ?cfg.server.worker_threads,
        db_max_connections = cfg.database.max_connections,
        "hogwarts starting"
    );

    rt.block_on(async move {
        tokio::select! {
            res = server::run(cfg) => match res {
                Ok(()) => {
                    info!(event = "stop", "server stopped");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(event = "run_failed", error = %e, "server exited with error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
