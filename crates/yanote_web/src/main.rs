//! YaNote web server entry point.

use log::{error, info};
use std::error::Error;
use tokio::signal;
use yanote_core::db::open_db;
use yanote_core::{init_console_logging, init_logging};
use yanote_web::config::WebConfig;
use yanote_web::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let config = WebConfig::load()?;
    match config.logging.dir.as_deref() {
        Some(dir) => init_logging(&config.logging.level, dir)?,
        None => init_console_logging(&config.logging.level)?,
    }
    info!(
        "event=server_start module=web status=start version={}",
        yanote_core::core_version()
    );

    let conn = open_db(&config.database.path)?;
    let addr = config.bind_addr();
    let app = create_router(AppState::new(config, conn));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("event=server_listen module=web status=ok addr={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("event=signal_install module=web status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=signal_install module=web status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("event=server_shutdown module=web status=start signal=ctrl_c"),
        _ = terminate => info!("event=server_shutdown module=web status=start signal=sigterm"),
    }
}
