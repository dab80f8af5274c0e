use se_bus::{BroadcastBus, ChannelHub, SubscriptionFilter, UpdateBus};
use se_config::Config;
use se_server::{
    AppState, RelayConfig, ServerError, ServerErrorResult, ShutdownCoordinator, build_router,
    logger,
};

use std::error::Error;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    run().await?;
    Ok(())
}

async fn run() -> ServerErrorResult<()> {
    let config = Config::load()?;
    config.validate()?;

    // Logger first, so everything after is recorded
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting se-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let bus = BroadcastBus::new(
        ChannelHub::new(config.bus.hub_config()),
        config.bus.channel()?,
    );

    // Audit trail of every refresh event crossing the bus
    let audit = bus.subscribe_filtered(
        SubscriptionFilter::new().refresh_only(),
        Box::new(|message| {
            log::debug!(
                "Refresh event {} at {}",
                message.event_type(),
                message.timestamp().to_rfc3339()
            );
        }),
    );

    let shutdown = ShutdownCoordinator::new();

    let app_state = AppState {
        bus: bus.clone(),
        shutdown: shutdown.clone(),
        relay: RelayConfig::from(&config.server),
        static_dir: config.static_dir_path()?,
    };

    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| ServerError::io(format!("Failed to bind {bind_addr}"), e))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| ServerError::io("Failed to read bound address", e))?;
    info!("Server listening on {}", local_addr);

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    });

    let mut shutdown_guard = shutdown.subscribe_guard();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_guard.wait().await;
        })
        .await
        .map_err(|e| ServerError::io("Server error", e))?;

    audit.dispose();
    bus.hub().shutdown();
    info!("Graceful shutdown complete");

    Ok(())
}
