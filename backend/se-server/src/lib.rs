pub mod app_state;
pub mod error;
pub mod events;
pub mod health;
pub mod logger;
pub mod relay_connection;
pub mod relay_handler;
pub mod routes;
pub mod shutdown_coordinator;
pub mod shutdown_guard;


pub use app_state::{AppState, RelayConfig};
pub use error::{Result as ServerErrorResult, ServerError};
pub use relay_connection::RelayConnection;
pub use routes::build_router;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
