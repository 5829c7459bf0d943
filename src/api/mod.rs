//! HTTP API module: routes, handlers, and shared state.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
