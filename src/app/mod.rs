// ==========================================
// Billing Hub - application layer
// ==========================================
// Wires the store, repositories and API facades together and exposes the
// HTTP router.
// ==========================================

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
