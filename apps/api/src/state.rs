use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds configuration only. Layout calls own all of their working state, so nothing
/// mutable is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
