//! Shared application state for axum handlers.

use std::sync::Arc;

use switchboard_app::engine::DispatchEngine;
use switchboard_app::ports::VendorAdapter;

/// Application state shared across all axum handlers.
///
/// Generic over the adapter types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the adapters themselves do not need to be `Clone`
/// — only the `Arc` wrapper is cloned.
pub struct AppState<L, G, W> {
    /// The dispatch engine, shared read-only between runs.
    pub engine: Arc<DispatchEngine<L, G, W>>,
}

impl<L, G, W> Clone for AppState<L, G, W> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<L, G, W> AppState<L, G, W>
where
    L: VendorAdapter + Send + Sync + 'static,
    G: VendorAdapter + Send + Sync + 'static,
    W: VendorAdapter + Send + Sync + 'static,
{
    /// Wrap a fully-wired engine.
    pub fn new(engine: DispatchEngine<L, G, W>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
