use std::sync::Arc;

use crate::assistant::config::ResolverConfigSource;
use crate::assistant::resolver::Resolver;
use crate::config::Config;
use crate::render::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is immutable after startup; concurrent requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resolver: Arc<Resolver>,
    /// Where each request's `ResolverConfig` snapshot comes from. `Env` in production.
    pub resolver_config: ResolverConfigSource,
    /// Pluggable renderer. Default: BuiltinRenderer. Swap via PDF_RENDER_CMD.
    pub pdf_renderer: Arc<dyn PdfRenderer>,
}
