//! HTML → PDF rendering.
//!
//! `AppState` holds an `Arc<dyn PdfRenderer>`, chosen at startup: the external
//! command renderer when `PDF_RENDER_CMD` is set, the builtin one otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::process::ProcessError;

pub mod builtin;
pub mod command;
pub mod handlers;

pub use builtin::BuiltinRenderer;
pub use command::CommandRenderer;

pub const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTML conversion error: {0}")]
    Html(String),

    #[error("PDF build error: {0}")]
    Pdf(String),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("renderer exited with {code:?}: {stderr}")]
    CommandFailed { code: Option<i32>, stderr: String },

    #[error("renderer output is not a PDF document")]
    NotPdf,

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Renders `html` and returns the PDF bytes (always starting with `%PDF-`).
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

pub fn renderer_from_config(config: &Config) -> Arc<dyn PdfRenderer> {
    match &config.pdf_render_cmd {
        Some(program) => {
            info!(
                "PDF renderer: external command {} {:?}",
                program.display(),
                config.pdf_render_args
            );
            Arc::new(
                CommandRenderer::new(program.clone(), config.pdf_render_args.clone())
                    .with_timeout(config.pdf_render_timeout),
            )
        }
        None => {
            info!("PDF renderer: builtin");
            Arc::new(BuiltinRenderer::default())
        }
    }
}
