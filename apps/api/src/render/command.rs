use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::process::run_command;
use crate::render::{PdfRenderer, RenderError, PDF_MAGIC};

const RENDER_TIMEOUT: Duration = Duration::from_secs(60);

/// Delegates to an external HTML renderer: HTML on stdin, PDF on stdout.
///
/// Default arguments `- -` match both `wkhtmltopdf` and `weasyprint`.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRenderer {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            timeout: RENDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PdfRenderer for CommandRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let output = run_command(
            &self.program,
            &self.args,
            Some(html.as_bytes().to_vec()),
            self.timeout,
        )
        .await?;

        if !output.success() {
            let stderr = output.stderr_lossy().trim().to_string();
            warn!(program = %self.program.display(), code = ?output.exit_code, "renderer failed");
            return Err(RenderError::CommandFailed {
                code: output.exit_code,
                stderr,
            });
        }

        if !output.stdout.starts_with(PDF_MAGIC) {
            return Err(RenderError::NotPdf);
        }
        Ok(output.stdout)
    }
}
