//! Bounded subprocess execution shared by the local LLM stage and the external PDF renderer.
//!
//! Commands are spawned from an explicit argument vector, never through a shell,
//! so caller-supplied text is always exactly one argument. Every child runs in its
//! own process group. The group is killed when the command exits, when the deadline
//! passes, or when the awaiting future is dropped (client disconnect), so no
//! descendant is left running.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("process timed out after {}s", .0.as_secs_f32())]
    TimedOut(Duration),
}

#[derive(Debug)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub duration: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs `program args...`, optionally feeding `stdin`, and waits at most `timeout`.
///
/// On timeout the child is killed and reaped before returning `ProcessError::TimedOut`.
pub async fn run_command(
    program: &Path,
    args: &[String],
    stdin: Option<Vec<u8>>,
    timeout: Duration,
) -> Result<ProcessOutput, ProcessError> {
    let start = Instant::now();
    let program_name = program.display().to_string();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Own process group, so everything the command forks can be killed with it.
    #[cfg(unix)]
    cmd.process_group(0);

    debug!(program = %program_name, argc = args.len(), "spawning process");

    let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
        program: program_name.clone(),
        source,
    })?;
    // Declared after `child`: dropped first, so the group dies even when this future is dropped.
    let mut group = ProcessGroup::new(child.id());

    // Pipes are drained concurrently with wait() so a large output cannot block the child.
    let stdin_handle = match (child.stdin.take(), stdin) {
        (Some(mut pipe), Some(input)) => Some(tokio::spawn(async move {
            // A child that exits without reading stdin yields EPIPE; its exit status tells the story.
            let _ = pipe.write_all(&input).await;
            let _ = pipe.shutdown().await;
        })),
        _ => None,
    };
    let mut stdout_handle = drain(child.stdout.take());
    let mut stderr_handle = drain(child.stderr.take());

    // One deadline covers the exit AND the pipes: a forked helper holding stdout open
    // must not extend the call.
    let outcome = tokio::time::timeout(timeout, async {
        let status = child.wait().await.map_err(ProcessError::Wait)?;
        // Nothing the command started may outlive it.
        group.kill();
        let stdout = (&mut stdout_handle).await.unwrap_or_default();
        let stderr = (&mut stderr_handle).await.unwrap_or_default();
        Ok::<_, ProcessError>((status, stdout, stderr))
    })
    .await;

    match outcome {
        Ok(result) => {
            let (status, stdout, stderr) = result?;
            let duration = start.elapsed();
            debug!(
                program = %program_name,
                exit_code = ?status.code(),
                duration_ms = duration.as_millis() as u64,
                "process completed"
            );
            Ok(ProcessOutput {
                exit_code: status.code(),
                stdout,
                stderr,
                duration,
            })
        }
        Err(_) => {
            group.kill();
            // `id()` is None once the child has been reaped.
            if child.id().is_some() {
                if let Err(e) = child.kill().await {
                    warn!(program = %program_name, error = %e, "failed to kill timed-out process");
                }
            }
            if let Some(handle) = stdin_handle {
                handle.abort();
            }
            stdout_handle.abort();
            stderr_handle.abort();
            warn!(
                program = %program_name,
                timeout_ms = timeout.as_millis() as u64,
                "process timed out"
            );
            Err(ProcessError::TimedOut(timeout))
        }
    }
}

/// SIGKILLs a child's process group once, explicitly or on drop.
///
/// Only the direct child is covered by `kill_on_drop`; this reaches its descendants.
struct ProcessGroup {
    pgid: Option<u32>,
}

impl ProcessGroup {
    fn new(pid: Option<u32>) -> Self {
        Self { pgid: pid }
    }

    fn kill(&mut self) {
        let Some(pgid) = self.pgid.take() else {
            return;
        };
        #[cfg(unix)]
        {
            let Ok(pgid) = libc::pid_t::try_from(pgid) else {
                return;
            };
            // SAFETY: kill(2) with a negative pid only sends a signal; no memory is touched.
            let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
            if rc != 0 {
                let err = std::io::Error::last_os_error();
                // ESRCH: the whole group is already gone.
                if err.raw_os_error() != Some(libc::ESRCH) {
                    warn!(pgid, error = %err, "failed to kill process group");
                }
            }
        }
        #[cfg(not(unix))]
        let _ = pgid;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        self.kill();
    }
}

fn drain<R>(pipe: Option<R>) -> tokio::task::JoinHandle<Vec<u8>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    })
}
