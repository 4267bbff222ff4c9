//! Process supervision for the managed binaries.
//!
//! Two completion modes: run-to-completion for one-shot commands, and
//! wait-for-readiness for long-running servers. In both modes child
//! output is echoed to the parent's own stdout/stderr in real time while
//! being accumulated for error reporting.

use crate::command::CommandSpec;
use crate::error::ProcessError;
use crate::process::cancel::CancelToken;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Outcome of one supervised invocation.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// `None` when the child is still running (readiness mode).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub ready_observed: bool,
}

/// How a supervised invocation is considered complete.
#[derive(Debug, Clone)]
pub enum Completion {
    /// Wait for process exit; code 0 resolves, anything else rejects.
    WaitForExit,
    /// Resolve as soon as either output stream matches `pattern`, leaving
    /// the child running; exit before a match rejects. `cancel` kills the
    /// child once fired.
    WaitForReady {
        pattern: Regex,
        cancel: CancelToken,
    },
}

/// Supervisor options: explicit binary resolution instead of mutating the
/// process-wide PATH, plus extra environment for the children.
#[derive(Debug, Clone, Default)]
pub struct SupervisorOptions {
    /// Directory the managed binaries live in; `None` defers to PATH.
    pub bin_dir: Option<PathBuf>,
    /// Extra environment variables for every spawned child.
    pub env: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct Supervisor {
    options: SupervisorOptions,
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl Supervisor {
    pub fn new(options: SupervisorOptions) -> Self {
        Self { options }
    }

    /// Resolve a binary name against the configured directory.
    fn resolve(&self, binary: &str) -> PathBuf {
        match &self.options.bin_dir {
            Some(dir) => dir.join(binary),
            None => PathBuf::from(binary),
        }
    }

    fn spawn(&self, spec: &CommandSpec) -> Result<tokio::process::Child, ProcessError> {
        let program = self.resolve(&spec.binary);
        debug!(binary = %spec.binary, argv = ?spec.argv(), "spawning");
        Command::new(&program)
            .args(spec.argv())
            .envs(self.options.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                binary: spec.binary.clone(),
                source,
            })
    }

    /// Supervise `spec` under the given completion mode.
    pub async fn execute(
        &self,
        spec: &CommandSpec,
        completion: Completion,
    ) -> Result<ProcessResult, ProcessError> {
        match completion {
            Completion::WaitForExit => self.run(spec).await,
            Completion::WaitForReady { pattern, cancel } => {
                self.start(spec, &pattern, &cancel).await
            }
        }
    }

    /// One-shot mode: accumulate output, wait for exit, resolve on code 0.
    pub async fn run(&self, spec: &CommandSpec) -> Result<ProcessResult, ProcessError> {
        let mut child = self.spawn(spec)?;
        let stdout_pump = pump(child.stdout.take(), Stream::Out);
        let stderr_pump = pump(child.stderr.take(), Stream::Err);

        let status = child.wait().await.map_err(|source| ProcessError::Wait {
            binary: spec.binary.clone(),
            source,
        })?;
        let stdout = stdout_pump.await.unwrap_or_default();
        let stderr = stderr_pump.await.unwrap_or_default();

        if status.success() {
            Ok(ProcessResult {
                exit_code: status.code(),
                stdout,
                stderr,
                ready_observed: false,
            })
        } else {
            Err(ProcessError::Exit {
                binary: spec.binary.clone(),
                exit_code: status.code(),
                stdout,
                stderr,
            })
        }
    }

    /// Server mode: resolve on the first output line matching `pattern`,
    /// leaving the child running under a detached drain task. Exit before
    /// a match, or cancellation, rejects.
    pub async fn start(
        &self,
        spec: &CommandSpec,
        pattern: &Regex,
        cancel: &CancelToken,
    ) -> Result<ProcessResult, ProcessError> {
        let mut child = self.spawn(spec)?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        relay(child.stdout.take(), Stream::Out, tx.clone());
        relay(child.stderr.take(), Stream::Err, tx);

        let mut stdout = String::new();
        let mut stderr = String::new();

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some((stream, line)) => {
                        echo(&stream, &line);
                        match stream {
                            Stream::Out => append_line(&mut stdout, &line),
                            Stream::Err => append_line(&mut stderr, &line),
                        }
                        if pattern.is_match(&line) {
                            info!(binary = %spec.binary, "readiness pattern matched");
                            detach(child, rx, cancel.clone(), spec.binary.clone());
                            return Ok(ProcessResult {
                                exit_code: None,
                                stdout,
                                stderr,
                                ready_observed: true,
                            });
                        }
                    }
                    // Both pipes closed: the child is gone before readiness.
                    None => {
                        let status = child.wait().await.map_err(|source| ProcessError::Wait {
                            binary: spec.binary.clone(),
                            source,
                        })?;
                        return Err(ProcessError::Exit {
                            binary: spec.binary.clone(),
                            exit_code: status.code(),
                            stdout,
                            stderr,
                        });
                    }
                },
                _ = cancel.cancelled() => {
                    warn!(binary = %spec.binary, "cancelled before readiness; killing child");
                    let _ = child.kill().await;
                    return Err(ProcessError::Cancelled {
                        binary: spec.binary.clone(),
                    });
                }
            }
        }
    }
}

fn append_line(acc: &mut String, line: &str) {
    acc.push_str(line);
    acc.push('\n');
}

fn echo(stream: &Stream, line: &str) {
    match stream {
        Stream::Out => println!("{}", line),
        Stream::Err => eprintln!("{}", line),
    }
}

/// Echo and accumulate a pipe until EOF.
fn pump(
    pipe: Option<impl AsyncRead + Unpin + Send + 'static>,
    stream: Stream,
) -> tokio::task::JoinHandle<String> {
    tokio::spawn(async move {
        let mut acc = String::new();
        let Some(pipe) = pipe else {
            return acc;
        };
        let mut lines = BufReader::new(pipe).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            echo(&stream, &line);
            append_line(&mut acc, &line);
        }
        acc
    })
}

/// Forward a pipe's lines into a channel until EOF.
fn relay(
    pipe: Option<impl AsyncRead + Unpin + Send + 'static>,
    stream: Stream,
    tx: mpsc::UnboundedSender<(Stream, String)>,
) {
    tokio::spawn(async move {
        let Some(pipe) = pipe else {
            return;
        };
        let mut lines = BufReader::new(pipe).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send((stream, line)).is_err() {
                break;
            }
        }
    });
}

/// Keep a ready server's output flowing after the caller has resumed,
/// and kill the child when the cancel token fires.
fn detach(
    mut child: tokio::process::Child,
    mut rx: mpsc::UnboundedReceiver<(Stream, String)>,
    cancel: CancelToken,
    binary: String,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some((stream, line)) => echo(&stream, &line),
                    None => {
                        let status = child.wait().await;
                        debug!(binary = %binary, ?status, "server process exited");
                        break;
                    }
                },
                _ = cancel.cancelled() => {
                    info!(binary = %binary, "stopping server process");
                    let _ = child.kill().await;
                    break;
                }
            }
        }
    });
}
