// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bounded subprocess execution shared by the terraform and kubectl clients.

use std::io;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::error::UpstreamError;

/// Maximum stdout or stderr captured per stream (16 MiB).
///
/// stdout beyond this is an error since it is parsed; stderr is truncated.
const MAX_OUTPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Captured output of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

/// Render `program args...` for logs and error messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args`, optionally feeding `stdin`, within `timeout`.
///
/// The stdin write, the wait, and both output drains share one deadline.
/// A non-zero exit is an error carrying the trimmed stderr. On timeout the
/// child is killed when dropped.
pub async fn run_command(
    program: &str,
    args: &[String],
    stdin: Option<&str>,
    timeout: Duration,
) -> Result<CommandOutput, UpstreamError> {
    let command = display_command(program, args);
    tracing::debug!(command = %command, "Running external command");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let mut child = cmd.spawn().map_err(|source| UpstreamError::Spawn {
        command: command.clone(),
        source,
    })?;

    let stdin_pipe = child.stdin.take();
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    let write_stdin = async {
        if let (Some(input), Some(mut pipe)) = (stdin, stdin_pipe) {
            // The child may exit before reading everything; its exit status decides.
            if let Err(e) = pipe.write_all(input.as_bytes()).await {
                tracing::debug!(command = %command, error = %e, "stdin closed early");
            }
        }
    };
    let io = async {
        let ((), status, stdout, stderr) = tokio::join!(
            write_stdin,
            child.wait(),
            read_stream(stdout_pipe),
            read_stream(stderr_pipe),
        );
        (status, stdout, stderr)
    };

    let outcome = tokio::time::timeout(timeout, io).await;
    let (status, stdout, stderr) = match outcome {
        Ok(result) => result,
        Err(_elapsed) => {
            tracing::warn!(command = %command, ?timeout, "External command timed out");
            return Err(UpstreamError::Timeout {
                command,
                elapsed: start.elapsed(),
            });
        }
    };

    let io_error = |source: io::Error| UpstreamError::Io {
        command: command.clone(),
        source,
    };
    let status = status.map_err(io_error)?;
    let stdout = stdout.map_err(io_error)?;
    let stderr = stderr.map_err(io_error)?;
    let duration = start.elapsed();

    if stderr.overflow > 0 {
        tracing::warn!(
            command = %command,
            discarded_bytes = stderr.overflow,
            "stderr exceeded capture limit and was truncated"
        );
    }
    let stderr = String::from_utf8_lossy(&stderr.bytes).into_owned();

    if !status.success() {
        return Err(UpstreamError::Failed {
            command,
            code: status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        });
    }

    if stdout.overflow > 0 {
        return Err(UpstreamError::OutputTooLarge {
            command,
            limit: MAX_OUTPUT_BYTES,
            total: MAX_OUTPUT_BYTES + stdout.overflow,
        });
    }
    let stdout = String::from_utf8_lossy(&stdout.bytes).into_owned();

    tracing::debug!(command = %command, duration_ms = duration.as_millis() as u64, "External command finished");
    Ok(CommandOutput {
        stdout,
        stderr,
        duration,
    })
}

/// Bytes captured from one stream, plus how many were discarded past the cap.
#[derive(Debug, Default)]
struct Captured {
    bytes: Vec<u8>,
    overflow: u64,
}

/// Read up to [`MAX_OUTPUT_BYTES`], then drain the rest so the child never
/// blocks on a full pipe.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> io::Result<Captured> {
    let Some(mut h) = handle else {
        return Ok(Captured::default());
    };
    let mut bytes = Vec::new();
    (&mut h).take(MAX_OUTPUT_BYTES).read_to_end(&mut bytes).await?;
    let overflow = tokio::io::copy(&mut h, &mut tokio::io::sink()).await?;
    Ok(Captured { bytes, overflow })
}

#[cfg(all(test, unix))]
#[path = "subprocess_tests.rs"]
mod tests;
