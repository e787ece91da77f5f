//! The command loop: reads request lines, dispatches, writes result records.
//!
//! Strictly one request at a time, to completion, in arrival order. A failed
//! request becomes an `^error` record and the loop keeps going; only
//! transport I/O errors terminate it.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::error::{MicmdError, Result};
use crate::record::ResultRecord;
use crate::registry::CommandRegistry;
use crate::session::DebugSession;
use crate::wire;

/// End-of-output-block marker controllers key on.
pub const OUTPUT_TERMINATOR: &str = "(gdb)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Emit the `(gdb)` terminator line after every result record.
    pub emit_terminator: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            emit_terminator: true,
        }
    }
}

/// One full `Received -> Parsed -> Dispatched -> {Succeeded | Failed}` step.
///
/// Every recoverable failure is mapped to an `^error` record here, so the
/// caller always has exactly one record to write. The request token is
/// extracted best-effort up front and echoed even on parse failures.
#[must_use]
pub fn dispatch_request_line(
    line: &str,
    registry: &CommandRegistry,
    session: &mut DebugSession,
) -> ResultRecord {
    let token = wire::peek_token(line);
    match run_request(line, registry, session) {
        Ok(record) => record,
        Err(error) => {
            warn!(%error, "request failed");
            ResultRecord::error(&error.to_string()).with_token(token)
        }
    }
}

fn run_request(
    line: &str,
    registry: &CommandRegistry,
    session: &mut DebugSession,
) -> Result<ResultRecord> {
    let request = wire::parse_request(line)?;
    let handler = registry.resolve(&request.command)?;
    let fields = handler.invoke(session, &request.args)?;
    Ok(ResultRecord::done(fields).with_token(request.token))
}

/// Drives the loop until the reader reaches end of input.
///
/// Generic over the transport so the embedding binary runs it on
/// stdin/stdout and tests run it over in-memory pipes. Blank lines are
/// skipped; everything else produces exactly one result record (plus the
/// terminator when enabled), written as a whole line in a single write.
///
/// # Errors
/// Only transport I/O failures; a failed command never ends the loop.
pub async fn run_command_loop<R, W>(
    reader: R,
    mut writer: W,
    registry: &CommandRegistry,
    session: &mut DebugSession,
    options: LoopOptions,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.map_err(MicmdError::Io)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("MI <- {line}");
        let record = dispatch_request_line(line, registry, session);
        let rendered = wire::render_record(&record);
        debug!("MI -> {rendered}");
        write_line(&mut writer, &rendered).await?;
        if options.emit_terminator {
            write_line(&mut writer, OUTPUT_TERMINATOR).await?;
        }
    }
    Ok(())
}

async fn write_line<W>(writer: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut payload = String::with_capacity(line.len() + 1);
    payload.push_str(line);
    payload.push('\n');
    writer
        .write_all(payload.as_bytes())
        .await
        .map_err(MicmdError::Io)?;
    writer.flush().await.map_err(MicmdError::Io)
}
