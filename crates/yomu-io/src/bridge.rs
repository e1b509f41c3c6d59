//! Newline-delimited JSON link to the host that renders the reader.
//!
//! The host writes one [`HostEvent`] per line and reads one [`UiCommand`]
//! per line back.

use anyhow::Context;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use yomu_types::{AppEvent, HostEvent, UiCommand};

/// Forward host events in order until EOF.
///
/// Lines that do not parse are logged and skipped.
pub async fn read_host_events<R>(reader: R, tx: &AsyncSender<AppEvent>) -> Result<(), anyhow::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => tx
                .send(AppEvent::Host(event))
                .await
                .context("Event loop is gone")?,
            Err(e) => tracing::warn!("Ignoring host line {}: {}", line_no, e),
        }
    }

    tracing::debug!("Host input closed after {} lines", line_no);
    Ok(())
}

pub async fn write_command<W>(writer: &mut W, command: &UiCommand) -> Result<(), anyhow::Error>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(command)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

/// Forward every command from `rx` to the host until the channel closes
pub async fn pump_commands<W>(mut writer: W, rx: AsyncReceiver<UiCommand>) -> Result<(), anyhow::Error>
where
    W: AsyncWrite + Unpin,
{
    while let Ok(command) = rx.recv().await {
        write_command(&mut writer, &command).await?;
    }
    Ok(())
}
