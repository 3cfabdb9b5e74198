//! Line-oriented front-end over one dashboard session.

pub mod commands;
mod render;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::sensing::{ReadingSource, Source};
use crate::session::SessionHandle;
use crate::settings::SettingsStore;

use commands::{dispatch, Command, Flow};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

/// Read commands from stdin until `quit` or end of input.
pub async fn run(
    session: SessionHandle,
    mut source: Source,
    settings: &SettingsStore,
) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    log_info!("Reading from {}", source.describe());
    {
        let guard = session.lock().await;
        stdout
            .write_all(render::page(&guard).as_bytes())
            .await
            .context("failed to write to stdout")?;
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                stdout.write_all(format!("{err}\n").as_bytes()).await?;
                continue;
            }
        };

        let mut guard = session.lock().await;
        let (flow, output) = match dispatch(&mut guard, &mut source, settings, command).await {
            Ok(result) => result,
            Err(err) => {
                log_error!("command failed: {err:#}");
                (Flow::Continue, format!("error: {err:#}\n"))
            }
        };

        let mut text = output;
        text.push_str(&render::notices(&guard.take_notices()));
        stdout.write_all(text.as_bytes()).await?;

        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}
