use anyhow::Result;

use crate::models::Channel;
use crate::sensing::Source;
use crate::session::{DashboardSession, Notice};
use crate::settings::SettingsStore;
use crate::views::{self, Role, View};

use super::render;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    View(View),
    Refresh,
    Set {
        channel: String,
        min: String,
        max: String,
    },
    Push,
    Suggest(String),
    Trend(String),
    /// `None` switches back to simulated readings.
    Device(Option<String>),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub const HELP: &str = "\
commands:
  view <settings|user|doctor|user-dashboard|doctor-dashboard>
  refresh                      read sensors once
  set <channel> <min> <max>    channel names may contain spaces
  push                         send thresholds to the device
  suggest <text>               doctor pages only
  trend <channel>
  device <url|none>            switch and remember the sensor device
  help | quit
";

impl Command {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "view" | "go" => Command::View(rest.parse()?),
            "refresh" | "r" => Command::Refresh,
            "set" => parse_set(rest)?,
            "push" => Command::Push,
            "suggest" => Command::Suggest(rest.to_string()),
            "trend" if !rest.is_empty() => Command::Trend(rest.to_string()),
            "trend" => return Err("usage: trend <channel>".into()),
            "device" => parse_device(rest)?,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(Some(command))
    }
}

/// The last two words are the bounds; everything before is the channel.
fn parse_set(rest: &str) -> Result<Command, String> {
    let mut words: Vec<&str> = rest.split_whitespace().collect();
    if words.len() < 3 {
        return Err("usage: set <channel> <min> <max>".into());
    }
    let max = words.pop().unwrap_or_default().to_string();
    let min = words.pop().unwrap_or_default().to_string();
    Ok(Command::Set {
        channel: words.join(" "),
        min,
        max,
    })
}

fn parse_device(rest: &str) -> Result<Command, String> {
    match rest {
        "" => Err("usage: device <url|none>".into()),
        "none" | "off" => Ok(Command::Device(None)),
        url => Ok(Command::Device(Some(url.to_string()))),
    }
}

/// Apply `command` to the session and return what to print.
pub async fn dispatch(
    session: &mut DashboardSession,
    source: &mut Source,
    settings: &SettingsStore,
    command: Command,
) -> Result<(Flow, String)> {
    let output = match command {
        Command::View(view) => {
            session.set_view(view);
            render::page(session)
        }
        Command::Refresh => match session.refresh(source).await {
            Ok(evaluation) => render::live(&evaluation),
            Err(_) => String::new(),
        },
        Command::Set { channel, min, max } => {
            match session.submit_threshold(&channel, &min, &max) {
                Ok(range) => format!("{}: {}..={}\n", range.channel, range.min, range.max),
                Err(_) => String::new(),
            }
        }
        Command::Push => {
            match source.device() {
                Some(client) => match client.push_thresholds(&session.thresholds()).await {
                    Ok(()) => session.push_notice(Notice::info("Thresholds sent to device")),
                    Err(err) => session.push_notice(Notice::warning(format!(
                        "Thresholds not sent: {err}"
                    ))),
                },
                None => session.push_notice(Notice::warning(
                    "No device configured; thresholds stay local",
                )),
            }
            String::new()
        }
        Command::Suggest(text) => {
            if session.view().role() == Role::Doctor {
                let _ = session.submit_suggestion(&text);
            } else {
                session.push_notice(Notice::warning(
                    "Suggestions can only be written from a doctor page",
                ));
            }
            String::new()
        }
        Command::Trend(name) => {
            let channel = Channel::new(name);
            if session.profile().contains(&channel) {
                render::trend(&views::trend(session, &channel))
            } else {
                session.push_notice(Notice::warning(format!("Unknown channel '{channel}'")));
                String::new()
            }
        }
        Command::Device(url) => {
            if let Err(err) = settings.update_device(url) {
                session.push_notice(Notice::warning(format!("Device not saved: {err:#}")));
            }
            *source = crate::source_from_settings(&settings.settings()?);
            match source.device() {
                Some(client) => format!("Reading from {}\n", client.base_url()),
                None => "Reading simulated sensors\n".to_string(),
            }
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok((Flow::Quit, String::new())),
    };

    Ok((Flow::Continue, output))
}
