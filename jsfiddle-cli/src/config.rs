//! Configuration resolution from CLI args

use crate::cli::{Args, Command, PaneArg};
use crate::error::CliError;
use jsfiddle_http_client::{FiddleClient, FiddleId, PublishRequest};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Trailing path segments that name a view of a fiddle rather than the fiddle
const VIEW_SEGMENTS: [&str; 3] = ["embedded", "show", "light"];

/// What the command should do
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Fetch a fiddle, optionally printing a single pane
    Get { id: FiddleId, pane: Option<PaneArg> },
    /// Publish a fiddle
    Save {
        payload: PublishRequest,
        framework: Option<(String, String)>,
    },
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Base URL of the service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Resolved command
    pub action: Action,
}

impl Config {
    /// Build config from CLI args, reading any referenced files
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        if args.timeout == 0 {
            return Err(CliError::Config(
                "Timeout must be at least one second".to_string(),
            ));
        }

        let action = match args.command {
            Command::Get { fiddle, pane } => Action::Get {
                id: resolve_identifier(&fiddle)?,
                pane,
            },
            Command::Save {
                payload,
                title,
                html,
                js,
                css,
                framework,
                framework_version,
            } => {
                let mut request = match payload {
                    Some(path) => read_payload(&path)?,
                    None => PublishRequest::default(),
                };
                if title.is_some() {
                    request.title = title;
                }
                if let Some(path) = html {
                    request.html = Some(read_file(&path)?);
                }
                if let Some(path) = js {
                    request.js = Some(read_file(&path)?);
                }
                if let Some(path) = css {
                    request.css = Some(read_file(&path)?);
                }
                Action::Save {
                    payload: request,
                    framework: framework.zip(framework_version),
                }
            }
        };

        Ok(Config {
            base_url: args.base_url,
            timeout: Duration::from_secs(args.timeout),
            action,
        })
    }

    /// Build the HTTP client for this configuration
    pub fn client(&self) -> Result<FiddleClient, CliError> {
        let mut builder = FiddleClient::builder()
            .base_url(self.base_url.as_str())?
            .timeout(self.timeout);
        if let Action::Save {
            framework: Some((name, version)),
            ..
        } = &self.action
        {
            builder = builder.framework(name, version);
        }
        Ok(builder.build()?)
    }
}

/// Turn `id`, `id/version` or a fiddle URL into an identifier
///
/// For URLs the path is used, minus a trailing view segment such as `embedded`.
pub fn resolve_identifier(input: &str) -> Result<FiddleId, CliError> {
    let input = input.trim();
    let path = match input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
    {
        Some(rest) => {
            let rest = rest.split(['?', '#']).next().unwrap_or_default();
            rest.split_once('/').map(|(_, path)| path).unwrap_or_default()
        }
        None => input,
    };

    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 1
        && segments
            .last()
            .is_some_and(|last| VIEW_SEGMENTS.contains(last))
    {
        segments.pop();
    }

    if segments.is_empty() {
        return Err(CliError::Config(format!(
            "No fiddle identifier in '{}'",
            input
        )));
    }
    Ok(FiddleId::new(segments.join("/"))?)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: PathBuf::from(path),
        source,
    })
}

fn read_payload(path: &Path) -> Result<PublishRequest, CliError> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Payload {
        path: PathBuf::from(path),
        source,
    })
}
