//! Output formatting for fetched and published fiddles

use crate::cli::PaneArg;
use crate::error::CliError;
use jsfiddle_http_client::Fiddle;
use std::io::Write;

/// Render a fetched fiddle: the whole fiddle as pretty JSON, or one pane raw
pub fn render_fiddle(fiddle: &Fiddle, pane: Option<PaneArg>) -> Result<String, CliError> {
    let text = match pane {
        None => serde_json::to_string_pretty(fiddle)?,
        Some(PaneArg::Js) => fiddle.js.clone(),
        Some(PaneArg::Html) => fiddle.html.clone(),
        Some(PaneArg::Css) => fiddle.css.clone(),
        Some(PaneArg::Resources) => fiddle.resources.join("\n"),
    };
    Ok(text)
}

/// Write text to stdout, ending with exactly one newline
pub fn print(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fiddle {
        Fiddle {
            html: "<p>hi</p>".to_string(),
            js: "run();".to_string(),
            css: "p {}".to_string(),
            resources: vec!["a.js".to_string(), "b.css".to_string()],
        }
    }

    #[test]
    fn test_render_single_panes() {
        let fiddle = sample();
        assert_eq!(render_fiddle(&fiddle, Some(PaneArg::Js)).unwrap(), "run();");
        assert_eq!(render_fiddle(&fiddle, Some(PaneArg::Html)).unwrap(), "<p>hi</p>");
        assert_eq!(render_fiddle(&fiddle, Some(PaneArg::Css)).unwrap(), "p {}");
        assert_eq!(
            render_fiddle(&fiddle, Some(PaneArg::Resources)).unwrap(),
            "a.js\nb.css"
        );
    }

    #[test]
    fn test_render_json_round_trips() {
        let fiddle = sample();
        let json = render_fiddle(&fiddle, None).unwrap();
        let parsed: Fiddle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fiddle);
    }
}
