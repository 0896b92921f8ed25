//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Part of a fetched fiddle to print
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PaneArg {
    /// Script pane
    Js,
    /// Markup pane
    Html,
    /// Style pane
    Css,
    /// Linked resource URLs, one per line
    Resources,
}

/// Fetch and publish fiddles on jsfiddle.net
#[derive(Parser, Debug)]
#[command(name = "jsfiddle", about = "Fetch and publish fiddles on jsfiddle.net", version)]
pub struct Args {
    /// Base URL of the service
    #[arg(
        long,
        env = "JSFIDDLE_BASE_URL",
        default_value = "https://jsfiddle.net/",
        global = true
    )]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "JSFIDDLE_TIMEOUT", default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the panes and resources of a fiddle
    Get {
        /// Fiddle identifier (`id`, `id/version`) or fiddle URL
        fiddle: String,

        /// Print only one pane instead of the whole fiddle as JSON
        #[arg(long, value_enum)]
        pane: Option<PaneArg>,
    },

    /// Publish a new fiddle
    Save {
        /// JSON file with `title`, `html`, `js` and `css` fields
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Fiddle title
        #[arg(long)]
        title: Option<String>,

        /// File holding the HTML pane
        #[arg(long)]
        html: Option<PathBuf>,

        /// File holding the JavaScript pane
        #[arg(long)]
        js: Option<PathBuf>,

        /// File holding the CSS pane
        #[arg(long)]
        css: Option<PathBuf>,

        /// Framework segment of the publish endpoint, e.g. `Vue`
        #[arg(long, requires = "framework_version")]
        framework: Option<String>,

        /// Framework version segment of the publish endpoint, e.g. `2.2.1`
        #[arg(long, requires = "framework")]
        framework_version: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_with_pane() {
        let args = Args::try_parse_from(["jsfiddle", "get", "abc123/2", "--pane", "css"]).unwrap();
        match args.command {
            Command::Get { fiddle, pane } => {
                assert_eq!(fiddle, "abc123/2");
                assert_eq!(pane, Some(PaneArg::Css));
            }
            other => panic!("Expected get command, got {:?}", other),
        }
        assert_eq!(args.timeout, 30);
        assert!(!args.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "jsfiddle",
            "get",
            "abc",
            "--base-url",
            "http://localhost:9000",
            "--timeout",
            "5",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.base_url, "http://localhost:9000");
        assert_eq!(args.timeout, 5);
        assert!(args.verbose);
    }

    #[test]
    fn test_framework_flags_require_each_other() {
        let result = Args::try_parse_from(["jsfiddle", "save", "--framework", "React"]);
        assert!(result.is_err());

        let args = Args::try_parse_from([
            "jsfiddle",
            "save",
            "--framework",
            "React",
            "--framework-version",
            "18.2.0",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Command::Save { framework: Some(ref f), framework_version: Some(ref v), .. }
                if f == "React" && v == "18.2.0"
        ));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Args::try_parse_from(["jsfiddle"]).is_err());
    }
}
