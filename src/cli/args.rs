//! CLI argument parsing

use clap::{ArgAction, Parser};

use crate::output::OutputFormat;
use crate::runtime::DEFAULT_RUNTIME;

/// Printed when dcx is run without arguments
pub const USAGE: &str = "\
Usage: dcx [options] [rm] [image-name]
Default image (if none provided) is 'alpine'.
Pass `rm` first to remove the container when the shell exits.
";

#[derive(Parser, Debug)]
#[command(name = "dcx")]
#[command(author, version, about = "Open a shell in a fresh container with the current directory mounted at /shared", long_about = None)]
pub struct Args {
    /// `rm` to remove the container on exit, followed by an optional image name
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Container runtime client to invoke (docker, podman, ...)
    #[arg(long, env = "DCX_RUNTIME", default_value = DEFAULT_RUNTIME)]
    pub runtime: String,

    /// Print the runtime commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_and_flags() {
        let args = Args::try_parse_from(["dcx", "--runtime", "podman", "rm", "debian"]).unwrap();
        assert_eq!(args.args, vec!["rm", "debian"]);
        assert_eq!(args.runtime, "podman");
        assert!(!args.dry_run);
    }

    #[test]
    fn test_empty_image_accepted() {
        let args = Args::try_parse_from(["dcx", ""]).unwrap();
        assert_eq!(args.args, vec![""]);
    }

    #[test]
    fn test_json_requires_dry_run() {
        assert!(Args::try_parse_from(["dcx", "--json", "alpine"]).is_err());
        let args = Args::try_parse_from(["dcx", "--dry-run", "--json", "alpine"]).unwrap();
        assert_eq!(args.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_verbosity_counts() {
        let args = Args::try_parse_from(["dcx", "-vv", "alpine"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
