use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::{env, process};

use anyhow::{Context, Result};
use clap::Parser;
use scriptsort_core::{run, Cutoff, OutputMode, SortError, SortOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ORDERING_HELP: &str = "\
Anything not prefixed with 'ordered.' followed by a number is sourced between
the two ordered groups. The order is
  1. ordered.(0-49).(anything)
  2. (files not prefixed with ordered)
  3. ordered.(50+).(anything)
Files prefixed with 'skip.' are never listed.

So in a directory with 'ordered.01.first', 'fn.a', 'fn.b' and 'ordered.52.last'
scriptsort prints:
  ordered.01.first
  fn.a
  fn.b
  ordered.52.last

To source everything at shell startup, add this to the bottom of your rc file:
  source <(scriptsort /path/to/dir --init)";

#[derive(Debug, Parser)]
#[command(
    name = "scriptsort",
    version,
    about = "Print shell scripts in a directory in a deterministic sourcing order.",
    after_help = ORDERING_HELP,
    args_override_self = true
)]
struct Cli {
    /// Path to the scripts to order.
    #[arg(value_name = "DIRECTORY_PATH")]
    directory: PathBuf,

    /// Emit a snippet that can be sourced instead of a name list.
    #[arg(long)]
    init: bool,

    /// Concatenate all scripts into a single string.
    #[arg(long)]
    bundle: bool,

    /// Add timing instrumentation to the output.
    #[arg(long)]
    debug: bool,

    /// Order number at which files move after the unordered group.
    #[arg(long, value_name = "N", value_parser = parse_cutoff)]
    cutoff: Option<Cutoff>,
}

impl From<Cli> for SortOptions {
    fn from(cli: Cli) -> Self {
        Self {
            directory: cli.directory,
            mode: if cli.bundle {
                OutputMode::Bundle
            } else {
                OutputMode::NameList
            },
            init: cli.init,
            debug: cli.debug,
            cutoff: cli.cutoff.unwrap_or_default(),
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = parse_cli(env::args_os());
    let options = SortOptions::from(cli);
    debug!("options: {:?}", options);

    let result = run(&options)?;
    for skipped in &result.skipped {
        eprintln!("warning: {skipped}");
    }

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&result.output)
        .and_then(|_| stdout.flush())
        .context("failed to write output")?;
    Ok(())
}

fn parse_cli<I>(args: I) -> Cli
where
    I: IntoIterator<Item = OsString>,
{
    match Cli::try_parse_from(normalize_flags(args)) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(parse_error_exit_code(&err));
        }
    }
}

/// Help and version requests exit cleanly; every argument error exits 1.
fn parse_error_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn parse_cutoff(value: &str) -> Result<Cutoff, SortError> {
    value.parse()
}

/// Lowercases `--flag` names (not their `=value` part) so flags match
/// case-insensitively. The program name and positional arguments are kept.
fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 {
                return arg;
            }
            match arg.to_str() {
                Some(text) if text.starts_with("--") && text.len() > 2 => {
                    let (flag, value) = match text.split_once('=') {
                        Some((flag, value)) => (flag, Some(value)),
                        None => (text, None),
                    };
                    let mut normalized = flag.to_ascii_lowercase();
                    if let Some(value) = value {
                        normalized.push('=');
                        normalized.push_str(value);
                    }
                    OsString::from(normalized)
                }
                _ => arg,
            }
        })
        .collect()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use clap::Parser;
    use scriptsort_core::{OutputMode, SortOptions};

    use super::{normalize_flags, parse_error_exit_code, Cli};

    fn args(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    fn parse(items: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_flags(args(items)))
    }

    #[test]
    fn flags_match_case_insensitively() {
        let normalized = normalize_flags(args(&[
            "scriptsort",
            "/Scripts/Dir",
            "--INIT",
            "--Debug",
            "--CutOff=7",
        ]));
        assert_eq!(
            normalized,
            args(&["scriptsort", "/Scripts/Dir", "--init", "--debug", "--cutoff=7"])
        );
    }

    #[test]
    fn defaults_to_plain_name_list() {
        let options = SortOptions::from(parse(&["scriptsort", "dir"]).expect("parse"));
        assert_eq!(options.directory, PathBuf::from("dir"));
        assert_eq!(options.mode, OutputMode::NameList);
        assert!(!options.init);
        assert!(!options.debug);
        assert_eq!(options.cutoff.get(), 50);
    }

    #[test]
    fn bundle_and_cutoff_are_applied() {
        let cli = parse(&["scriptsort", "dir", "--BUNDLE", "--init", "--cutoff", "12"])
            .expect("parse");
        let options = SortOptions::from(cli);
        assert_eq!(options.mode, OutputMode::Bundle);
        assert!(options.init);
        assert_eq!(options.cutoff.get(), 12);
    }

    #[test]
    fn repeated_flags_are_accepted() {
        assert!(parse(&["scriptsort", "dir", "--init", "--INIT"]).is_ok());
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        assert!(parse(&["scriptsort"]).is_err());
        assert!(parse(&["scriptsort", "dir", "--cutoff", "0"]).is_err());
        assert!(parse(&["scriptsort", "dir", "--cutoff", "-4"]).is_err());
        assert!(parse(&["scriptsort", "dir", "--cutoff", "many"]).is_err());
        assert!(parse(&["scriptsort", "dir", "--cutoff"]).is_err());
        assert!(parse(&["scriptsort", "dir", "--bogus"]).is_err());
    }

    #[test]
    fn argument_errors_exit_with_one() {
        for argv in [
            vec!["scriptsort"],
            vec!["scriptsort", "dir", "--cutoff", "0"],
            vec!["scriptsort", "dir", "--cutoff", "+12"],
            vec!["scriptsort", "dir", "--cutoff"],
            vec!["scriptsort", "dir", "--bogus"],
        ] {
            let err = parse(&argv).expect_err("argument error");
            assert_eq!(parse_error_exit_code(&err), 1, "{argv:?}");
        }
    }

    #[test]
    fn help_and_version_exit_with_zero() {
        let help = parse(&["scriptsort", "--HELP"]).expect_err("help is reported as an error");
        assert_eq!(parse_error_exit_code(&help), 0);

        let version = parse(&["scriptsort", "--version"]).expect_err("version");
        assert_eq!(parse_error_exit_code(&version), 0);
    }
}
