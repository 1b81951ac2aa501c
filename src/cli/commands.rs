//! Command dispatch: turns parsed arguments into service calls and prints results

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::services::{FileReport, RunReport};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, OutputFormat, Settings};
use crate::domain::{
    add_two_numbers, chain_to_digits, parse_decimal, parse_digit_list, to_decimal,
    validate_digits, DigitChain,
};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Result of the `add` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub a: Vec<u32>,
    pub b: Vec<u32>,
    /// Sum digits, least significant first; `None` when both operands are absent
    pub sum: Option<Vec<u32>>,
    pub decimal: Option<String>,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let mut settings = Settings::load(Some(&project_dir))?;
    if let Some(format) = cli.format {
        settings.output = format;
    }
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Add { a, b, lsd }) => cmd_add(&container, a, b, *lsd),
        Some(Commands::Run { files, dir }) => cmd_run(&container, files, dir.as_deref()),
        Some(Commands::Config { command }) => cmd_config(&container, &project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage("no command given, see --help".to_string())),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => env::current_dir()
            .map_err(|e| CliError::Infra(InfraError::io("read current directory", e))),
    }
}

/// Parse both operands and add them.
pub fn add_operands(a: &str, b: &str, lsd: bool, strict: bool) -> CliResult<AddOutcome> {
    let parse = |text: &str| -> CliResult<DigitChain> {
        let chain = if lsd {
            parse_digit_list(text)?
        } else {
            parse_decimal(text)?
        };
        if strict {
            validate_digits(&chain)?;
        }
        Ok(chain)
    };
    let left = parse(a)?;
    let right = parse(b)?;
    let (a_digits, b_digits) = (chain_to_digits(&left), chain_to_digits(&right));

    let sum = add_two_numbers(left, right);
    let decimal = sum.as_ref().map(|_| to_decimal(&sum));
    Ok(AddOutcome {
        a: a_digits,
        b: b_digits,
        sum: sum.as_ref().map(|_| chain_to_digits(&sum)),
        decimal,
    })
}

#[instrument(skip(container))]
fn cmd_add(container: &ServiceContainer, a: &str, b: &str, lsd: bool) -> CliResult<()> {
    let outcome = add_operands(a, b, lsd, container.settings.strict_digits)?;

    match container.settings.output {
        OutputFormat::Json => output::info(&serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => match (&outcome.sum, &outcome.decimal) {
            (Some(sum), Some(decimal)) => {
                output::action("digits", &format_digits(sum));
                output::action("value", decimal);
            }
            _ => output::action("digits", "(absent)"),
        },
    }
    Ok(())
}

fn format_digits(digits: &[u32]) -> String {
    format!("{:?}", digits)
}

#[instrument(skip(container))]
fn cmd_run(container: &ServiceContainer, files: &[PathBuf], dir: Option<&Path>) -> CliResult<()> {
    let runner = container.case_runner();

    let paths = if files.is_empty() {
        let dir = dir.unwrap_or(container.settings.problems_dir.as_path());
        runner.discover(dir)?
    } else {
        files.to_vec()
    };
    if paths.is_empty() {
        output::warning("no testcases.json files found");
        return Ok(());
    }

    let report = runner.run_all(&paths)?;
    match container.settings.output {
        OutputFormat::Json => output::info(&serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::CasesFailed {
            failed: report.failed(),
        })
    }
}

fn print_report(report: &RunReport) {
    for file in &report.files {
        print_file_report(file);
    }
    output::info(&format!(
        "{} passed, {} failed",
        report.passed(),
        report.failed()
    ));
}

fn print_file_report(file: &FileReport) {
    output::header(&format!("{} ({})", file.path.display(), file.function));
    for outcome in &file.outcomes {
        let label = format!("case_{}", outcome.index);
        if outcome.passed {
            output::success_detail(&label);
        } else if let Some(error) = &outcome.error {
            output::failure(&format!("{label}: {error}"));
        } else {
            output::failure(&format!(
                "{label}: expected {}, got {}",
                format_digits(outcome.expected.as_deref().unwrap_or_default()),
                format_digits(outcome.actual.as_deref().unwrap_or_default()),
            ));
        }
    }
}

fn cmd_config(
    container: &ServiceContainer,
    project_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let global = global_config_path();
            let local = local_config_path(project_dir);
            match &global {
                Some(path) => output::action("global", &describe_path(container, path)),
                None => output::action("global", "(no config directory)"),
            }
            output::action("local", &describe_path(container, &local));
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .map_err(|e| InfraError::io_at("create parent of", &path, e))?;
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io_at("write", &path, e))?;
            output::action("Created", &path.display());
            output::detail("edit the file to change defaults");
            Ok(())
        }
    }
}

fn describe_path(container: &ServiceContainer, path: &Path) -> String {
    if container.fs.exists(path) {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_decimal_operands_when_adding_then_sum_reported_both_ways() {
        let outcome = add_operands("342", "465", false, true).unwrap();
        assert_eq!(outcome.a, vec![2, 4, 3]);
        assert_eq!(outcome.sum, Some(vec![7, 0, 8]));
        assert_eq!(outcome.decimal.as_deref(), Some("807"));
    }

    #[test]
    fn given_lsd_lists_with_absent_operand_when_adding_then_other_returned() {
        let outcome = add_operands("", "1,2,3", true, true).unwrap();
        assert!(outcome.a.is_empty());
        assert_eq!(outcome.sum, Some(vec![1, 2, 3]));
        assert_eq!(outcome.decimal.as_deref(), Some("321"));
    }

    #[test]
    fn given_both_absent_when_adding_then_no_sum() {
        let outcome = add_operands("[]", "", true, true).unwrap();
        assert_eq!(outcome.sum, None);
        assert_eq!(outcome.decimal, None);
    }

    #[test]
    fn given_out_of_range_lsd_digit_when_strict_then_rejected() {
        let err = add_operands("12", "1", true, true).unwrap_err();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);

        let lenient = add_operands("12", "1", true, false).unwrap();
        assert_eq!(lenient.sum, Some(vec![3, 1]));
    }

    #[test]
    fn given_missing_project_dir_when_resolving_then_invalid_args() {
        let err = resolve_project_dir(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgs(_)));
    }
}
