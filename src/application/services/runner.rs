//! Test-case runner service
//!
//! Loads `testcases.json` files and checks the adder against every case.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{add_two_numbers, chain_to_digits, validate_digits, Case, CaseFile, DomainError};
use crate::infrastructure::traits::FileSystem;

/// Function name the runner knows how to execute.
pub const ADD_TWO_NUMBERS: &str = "addTwoNumbers";

/// File name searched for during discovery.
pub const CASE_FILE_NAME: &str = "testcases.json";

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub index: usize,
    pub expected: Option<Vec<u32>>,
    pub actual: Option<Vec<u32>>,
    pub passed: bool,
    /// Why the case could not be evaluated
    pub error: Option<String>,
}

/// Outcomes for all cases of one file, in case order.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub function: String,
    pub outcomes: Vec<CaseOutcome>,
}

impl FileReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

/// Aggregated outcome of a run over several files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.files.iter().map(FileReport::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().map(FileReport::failed).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Service for executing case files against the digit-chain adder.
pub struct CaseRunner {
    fs: Arc<dyn FileSystem>,
    strict_digits: bool,
}

impl CaseRunner {
    /// Create a runner. With `strict_digits` every input node must hold 0-9.
    pub fn new(fs: Arc<dyn FileSystem>, strict_digits: bool) -> Self {
        Self { fs, strict_digits }
    }

    /// Read and parse a case file.
    pub fn load(&self, path: &Path) -> ApplicationResult<CaseFile> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read case file", path)?;
        serde_json::from_str(&content).map_err(|e| ApplicationError::InvalidCaseFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Find `testcases.json` files one level below `dir` (`<dir>/<problem>/testcases.json`).
    ///
    /// Results are sorted by path. Files declaring a function other than
    /// `addTwoNumbers` are skipped; files that fail to load are kept so the run reports them.
    pub fn discover(&self, dir: &Path) -> ApplicationResult<Vec<PathBuf>> {
        if !self.fs.is_dir(dir) {
            return Err(ApplicationError::ProblemsDirNotFound(dir.to_path_buf()));
        }

        let files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && e.file_name() == CASE_FILE_NAME)
            .map(|e| e.into_path())
            .filter(|path| self.is_runnable(path))
            .collect();

        debug!("discover: found {} case files in {}", files.len(), dir.display());
        Ok(files)
    }

    fn is_runnable(&self, path: &Path) -> bool {
        match self.load(path) {
            Ok(file) if file.function != ADD_TWO_NUMBERS => {
                debug!(
                    "discover: skipping {} (function {})",
                    path.display(),
                    file.function
                );
                false
            }
            _ => true,
        }
    }

    /// Run every case of one file.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn run_file(&self, path: &Path) -> ApplicationResult<FileReport> {
        let file = self.load(path)?;
        if file.function != ADD_TWO_NUMBERS {
            return Err(ApplicationError::UnsupportedFunction(file.function));
        }
        if !file.returns_chain() {
            return Err(ApplicationError::UnsupportedReturnType {
                function: file.function,
                return_type: file.return_type,
            });
        }

        let strict = self.strict_digits;
        let outcomes: Vec<CaseOutcome> = file
            .cases
            .par_iter()
            .enumerate()
            .map(|(index, case)| run_case(index, case, &file.param_types, strict))
            .collect();

        let report = FileReport {
            path: path.to_path_buf(),
            function: file.function,
            outcomes,
        };
        info!(
            passed = report.passed(),
            failed = report.failed(),
            "ran case file"
        );
        Ok(report)
    }

    /// Run several files; the first file that cannot be loaded aborts the run.
    pub fn run_all(&self, paths: &[PathBuf]) -> ApplicationResult<RunReport> {
        let files = paths
            .iter()
            .map(|path| self.run_file(path))
            .collect::<ApplicationResult<Vec<_>>>()?;
        Ok(RunReport { files })
    }
}

fn run_case(index: usize, case: &Case, param_types: &[String], strict: bool) -> CaseOutcome {
    let evaluated = evaluate(case, param_types, strict);
    let expected = case.expected_digits();

    match (evaluated, expected) {
        (Ok(actual), Ok(expected)) => {
            let passed = actual == expected;
            if !passed {
                warn!(index, ?expected, ?actual, "case failed");
            }
            CaseOutcome {
                index,
                expected: Some(expected),
                actual: Some(actual),
                passed,
                error: None,
            }
        }
        (actual, expected) => {
            let error = actual
                .as_ref()
                .err()
                .or(expected.as_ref().err())
                .map(ToString::to_string);
            warn!(index, error = ?error, "case could not be evaluated");
            CaseOutcome {
                index,
                expected: expected.ok(),
                actual: actual.ok(),
                passed: false,
                error,
            }
        }
    }
}

fn evaluate(case: &Case, param_types: &[String], strict: bool) -> Result<Vec<u32>, DomainError> {
    let (a, b) = case.chain_operands(param_types)?;
    if strict {
        validate_digits(&a)?;
        validate_digits(&b)?;
    }
    Ok(chain_to_digits(&add_two_numbers(a, b)))
}
