//! Simulator process boundary
//!
//! The native fire-spread engine runs as an opaque subprocess. This module
//! owns spawning it, teeing its output to a log file, and turning a
//! non-zero exit status into a typed error carrying the log path.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::EvalError;

/// Name of the log file written into the simulator's output folder.
pub const LOG_FILE_NAME: &str = "LogFile.txt";

/// Argument set for one invocation of the native simulator binary.
#[derive(Clone, Debug)]
pub struct SimulatorCommand {
    binary: PathBuf,
    input_folder: PathBuf,
    output_folder: PathBuf,
    sim_years: u32,
    seed: u64,
    threads: u32,
    extra_args: Vec<String>,
}

impl SimulatorCommand {
    pub fn new(binary: impl Into<PathBuf>, input_folder: impl Into<PathBuf>, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            input_folder: input_folder.into(),
            output_folder: output_folder.into(),
            sim_years: 1,
            seed: 42,
            threads: 1,
            extra_args: Vec::new(),
        }
    }

    pub fn with_sim_years(mut self, sim_years: u32) -> Self {
        self.sim_years = sim_years;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = threads;
        self
    }

    /// Pass-through flags the harness does not interpret.
    pub fn with_extra_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Path of the log artifact this invocation will write.
    pub fn log_path(&self) -> PathBuf {
        self.output_folder.join(LOG_FILE_NAME)
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            "--input-instance-folder".to_string(),
            self.input_folder.display().to_string(),
            "--output-folder".to_string(),
            self.output_folder.display().to_string(),
            "--sim-years".to_string(),
            self.sim_years.to_string(),
            "--seed".to_string(),
            self.seed.to_string(),
            "--nthreads".to_string(),
            self.threads.to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }

    /// Run the simulator to completion.
    ///
    /// Stdout and stderr are written to `LogFile.txt` in the output
    /// folder. A non-zero exit is not retried; the error carries the log
    /// path so the caller can point the user at it.
    pub fn run(&self) -> Result<(), EvalError> {
        std::fs::create_dir_all(&self.output_folder)?;
        let log = self.log_path();
        let stdout = File::create(&log)?;
        let stderr = stdout.try_clone()?;

        let args = self.build_args();
        debug!(binary = %self.binary.display(), ?args, "spawning simulator");

        let status = Command::new(&self.binary)
            .args(&args)
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()?;

        if !status.success() {
            return Err(EvalError::SimulatorFailed {
                status: status.code().unwrap_or(-1),
                log,
            });
        }
        info!(log = %log.display(), "simulator run complete");
        Ok(())
    }
}

/// Resolve the simulator binary from an explicit path or `PATH` lookup.
pub fn resolve_binary(configured: Option<&Path>, default_name: &str) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_out(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_successful_run_writes_log() {
        let out = temp_out("sim_ok");
        let cmd = SimulatorCommand::new("/bin/true", "/tmp", &out);
        cmd.run().unwrap();
        assert!(cmd.log_path().exists());
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn test_failed_run_reports_log_path() {
        let out = temp_out("sim_fail");
        let cmd = SimulatorCommand::new("/bin/false", "/tmp", &out);
        let err = cmd.run().unwrap_err();
        match err {
            EvalError::SimulatorFailed { status, log } => {
                assert_ne!(status, 0);
                assert_eq!(log, out.join(LOG_FILE_NAME));
            }
            other => panic!("expected SimulatorFailed, got {other:?}"),
        }
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn test_args_carry_seed_and_folders() {
        let cmd = SimulatorCommand::new("sim", "in", "out")
            .with_seed(7)
            .with_sim_years(3)
            .with_extra_arg("--final-grid");
        let args = cmd.build_args();
        assert!(args.windows(2).any(|w| w == ["--seed", "7"]));
        assert!(args.windows(2).any(|w| w == ["--sim-years", "3"]));
        assert_eq!(args.last().map(String::as_str), Some("--final-grid"));
    }
}
