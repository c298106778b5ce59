//! External tool lookup and invocation
//!
//! Every platform backend and the format converter shell out to a program
//! that may or may not be installed. The toolbox answers "is it there?"
//! before anything is spawned, and runs programs synchronously with their
//! output discarded.

use crate::{Result, VoiceoverError};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Resolves and runs external executables
#[derive(Debug, Clone, Default)]
pub struct Toolbox {
    /// Explicit search path; `None` means the process $PATH
    search_path: Option<OsString>,
}

impl Toolbox {
    /// Toolbox that searches the process $PATH
    pub fn system() -> Self {
        Self { search_path: None }
    }

    /// Toolbox that only searches the given path list
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Resolve an executable by name (or path)
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };

        match found {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("{} not found: {}", name, e);
                None
            }
        }
    }

    /// Resolve the first of several candidate names
    pub fn find_any(&self, names: &[&str]) -> Option<PathBuf> {
        names.iter().find_map(|name| self.find(name))
    }

    /// Is the named executable installed?
    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Run a program to completion, failing on spawn error or non-zero exit
    pub fn run<I, S>(&self, program: &Path, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!("Running {}", program.display());

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                VoiceoverError::Backend(format!("Failed to start {}: {}", program.display(), e))
            })?;

        if !status.success() {
            return Err(VoiceoverError::Backend(format!(
                "{} exited with {}",
                program.display(),
                status
            )));
        }

        Ok(())
    }

    /// Like [`Toolbox::run`], writing `input` to the program's stdin first
    pub fn run_with_stdin<I, S>(&self, program: &Path, args: I, input: &str) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!("Running {} with {} bytes on stdin", program.display(), input.len());

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                VoiceoverError::Backend(format!("Failed to start {}: {}", program.display(), e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let written = stdin
                .write_all(input.as_bytes())
                .and_then(|()| stdin.write_all(b"\n"));
            // Close the pipe before waiting
            drop(stdin);

            if let Err(e) = written {
                // The program quit without reading its input; reap it before bailing
                if let Err(kill_err) = child.kill() {
                    debug!("Failed to kill {}: {}", program.display(), kill_err);
                }
                let status = child.wait().map_err(|wait_err| {
                    VoiceoverError::Backend(format!(
                        "Failed to wait for {}: {}",
                        program.display(),
                        wait_err
                    ))
                })?;
                return Err(VoiceoverError::Backend(format!(
                    "{} stopped reading input ({}): {}",
                    program.display(),
                    status,
                    e
                )));
            }
        }

        let status = child.wait().map_err(|e| {
            VoiceoverError::Backend(format!("Failed to wait for {}: {}", program.display(), e))
        })?;
        if !status.success() {
            return Err(VoiceoverError::Backend(format!(
                "{} exited with {}",
                program.display(),
                status
            )));
        }

        Ok(())
    }
}
