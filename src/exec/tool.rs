// src/exec/tool.rs

//! Invocation of external tools (compiler, linter, bundler, test runner,
//! package manager).

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::ActionError;

/// One external tool call, run to completion with captured output.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    extra_path: Vec<PathBuf>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            extra_path: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Make tools installed locally under `<work_dir>/node_modules/.bin`
    /// resolvable by name.
    pub fn with_node_bin(mut self, work_dir: &Path) -> Self {
        self.extra_path.push(work_dir.join("node_modules").join(".bin"));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Spawn the tool and wait for it. Only a failure to spawn is an error
    /// here; a non-zero exit is reported in the returned [`ToolOutput`].
    pub async fn run(&self) -> Result<ToolOutput, ActionError> {
        debug!(cmd = %self, cwd = %self.cwd.display(), "running external tool");

        // Build a command appropriate for the platform; on Windows the
        // node tools are `.cmd` shims that need the shell.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.program);
            c
        } else {
            Command::new(&self.program)
        };

        cmd.args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(path) = self.search_path() {
            cmd.env("PATH", path);
        }

        let output = cmd.output().await.map_err(|err| ActionError::Tool {
            tool: self.program.clone(),
            code: -1,
            detail: format!(" could not start '{}': {err}", self.program),
        })?;

        Ok(ToolOutput {
            tool: self.program.clone(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn search_path(&self) -> Option<OsString> {
        if self.extra_path.is_empty() {
            return None;
        }
        let mut dirs: Vec<PathBuf> = std::env::var_os("PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();
        dirs.extend(self.extra_path.iter().cloned());
        std::env::join_paths(dirs).ok()
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished tool.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub tool: String,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// stderr followed by stdout, each block on its own line.
    pub fn combined(&self) -> String {
        let mut out = String::new();
        for block in [self.stderr.trim_end(), self.stdout.trim_end()] {
            if !block.is_empty() {
                out.push('\n');
                out.push_str(block);
            }
        }
        out
    }

    /// Turn a non-zero exit into [`ActionError::Tool`] with the captured
    /// output as detail.
    pub fn into_result(self) -> Result<ToolOutput, ActionError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ActionError::Tool {
                detail: self.combined(),
                code: self.code.unwrap_or(-1),
                tool: self.tool,
            })
        }
    }
}
