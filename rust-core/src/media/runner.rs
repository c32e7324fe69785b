//! External process execution for ffmpeg/ffprobe

use super::MediaError;
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured output of a finished command
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs one external tool and turns failures into `MediaError`s
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run to completion, failing on a non-zero exit status
    pub fn run<I, S>(&self, args: I) -> Result<CommandOutput, MediaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        tracing::debug!(
            "running {} {}",
            self.program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => MediaError::ToolNotFound(self.program.display().to_string()),
                _ => MediaError::Spawn {
                    program: self.program.display().to_string(),
                    source: e,
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(MediaError::CommandFailed {
                program: self.program.display().to_string(),
                status: output.status.code(),
                stderr: last_lines(&stderr, 5),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }

    /// True when the tool can be started and exits cleanly for `-version`
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

/// Keep the tail of a tool's diagnostic output, where the actual error is
fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let runner = CommandRunner::new("voice-workbench-no-such-tool");
        assert_eq!(runner.program(), Path::new("voice-workbench-no-such-tool"));
        assert!(!runner.is_available());
        assert!(matches!(
            runner.run(["-version"]),
            Err(MediaError::ToolNotFound(_))
        ));
    }

    #[test]
    fn test_last_lines() {
        let text = "a\n\nb\nc\nd\n";
        assert_eq!(last_lines(text, 2), "c\nd");
        assert_eq!(last_lines(text, 10), "a\nb\nc\nd");
        assert_eq!(last_lines("", 3), "");
    }
}
