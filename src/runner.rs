//! Almanac script execution.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio::time;
use tracing::debug;

use crate::config::Config;
use crate::types::RefreshError;

/// Captured output of one script run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run the almanac script through the configured shell and capture its
/// output.
///
/// The shell line sources the configured activation script first, so
/// interpreters installed in a virtualenv resolve correctly. Stdout
/// and stderr are collected concurrently, bounded by the configured
/// timeout; the child is killed when the timeout elapses. A non-zero
/// exit is an error carrying the exit code and captured stderr, while
/// stderr from a successful run is diagnostic only.
pub async fn run_script(config: &Config, script: &Path) -> Result<ScriptOutput, RefreshError> {
    let command_line = build_command_line(config, script);
    debug!(shell = %config.shell, command = %command_line, "Running almanac script");

    let mut command = Command::new(&config.shell);
    command
        .arg("-c")
        .arg(&command_line)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let timeout = config.script_timeout();
    let output = match time::timeout(timeout, command.output()).await {
        Ok(result) => {
            result.map_err(|err| RefreshError::Launch(format!("{}: {err}", config.shell)))?
        }
        Err(_) => {
            return Err(RefreshError::Timeout {
                timeout_secs: timeout.as_secs(),
            })
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(RefreshError::ScriptFailed {
            code: output.status.code(),
            stderr,
        });
    }

    Ok(ScriptOutput { stdout, stderr })
}

fn build_command_line(config: &Config, script: &Path) -> String {
    match &config.env_activate {
        Some(activate) => format!(
            "source '{}' && {} '{}'",
            activate,
            config.interpreter,
            script.display()
        ),
        None => format!("{} '{}'", config.interpreter, script.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(timeout_secs: u64) -> Config {
        Config {
            scripts_dir: None,
            shell: "/bin/sh".to_string(),
            interpreter: "sh".to_string(),
            env_activate: None,
            script_extension: "py".to_string(),
            script_timeout_secs: timeout_secs,
        }
    }

    fn write_script(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).expect("write fixture script");
        path
    }

    #[test]
    fn command_line_sources_the_activation_script() {
        let mut config = test_config(5);
        config.env_activate = Some("/opt/venv/bin/activate".to_string());
        let line = build_command_line(&config, Path::new("/srv/almanac.1h.py"));
        assert_eq!(
            line,
            "source '/opt/venv/bin/activate' && sh '/srv/almanac.1h.py'"
        );
    }

    #[test]
    fn command_line_without_activation() {
        let config = test_config(5);
        let line = build_command_line(&config, Path::new("/srv/almanac.1h.py"));
        assert_eq!(line, "sh '/srv/almanac.1h.py'");
    }

    #[tokio::test]
    async fn captures_trimmed_stdout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_script(&dir, "ok.5m.py", "echo 'Title'\necho 'Row'\n");

        let output = run_script(&test_config(5), &script).await.expect("run");
        assert_eq!(output.stdout, "Title\nRow");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn stderr_is_captured_separately() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_script(&dir, "noisy.5m.py", "echo out\necho diag >&2\n");

        let output = run_script(&test_config(5), &script).await.expect("run");
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "diag");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error_with_code_and_stderr() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_script(&dir, "broken.5m.py", "echo doom >&2\nexit 3\n");

        let err = run_script(&test_config(5), &script).await.unwrap_err();
        match err {
            RefreshError::ScriptFailed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "doom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_script_times_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_script(&dir, "slow.5m.py", "sleep 30\n");

        let err = run_script(&test_config(1), &script).await.unwrap_err();
        assert!(matches!(err, RefreshError::Timeout { timeout_secs: 1 }));
    }

    #[tokio::test]
    async fn missing_shell_is_a_launch_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script = write_script(&dir, "ok.5m.py", "echo hi\n");

        let mut config = test_config(5);
        config.shell = "/no/such/shell".to_string();
        let err = run_script(&config, &script).await.unwrap_err();
        assert!(matches!(err, RefreshError::Launch(_)));
    }
}
