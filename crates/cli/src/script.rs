//! Batch execution of shell commands from a file.

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::shell::{Outcome, Session};

/// Runs each command in `path` against `session`, writing output to `out`.
///
/// Blank lines and lines starting with `#` are skipped. Execution stops at the
/// first failing command or at `quit`. Returns the number of commands run.
pub fn run_script(session: &mut Session, path: &Path, out: &mut impl Write) -> anyhow::Result<usize> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;

    let mut executed = 0;
    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        tracing::debug!(line = index + 1, command = trimmed, "running script line");
        let outcome = session
            .execute_line(trimmed)
            .with_context(|| format!("{}:{}: {}", path.display(), index + 1, trimmed))?;
        executed += 1;

        match outcome {
            Outcome::Output(text) if text.is_empty() => {}
            Outcome::Output(text) => writeln!(out, "{text}")?,
            Outcome::Quit => break,
        }
    }

    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::ClinicConfig;
    use std::fs;
    use tempfile::TempDir;

    fn write_script(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("desk.clinic");
        fs::write(&path, body).expect("write script");
        path
    }

    #[test]
    fn runs_commands_and_skips_comments() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_script(
            &dir,
            "# morning shift\n\
             login admin password\n\
             \n\
             add-ward ICU 10\n\
             add-patient Amit 34 Male Fever\n\
             next-token\n",
        );

        let mut session = Session::new(ClinicConfig::default());
        let mut out = Vec::new();
        let executed = run_script(&mut session, &path, &mut out).expect("script succeeds");

        assert_eq!(executed, 4);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Ward added successfully."));
        assert!(text.ends_with("Next token to be called: 1\n"));
    }

    #[test]
    fn stops_at_first_failure_with_line_number() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_script(
            &dir,
            "login admin password\n\
             add-ward ICU 10\n\
             add-ward ICU 5\n\
             add-ward General 20\n",
        );

        let mut session = Session::new(ClinicConfig::default());
        let err = run_script(&mut session, &path, &mut Vec::new()).unwrap_err();

        assert!(err.to_string().ends_with(":3: add-ward ICU 5"));
        assert!(session.registry().ward("General").is_none());
    }

    #[test]
    fn quit_ends_the_script() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write_script(&dir, "quit\nadd-ward ICU 10\n");

        let mut session = Session::new(ClinicConfig::default());
        let executed = run_script(&mut session, &path, &mut Vec::new()).unwrap();
        assert_eq!(executed, 1);
    }

    #[test]
    fn missing_script_is_reported() {
        let mut session = Session::new(ClinicConfig::default());
        let err = run_script(&mut session, Path::new("/nonexistent/desk.clinic"), &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to read script"));
    }
}
