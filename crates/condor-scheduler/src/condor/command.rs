use anyhow::Context;
use bstr::ByteSlice;
use std::path::Path;
use std::process::{Command, Output};

use crate::common::error::SchedulerError;

/// HTCondor program that submits a DAG file.
pub const SUBMIT_DAG_PROGRAM: &str = "condor_submit_dag";

pub fn create_command(arguments: &[&str], workdir: &Path) -> Command {
    let mut command = Command::new(arguments[0]);
    command.args(&arguments[1..]);
    command.current_dir(workdir);
    command
}

pub fn check_command_output(output: Output) -> anyhow::Result<Output> {
    let status = output.status;
    if !status.success() {
        return Err(anyhow::anyhow!(
            "Exit code: {}\nStderr: {}\nStdout: {}",
            status.code().unwrap_or(-1),
            output.stderr.to_str_lossy().trim(),
            output.stdout.to_str_lossy().trim()
        ));
    }
    Ok(output)
}

fn execute(arguments: &[&str], workdir: &Path) -> anyhow::Result<String> {
    let program = arguments[0];
    log::debug!("Running command `{}`", arguments.join(" "));

    let output = create_command(arguments, workdir)
        .output()
        .with_context(|| format!("{program} start failed"))?;
    let output =
        check_command_output(output).with_context(|| format!("{program} execution failed"))?;
    Ok(output.stdout.to_str_lossy().trim().to_string())
}

/// Runs the command given by `arguments` to completion and returns its trimmed stdout.
pub fn run_command(arguments: &[&str], workdir: &Path) -> crate::Result<String> {
    execute(arguments, workdir).map_err(|e| SchedulerError::SubmissionFailure(format!("{e:#}")))
}

/// Submits the DAG file into HTCondor with `condor_submit_dag`.
/// `extra_args` are passed to the submit program before the DAG path.
pub fn submit_dag(dag_path: &Path, extra_args: &[String], workdir: &Path) -> crate::Result<String> {
    let dag_path = dag_path.display().to_string();
    let mut arguments = vec![SUBMIT_DAG_PROGRAM];
    arguments.extend(extra_args.iter().map(String::as_str));
    arguments.push(&dag_path);
    run_command(&arguments, workdir)
}

#[cfg(test)]
mod tests {
    use crate::common::error::SchedulerError;
    use crate::condor::command::{check_command_output, create_command, run_command};
    use tempfile::TempDir;

    #[test]
    fn test_run_command_stdout() {
        let dir = TempDir::new().unwrap();
        let output = run_command(&["sh", "-c", "echo '  submitted  '"], dir.path()).unwrap();
        assert_eq!(output, "submitted");
    }

    #[test]
    fn test_run_command_in_workdir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();
        let output = run_command(&["ls"], dir.path()).unwrap();
        assert_eq!(output, "marker");
    }

    #[test]
    fn test_run_command_failure() {
        let dir = TempDir::new().unwrap();
        let error = run_command(&["sh", "-c", "echo bad >&2; exit 3"], dir.path()).unwrap_err();
        match error {
            SchedulerError::SubmissionFailure(message) => {
                assert!(message.starts_with("sh execution failed: "));
                assert!(message.contains("Exit code: 3"));
                assert!(message.contains("Stderr: bad"));
            }
            error => panic!("Unexpected error {error:?}"),
        }
    }

    #[test]
    fn test_check_command_output() {
        let dir = TempDir::new().unwrap();
        let output = create_command(&["sh", "-c", "echo out; echo err >&2; exit 1"], dir.path())
            .output()
            .unwrap();
        let error = check_command_output(output).unwrap_err();
        insta::assert_snapshot!(error.to_string(), @r###"
        Exit code: 1
        Stderr: err
        Stdout: out
        "###);
    }

    #[test]
    fn test_run_command_missing_program() {
        let dir = TempDir::new().unwrap();
        match run_command(&["condor-scheduler-missing-program"], dir.path()) {
            Err(SchedulerError::SubmissionFailure(message)) => {
                assert!(message.starts_with("condor-scheduler-missing-program start failed: "));
            }
            result => panic!("Unexpected result {result:?}"),
        }
    }
}
