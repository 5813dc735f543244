// ABOUTME: Launches the external executor and captures its combined output
// ABOUTME: stdout and stderr share one pipe so output keeps the order the OS delivered it

use std::io::{self, Read};
use std::process::Stdio;

use tokio::process::Command;
use which::which;

use crate::error::{MigrationError, Result};

/// Result of one executor run. The output is kept even when the run failed.
#[derive(Debug)]
pub struct RunOutcome {
    pub output: String,
    pub result: Result<()>,
}

impl RunOutcome {
    fn launch_failure(program: &str, source: io::Error) -> Self {
        Self {
            output: String::new(),
            result: Err(MigrationError::ExecutorLaunchFailure {
                program: program.to_string(),
                source,
            }),
        }
    }

    pub fn into_result(self) -> Result<String> {
        self.result.map(|()| self.output)
    }
}

/// Run `program` with `args` as a discrete argument vector (no shell) and
/// block until it exits. There is no timeout here; the executor enforces
/// its own.
pub async fn run(program: &str, args: &[String]) -> RunOutcome {
    let resolved = match which(program) {
        Ok(path) => path,
        Err(err) => {
            return RunOutcome::launch_failure(
                program,
                io::Error::new(io::ErrorKind::NotFound, err),
            )
        }
    };

    let (mut reader, writer) = match io::pipe() {
        Ok(pair) => pair,
        Err(err) => return RunOutcome::launch_failure(program, err),
    };
    let stderr_writer = match writer.try_clone() {
        Ok(clone) => clone,
        Err(err) => return RunOutcome::launch_failure(program, err),
    };

    let mut command = Command::new(&resolved);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(writer)
        .stderr(stderr_writer);
    let spawned = command.spawn();
    // The command holds the parent's write ends; the reader only sees EOF
    // once they are closed.
    drop(command);

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) => return RunOutcome::launch_failure(program, err),
    };
    tracing::debug!("Spawned {} (pid {:?})", resolved.display(), child.id());

    let drain = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        if let Err(err) = reader.read_to_end(&mut buf) {
            tracing::warn!("Failed to read executor output: {}", err);
        }
        buf
    });

    let status = child.wait().await;
    let bytes = match drain.await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!("Executor output reader did not finish: {}", err);
            Vec::new()
        }
    };
    let output = String::from_utf8_lossy(&bytes).into_owned();

    let result = match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(MigrationError::ExecutorNonZeroExit {
            program: program.to_string(),
            status,
            output: output.clone(),
        }),
        Err(source) => Err(MigrationError::ExecutorLaunchFailure {
            program: program.to_string(),
            source,
        }),
    };

    RunOutcome { output, result }
}
