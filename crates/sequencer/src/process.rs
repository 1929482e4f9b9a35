//! Blocking external tool invocation.

use std::{ffi::OsStr, process::Command};

use handsign_core::{HandsignCoreError, Result};

/// Runs `program` to completion. Output streams are inherited.
pub fn run_blocking<I, S>(program: &str, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    tracing::debug!("running {command:?}");

    let status = command.status().map_err(|source| HandsignCoreError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !status.success() {
        return Err(HandsignCoreError::ProcessExit {
            program: program.to_string(),
            code: status.code(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_program() {
        let err = run_blocking("handsign-no-such-program", ["--version"]).unwrap_err();
        assert!(matches!(err, HandsignCoreError::Spawn { program, .. } if program == "handsign-no-such-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status() {
        assert!(run_blocking("sh", ["-c", "exit 0"]).is_ok());
        assert!(matches!(
            run_blocking("sh", ["-c", "exit 3"]),
            Err(HandsignCoreError::ProcessExit { code: Some(3), .. })
        ));
    }
}
