//! Exit codes for the CLI

use fotingo_bridge_core::{BridgeError, InvokeError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Release context could not be read or parsed
pub const CONTEXT_ERROR: i32 = 2;

/// Fotingo could not be located or launched
pub const LAUNCH_ERROR: i32 = 3;

/// Fotingo ran and exited with a failing status
pub const FOTINGO_ERROR: i32 = 4;

/// Map an error from a lifecycle hook to a process exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BridgeError>() {
        Some(BridgeError::Context(_)) => CONTEXT_ERROR,
        Some(BridgeError::Io(_)) => CONTEXT_ERROR,
        Some(BridgeError::Invoke(InvokeError::NotFound { .. }))
        | Some(BridgeError::Invoke(InvokeError::Launch { .. })) => LAUNCH_ERROR,
        Some(BridgeError::Invoke(InvokeError::ExitCode { .. })) => FOTINGO_ERROR,
        None => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        let exit: anyhow::Error = BridgeError::Invoke(InvokeError::ExitCode {
            command: "fotingo".to_string(),
            code: 1,
        })
        .into();
        assert_eq!(for_error(&exit), FOTINGO_ERROR);

        let launch: anyhow::Error = BridgeError::Invoke(InvokeError::Launch {
            command: "fotingo".to_string(),
            source: std::io::Error::other("denied"),
        })
        .into();
        assert_eq!(for_error(&launch), LAUNCH_ERROR);

        let other = anyhow::anyhow!("boom");
        assert_eq!(for_error(&other), ERROR);
    }
}
