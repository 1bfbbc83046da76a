//! External command execution.
//!
//! It owns:
//! - Invocation / CommandOutput (what to run, what came back)
//! - CommandRunner (the seam tests replace with a double)
//! - ConcurrencyGate (the ceiling every invocation passes through)

pub mod gate;
pub mod process;

pub use gate::ConcurrencyGate;
pub use process::ProcessRunner;

use crate::Result;
use crate::error::HdrError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::future::Future;

/// One external command: program, arguments and the tool name used in
/// errors and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: &'static str,
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(tool: &'static str, program: impl Into<OsString>) -> Self {
        Self {
            tool,
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Value following `flag`, if present.
    pub fn flag_value<'a>(&'a self, flag: &'a str) -> Option<&'a OsStr> {
        self.flag_values(flag).next()
    }

    /// Every value following an occurrence of `flag` (e.g. repeated `-ifp`).
    pub fn flag_values<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = &'a OsStr> + 'a {
        self.args
            .windows(2)
            .filter(move |w| w[0] == flag)
            .map(|w| w[1].as_os_str())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished command. `status` is `None` when the
/// process was killed by a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero exit into `HdrError::ToolFailed`.
    pub fn check(self, invocation: &Invocation) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        Err(HdrError::ToolFailed {
            tool: invocation.tool.to_string(),
            status: self.status,
            stderr: String::from_utf8_lossy(&self.stderr).trim().to_string(),
        }
        .into())
    }
}

/// Runs one command to completion and captures its output.
///
/// A non-zero exit status is reported in `CommandOutput`, not as an error;
/// callers decide whether it is fatal. Dropping the returned future must stop
/// the command.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<CommandOutput>>;
}

impl<R: CommandRunner> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<CommandOutput>> {
        (**self).run(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split_invocation() -> Invocation {
        Invocation::new("split", "java")
            .args(["-i", "a.hdr", "-o", "a_write", "-tag", "write"])
    }

    #[test]
    fn flag_lookup() {
        let inv = split_invocation();
        assert_eq!(inv.flag_value("-tag"), Some(OsStr::new("write")));
        assert_eq!(inv.flag_value("-start"), None);

        let merge = Invocation::new("merge", "java").args(["-ifp", "a", "-ifp", "b", "-of", "c"]);
        let inputs: Vec<_> = merge.flag_values("-ifp").collect();
        assert_eq!(inputs, vec![OsStr::new("a"), OsStr::new("b")]);
    }

    #[test]
    fn flag_lookup_with_owned_flag_name() {
        let inv = split_invocation();
        let value = {
            let flag = String::from("-o");
            inv.flag_value(&flag).map(|v| v.to_os_string())
        };
        assert_eq!(value, Some(OsString::from("a_write")));
    }

    #[test]
    fn display_joins_arguments() {
        assert_eq!(
            split_invocation().to_string(),
            "java -i a.hdr -o a_write -tag write"
        );
    }

    #[test]
    fn check_reports_stderr_on_failure() {
        let out = CommandOutput {
            stdout: vec![],
            stderr: b"boom\n".to_vec(),
            status: Some(3),
        };
        let err = out.check(&split_invocation()).unwrap_err();
        match err.downcast_ref::<HdrError>() {
            Some(HdrError::ToolFailed {
                tool,
                status,
                stderr,
            }) => {
                assert_eq!(tool, "split");
                assert_eq!(*status, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn signal_exit_is_a_failure() {
        let out = CommandOutput {
            status: None,
            ..Default::default()
        };
        assert!(!out.success());
        assert!(out.check(&split_invocation()).is_err());
    }
}
