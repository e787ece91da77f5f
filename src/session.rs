#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

/// One loaded executable's address space and symbol context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramSpace {
    executable: Option<PathBuf>,
}

impl ProgramSpace {
    #[must_use]
    pub const fn new() -> Self {
        Self { executable: None }
    }

    pub fn set_executable(&mut self, path: impl Into<PathBuf>) {
        self.executable = Some(path.into());
    }

    #[must_use]
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }

    /// The path as the wire sees it: lossy string, or "" when nothing is
    /// loaded.
    #[must_use]
    pub fn exec_file_display(&self) -> String {
        self.executable
            .as_deref()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Ambient debugger-session state the command loop dispatches against.
///
/// Owned by the embedding runtime for the lifetime of the session; handlers
/// borrow it only for the duration of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugSession {
    current: ProgramSpace,
}

impl DebugSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: ProgramSpace::new(),
        }
    }

    #[must_use]
    pub fn with_exec_file(path: impl Into<PathBuf>) -> Self {
        let mut session = Self::new();
        session.current.set_executable(path);
        session
    }

    #[must_use]
    pub const fn current_progspace(&self) -> &ProgramSpace {
        &self.current
    }

    pub fn current_progspace_mut(&mut self) -> &mut ProgramSpace {
        &mut self.current
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::DebugSession;

    #[test]
    fn given_an_empty_session_then_exec_file_displays_as_empty_string() {
        let session = DebugSession::new();
        assert_eq!(session.current_progspace().exec_file_display(), "");
        assert!(session.current_progspace().executable().is_none());
    }

    #[test]
    fn given_a_loaded_executable_then_exec_file_displays_its_path() {
        let mut session = DebugSession::new();
        session.current_progspace_mut().set_executable("a.out");
        assert_eq!(session.current_progspace().exec_file_display(), "a.out");
    }

    #[test]
    fn given_a_seeded_session_then_the_initial_executable_is_visible() {
        let session = DebugSession::with_exec_file("/bin/true");
        assert_eq!(
            session.current_progspace().exec_file_display(),
            "/bin/true"
        );
    }
}
