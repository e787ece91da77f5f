//! Commands the runtime registers at load time.

use serde_json::Value;

use crate::error::{InvocationError, Result};
use crate::handler::MiCommand;
use crate::record::ResultFields;
use crate::registry::CommandRegistry;
use crate::session::DebugSession;

/// Name controllers hard-code for the exec-file query; stable across
/// releases.
pub const GET_EXEC_FILE: &str = "-micmd-get-exec-file";

/// Name of the session-mutating command that loads an executable.
pub const FILE_EXEC_AND_SYMBOLS: &str = "-file-exec-and-symbols";

/// Reports the executable path of the currently active program space.
///
/// Takes no arguments. When no executable is loaded the `value` field is the
/// empty string; the field itself is always present.
pub struct GetExecFile;

impl MiCommand for GetExecFile {
    fn name(&self) -> &str {
        GET_EXEC_FILE
    }

    fn description(&self) -> &str {
        "Report the executable path of the current program space"
    }

    fn invoke(
        &self,
        session: &mut DebugSession,
        argv: &[String],
    ) -> std::result::Result<ResultFields, InvocationError> {
        if !argv.is_empty() {
            return Err(InvocationError::new(format!(
                "{GET_EXEC_FILE} takes no arguments, got {}",
                argv.len()
            )));
        }
        let mut fields = ResultFields::new();
        fields.insert(
            "value".to_string(),
            Value::String(session.current_progspace().exec_file_display()),
        );
        Ok(fields)
    }
}

/// Loads an executable into the current program space.
pub struct FileExecAndSymbols;

impl MiCommand for FileExecAndSymbols {
    fn name(&self) -> &str {
        FILE_EXEC_AND_SYMBOLS
    }

    fn description(&self) -> &str {
        "Load an executable and its symbols into the current program space"
    }

    fn invoke(
        &self,
        session: &mut DebugSession,
        argv: &[String],
    ) -> std::result::Result<ResultFields, InvocationError> {
        let [path] = argv else {
            return Err(InvocationError::new(format!(
                "{FILE_EXEC_AND_SYMBOLS} expects exactly one argument: the executable path"
            )));
        };
        session.current_progspace_mut().set_executable(path.as_str());
        Ok(ResultFields::new())
    }
}

/// The single load-time registration call.
///
/// # Errors
/// `DuplicateCommand` when a builtin name is already taken, e.g. when the
/// extension is loaded twice into the same registry.
pub fn register_builtins(registry: &mut CommandRegistry) -> Result<()> {
    registry.register(Box::new(GetExecFile))?;
    registry.register(Box::new(FileExecAndSymbols))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::{register_builtins, FileExecAndSymbols, GetExecFile};
    use crate::handler::MiCommand;
    use crate::registry::CommandRegistry;
    use crate::session::DebugSession;
    use serde_json::Value;

    #[test]
    fn given_no_loaded_executable_when_queried_then_value_is_the_empty_string() {
        let mut session = DebugSession::new();
        let fields = GetExecFile.invoke(&mut session, &[]).unwrap();
        assert_eq!(fields["value"], Value::String(String::new()));
    }

    #[test]
    fn given_a_loaded_executable_when_queried_then_value_is_its_path() {
        let mut session = DebugSession::with_exec_file("a.out");
        let fields = GetExecFile.invoke(&mut session, &[]).unwrap();
        assert_eq!(fields["value"], Value::String("a.out".to_string()));
    }

    #[test]
    fn given_surplus_arguments_when_querying_exec_file_then_invocation_fails() {
        let mut session = DebugSession::new();
        let error = GetExecFile
            .invoke(&mut session, &["surplus".to_string()])
            .unwrap_err();
        assert!(error.message().contains("takes no arguments"));
    }

    #[test]
    fn given_a_path_when_loading_an_executable_then_the_session_observes_it() {
        let mut session = DebugSession::new();
        let fields = FileExecAndSymbols
            .invoke(&mut session, &["/tmp/prog".to_string()])
            .unwrap();
        assert!(fields.is_empty());
        assert_eq!(
            session.current_progspace().exec_file_display(),
            "/tmp/prog"
        );
    }

    #[test]
    fn given_a_wrong_arity_when_loading_an_executable_then_invocation_fails() {
        let mut session = DebugSession::new();
        assert!(FileExecAndSymbols.invoke(&mut session, &[]).is_err());
        assert!(FileExecAndSymbols
            .invoke(&mut session, &["a".to_string(), "b".to_string()])
            .is_err());
    }

    #[test]
    fn registering_builtins_twice_is_a_duplicate_command_error() {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry).unwrap();
        assert!(register_builtins(&mut registry).is_err());
        assert_eq!(registry.len(), 2);
    }
}
