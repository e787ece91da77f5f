//! Command handler contract.
//!
//! Every command the runtime can dispatch implements [`MiCommand`]. Handlers
//! are registered once at load time in a
//! [`CommandRegistry`](crate::registry::CommandRegistry) and invoked by the
//! command loop with the arguments that followed the command name on the
//! request line. The dispatch layer does no argument-schema checking; each
//! handler validates count and shape itself.

use crate::error::InvocationError;
use crate::record::ResultFields;
use crate::session::DebugSession;

pub trait MiCommand: Send + Sync {
    /// Registered command name (e.g. "-micmd-get-exec-file"). Controllers
    /// hard-code this string, so it must stay stable across releases.
    fn name(&self) -> &str;

    /// One-line description for diagnostics.
    fn description(&self) -> &str {
        ""
    }

    /// Answer one request.
    ///
    /// `argv` holds only the arguments after the command name and is owned by
    /// the dispatch call; handlers must not retain it. Ambient session state
    /// is read (or, for session-mutating commands, written) through `session`
    /// at invocation time, never cached; a later command may change it.
    ///
    /// Must return promptly: the controller is blocked on the response line,
    /// and a stalled handler stalls the whole command loop. For the same
    /// reason handlers must not dispatch further commands from inside
    /// `invoke`.
    ///
    /// # Errors
    /// A failing handler raises [`InvocationError`]; it must not encode
    /// failure as a sentinel inside the result mapping.
    fn invoke(
        &self,
        session: &mut DebugSession,
        argv: &[String],
    ) -> Result<ResultFields, InvocationError>;
}

impl std::fmt::Debug for dyn MiCommand + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiCommand")
            .field("name", &self.name())
            .finish()
    }
}
