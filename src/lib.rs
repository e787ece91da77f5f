pub mod builtins;
pub mod error;
pub mod handler;
pub mod record;
pub mod registry;
pub mod runtime;
pub mod session;
pub mod wire;

pub use builtins::register_builtins;
pub use error::{InvocationError, MicmdError, Result};
pub use handler::MiCommand;
pub use record::{ResultClass, ResultFields, ResultRecord};
pub use registry::CommandRegistry;
pub use session::{DebugSession, ProgramSpace};
