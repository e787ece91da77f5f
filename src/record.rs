#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use serde_json::{Map, Value};

/// Ordered field mapping a handler hands back on success.
///
/// `serde_json`'s map preserves insertion order (the `preserve_order`
/// feature), which is what determines field order on the wire.
pub type ResultFields = Map<String, Value>;

/// Class token of a result record: `^done` or `^error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    Done,
    Error,
}

impl ResultClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

/// One completed command, ready for the marshaling layer.
///
/// `token` echoes the numeric prefix of the request line it answers, so the
/// controller can match responses to in-flight commands.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub token: Option<u64>,
    pub class: ResultClass,
    pub fields: ResultFields,
}

impl ResultRecord {
    #[must_use]
    pub const fn done(fields: ResultFields) -> Self {
        Self {
            token: None,
            class: ResultClass::Done,
            fields,
        }
    }

    /// Error record carrying a single `msg` field with the failure text.
    #[must_use]
    pub fn error(message: &str) -> Self {
        let mut fields = ResultFields::new();
        fields.insert("msg".to_string(), Value::String(message.to_string()));
        Self {
            token: None,
            class: ResultClass::Error,
            fields,
        }
    }

    #[must_use]
    pub const fn with_token(mut self, token: Option<u64>) -> Self {
        self.token = token;
        self
    }
}
