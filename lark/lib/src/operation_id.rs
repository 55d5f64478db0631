use std::fmt;

use thiserror::Error;

/// Identity of one open-API operation: the service scope plus the API name,
/// rendered as `Scope#Api` (for example `Drive#ConvertDocxBlock`).
///
/// Both halves must start with an ASCII letter and may only contain ASCII
/// alphanumerics or `_`. The id keys the mock registry and tags log events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationId {
    scope: String,
    api: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationIdError {
    #[error("operation {part} cannot be empty")]
    Empty { part: &'static str },
    #[error("operation {part} must start with an ASCII letter")]
    InvalidStartCharacter { part: &'static str },
    #[error("operation {part} contains invalid character: '{ch}'")]
    InvalidCharacter { part: &'static str, ch: char },
}

impl OperationId {
    pub fn new(scope: impl Into<String>, api: impl Into<String>) -> Result<Self, OperationIdError> {
        let scope = scope.into();
        let api = api.into();
        Self::validate("scope", &scope)?;
        Self::validate("api", &api)?;
        Ok(Self { scope, api })
    }

    fn validate(part: &'static str, s: &str) -> Result<(), OperationIdError> {
        let mut chars = s.chars();

        match chars.next() {
            None => return Err(OperationIdError::Empty { part }),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(OperationIdError::InvalidStartCharacter { part });
            }
            _ => {}
        }

        if let Some(ch) = chars.find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
            return Err(OperationIdError::InvalidCharacter { part, ch });
        }

        Ok(())
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn api(&self) -> &str {
        &self.api
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.scope, self.api)
    }
}

impl TryFrom<&str> for OperationId {
    type Error = OperationIdError;

    /// Parses the `Scope#Api` form.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.split_once('#') {
            Some((scope, api)) => Self::new(scope, api),
            None => Self::new(value, ""),
        }
    }
}
