//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`CommandError`, `SetupError`) are defined next to
//! the code that raises them. They share the classification defined here so a
//! host can decide what to log and what to silently drop.
//!
//! Gameplay errors never escape the engine as panics: a rejected command
//! leaves the state untouched and reports why.

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the action is illegal right now but may be legal later
/// - **Validation**: the request itself is malformed or references nothing
/// - **Internal**: state inconsistency that indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Illegal in the current situation (wrong mode, not enough currency).
    Recoverable,

    /// Dangling reference or malformed request.
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
