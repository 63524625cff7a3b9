//! Common error infrastructure for region-map-core.
//!
//! The taxonomy is narrow: missing table data never becomes an error (each
//! lookup has a placeholder), so what remains are table consistency failures
//! caught at construction and the failures that end a session.

use crate::session::Continuation;
use crate::types::{Position, SectionId};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition, may succeed on retry.
    Recoverable,

    /// Invalid input or data, should not retry without changes.
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,

    /// The session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all region-map-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the Display/Error impl and classify
/// severity by recoverability, not impact.
pub trait RegionMapError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Irrecoverable condition reported by a display driver.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverFault {
    #[error("display device lost")]
    DeviceLost,

    #[error("video memory exhausted while loading {0}")]
    VramExhausted(&'static str),

    #[error("sprite pool exhausted")]
    SpritePoolExhausted,
}

/// Failures that end a region map session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The working buffers could not be obtained.
    #[error("region map needs {requested} bytes but only {budget} are available")]
    AllocationFailed {
        requested: usize,
        budget: usize,
        fallback: Continuation,
    },

    #[error("display driver fault: {0}")]
    Driver(#[from] DriverFault),

    /// A task was pushed onto a full task stack.
    #[error("task stack overflow at depth {depth}")]
    TaskStackOverflow { depth: usize },
}

impl SessionError {
    /// Continuation the caller should resume instead of the map screen.
    pub fn fallback(&self) -> Continuation {
        match self {
            SessionError::AllocationFailed { fallback, .. } => *fallback,
            SessionError::Driver(_) | SessionError::TaskStackOverflow { .. } => Continuation::ReturnToField,
        }
    }
}

impl RegionMapError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::AllocationFailed { .. } | SessionError::Driver(_) => ErrorSeverity::Fatal,
            SessionError::TaskStackOverflow { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::AllocationFailed { .. } => "SESSION_ALLOCATION_FAILED",
            SessionError::Driver(_) => "SESSION_DRIVER_FAULT",
            SessionError::TaskStackOverflow { .. } => "SESSION_TASK_STACK_OVERFLOW",
        }
    }
}

/// Consistency failures detected while building section tables and layouts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("section {0} is outside the section namespace")]
    SectionOutOfRange(SectionId),

    #[error("section {0} is defined more than once")]
    DuplicateSection(SectionId),

    #[error("section {0} has an empty name")]
    EmptyName(SectionId),

    #[error("section {0} has a zero-sized span")]
    EmptySpan(SectionId),

    #[error("section {section} origin {origin:?} lies outside the map grid")]
    OriginOutOfBounds { section: SectionId, origin: Position },

    #[error("layout cell {position:?} references undefined section {section}")]
    UnknownSection { section: SectionId, position: Position },

    #[error("layout cell {0:?} lies outside the map grid")]
    CellOutOfBounds(Position),
}

impl RegionMapError for TableError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use TableError::*;
        match self {
            SectionOutOfRange(_) => "TABLE_SECTION_OUT_OF_RANGE",
            DuplicateSection(_) => "TABLE_DUPLICATE_SECTION",
            EmptyName(_) => "TABLE_EMPTY_NAME",
            EmptySpan(_) => "TABLE_EMPTY_SPAN",
            OriginOutOfBounds { .. } => "TABLE_ORIGIN_OUT_OF_BOUNDS",
            UnknownSection { .. } => "TABLE_UNKNOWN_SECTION",
            CellOutOfBounds(_) => "TABLE_CELL_OUT_OF_BOUNDS",
        }
    }
}
