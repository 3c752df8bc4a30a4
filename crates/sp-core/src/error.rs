//! Playground error type.
//!
//! Every fallible operation in the `sp-*` crates returns [`SpResult`].  Errors
//! are synchronous and local; nothing is retried and nothing is clamped.
//! [`SpError::kind`] groups the variants into the five failure families
//! callers usually branch on.

use thiserror::Error;

use crate::{AgentId, SensorId, SimTime};

/// Coarse classification of an [`SpError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: mismatched dimensions, incompatible shapes, bad values.
    Validation,
    /// Something scheduled or requested in the wrong temporal order.
    TemporalOrdering,
    /// Lookup of an unregistered entity.
    NotFound,
    /// An operation the target does not support in its current state.
    InvalidOperation,
    /// Internal consistency failure.
    State,
}

/// The error type shared by all `sp-*` crates.
#[derive(Debug, Error)]
pub enum SpError {
    // ── Validation ────────────────────────────────────────────────────────
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context:  &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("cannot compare sensor fields: {0}")]
    IncompatibleFields(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("agent {0} is already registered")]
    DuplicateAgent(AgentId),

    #[error("sensor {0} is already registered")]
    DuplicateSensor(SensorId),

    // ── Temporal ordering ─────────────────────────────────────────────────
    #[error("event posted for {time}, which is before the current time {now}")]
    EventInPast { time: SimTime, now: SimTime },

    #[error("interval starting at {start} does not end after it ({end})")]
    EmptyInterval { start: SimTime, end: SimTime },

    #[error("{time} lies outside the motion interval [{start}, {end}]")]
    OutsideInterval {
        time:  SimTime,
        start: SimTime,
        end:   SimTime,
    },

    // ── Not found ─────────────────────────────────────────────────────────
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("sensor {0} not found")]
    SensorNotFound(SensorId),

    #[error("no simplex with basis {0:?}")]
    SimplexNotFound(Vec<SensorId>),

    // ── Invalid operation ─────────────────────────────────────────────────
    #[error("cannot assign a value to non-leaf simplex {0:?}")]
    NonLeafAssignment(Vec<SensorId>),

    #[error("agent {0} is not positioned")]
    NotPositioned(AgentId),

    #[error("agent {0} is not moving")]
    NotMoving(AgentId),

    #[error("sensor {0} is not attached to an agent")]
    Unattached(SensorId),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    // ── State ─────────────────────────────────────────────────────────────
    #[error("agent {agent} is still moving at {now}, after its motion ended at {end}")]
    StaleMotion {
        agent: AgentId,
        now:   SimTime,
        end:   SimTime,
    },
}

impl SpError {
    /// The failure family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpError::DimensionMismatch { .. }
            | SpError::IncompatibleFields(_)
            | SpError::InvalidValue(_)
            | SpError::DuplicateAgent(_)
            | SpError::DuplicateSensor(_) => ErrorKind::Validation,

            SpError::EventInPast { .. }
            | SpError::EmptyInterval { .. }
            | SpError::OutsideInterval { .. } => ErrorKind::TemporalOrdering,

            SpError::AgentNotFound(_)
            | SpError::SensorNotFound(_)
            | SpError::SimplexNotFound(_) => ErrorKind::NotFound,

            SpError::NonLeafAssignment(_)
            | SpError::NotPositioned(_)
            | SpError::NotMoving(_)
            | SpError::Unattached(_)
            | SpError::InvalidOperation(_) => ErrorKind::InvalidOperation,

            SpError::StaleMotion { .. } => ErrorKind::State,
        }
    }
}

/// Shorthand result type for all `sp-*` crates.
pub type SpResult<T> = Result<T, SpError>;
