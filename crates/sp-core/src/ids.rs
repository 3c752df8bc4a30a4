//! Strongly typed identifier wrappers and the per-playground id generator.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer value.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Handle of an agent registered in a playground.
    pub struct AgentId(u32);
}

typed_id! {
    /// Handle of a sensor registered in a playground.
    pub struct SensorId(u32);
}

typed_id! {
    /// Sequence number of a scheduled event.  Strictly increasing in posting
    /// order, so it doubles as the FIFO tie-breaker between equal times.
    pub struct EventId(u64);
}

// ── IdGen ─────────────────────────────────────────────────────────────────────

/// Per-playground source of fresh identifiers.
///
/// Each playground owns one of these, so ids are unique within a simulation
/// without any process-wide counter.  Callers that pick their own ids should
/// call [`IdGen::reserve_agent`] / [`IdGen::reserve_sensor`] so later fresh ids
/// skip past them.
#[derive(Clone, Debug, Default)]
pub struct IdGen {
    next_agent:  u32,
    next_sensor: u32,
    next_event:  u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agent(&mut self) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        id
    }

    pub fn sensor(&mut self) -> SensorId {
        let id = SensorId(self.next_sensor);
        self.next_sensor += 1;
        id
    }

    pub fn event(&mut self) -> EventId {
        let id = EventId(self.next_event);
        self.next_event += 1;
        id
    }

    /// Make sure no later [`agent`](Self::agent) call returns `id`.
    pub fn reserve_agent(&mut self, id: AgentId) {
        self.next_agent = self.next_agent.max(id.0.saturating_add(1));
    }

    /// Make sure no later [`sensor`](Self::sensor) call returns `id`.
    pub fn reserve_sensor(&mut self, id: SensorId) {
        self.next_sensor = self.next_sensor.max(id.0.saturating_add(1));
    }
}
