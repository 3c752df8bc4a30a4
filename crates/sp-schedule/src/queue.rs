//! `EventQueue` — a min-heap of timed payloads with tombstone cancellation.
//!
//! # Layout
//!
//! The heap holds only `(time, id)` keys.  Payloads and owners live in a map
//! keyed by `EventId`, which is what lets [`EventQueue::cancel`] and
//! [`EventQueue::cancel_owner`] reach an event that is buried in the heap.
//!
//! Cancelling nulls the event's owner and drops its payload; the heap key is
//! left where it is.  `pop_until` discards such tombstones as they surface.
//!
//! # Growth
//!
//! Under heavy cancellation the heap can hold far more tombstones than live
//! events.  When `tombstones > compaction_threshold × heap length` the heap is
//! rebuilt from the live entries, which is O(n).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::trace;

use sp_core::{AgentId, EventId, IdGen, SensorId, SimTime, SpError, SpResult};

#[cfg(feature = "fx-hash")]
type EventMap<V> = rustc_hash::FxHashMap<EventId, V>;
#[cfg(not(feature = "fx-hash"))]
type EventMap<V> = std::collections::HashMap<EventId, V>;

// ── Owner ─────────────────────────────────────────────────────────────────────

/// The entity an event belongs to.  Removing that entity cancels its events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    /// Owned by the playground itself; only cancelled by id.
    Playground,
    Agent(AgentId),
    Sensor(SensorId),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Playground => f.write_str("playground"),
            Owner::Agent(id) => write!(f, "{id}"),
            Owner::Sensor(id) => write!(f, "{id}"),
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// A live event handed back by [`EventQueue::pop_until`].
#[derive(Debug)]
pub struct Event<P> {
    pub id:      EventId,
    pub time:    SimTime,
    pub owner:   Owner,
    pub payload: P,
}

/// Map-side record of a queued event.  `owner == None` marks a tombstone.
#[derive(Debug)]
struct Pending<P> {
    time:    SimTime,
    owner:   Option<Owner>,
    payload: Option<P>,
}

// ── EventQueue ────────────────────────────────────────────────────────────────

/// Time-ordered event queue that also owns the simulation clock.
pub struct EventQueue<P> {
    heap:       BinaryHeap<Reverse<(SimTime, EventId)>>,
    pending:    EventMap<Pending<P>>,
    now:        SimTime,
    ids:        IdGen,
    tombstones: usize,
    compaction_threshold: f64,
}

impl<P> EventQueue<P> {
    /// An empty queue with the clock at zero.
    ///
    /// `compaction_threshold` is the tombstone share that triggers a heap
    /// rebuild; see the module docs.
    pub fn new(compaction_threshold: f64) -> Self {
        Self {
            heap:       BinaryHeap::new(),
            pending:    EventMap::default(),
            now:        SimTime::ZERO,
            ids:        IdGen::new(),
            tombstones: 0,
            compaction_threshold,
        }
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t` without firing anything.
    ///
    /// # Errors
    /// [`SpError::EventInPast`] if `t` is earlier than the current time.
    pub fn set_now(&mut self, t: SimTime) -> SpResult<()> {
        if t < self.now {
            return Err(SpError::EventInPast { time: t, now: self.now });
        }
        self.now = t;
        Ok(())
    }

    // ── Posting and cancelling ────────────────────────────────────────────

    /// Schedule `payload` at `time` on behalf of `owner`.
    ///
    /// Posting at exactly the current time is allowed; the event fires after
    /// every already-queued event at that time.
    ///
    /// # Errors
    /// - [`SpError::EventInPast`] if `time` is before [`now`](Self::now).
    /// - [`SpError::InvalidValue`] if `time` is not finite.
    pub fn post(&mut self, time: SimTime, owner: Owner, payload: P) -> SpResult<EventId> {
        if !time.is_finite() {
            return Err(SpError::InvalidValue(format!("event time must be finite, got {time}")));
        }
        if time < self.now {
            return Err(SpError::EventInPast { time, now: self.now });
        }
        let id = self.ids.event();
        self.heap.push(Reverse((time, id)));
        self.pending.insert(id, Pending { time, owner: Some(owner), payload: Some(payload) });
        Ok(id)
    }

    /// Tombstone one event.  Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: EventId) -> bool {
        let cancelled = match self.pending.get_mut(&id) {
            Some(p) => tombstone(p),
            None => false,
        };
        if cancelled {
            self.tombstones += 1;
            trace!(%id, "event cancelled");
            self.maybe_compact();
        }
        cancelled
    }

    /// Tombstone every pending event of `owner`.  Returns how many.
    pub fn cancel_owner(&mut self, owner: Owner) -> usize {
        let mut n = 0;
        for p in self.pending.values_mut() {
            if p.owner == Some(owner) && tombstone(p) {
                n += 1;
            }
        }
        if n > 0 {
            self.tombstones += n;
            trace!(%owner, count = n, "owner's events cancelled");
            self.maybe_compact();
        }
        n
    }

    /// `true` if `id` is queued and not cancelled.
    pub fn is_pending(&self, id: EventId) -> bool {
        self.pending.get(&id).is_some_and(|p| p.owner.is_some())
    }

    // ── Popping ───────────────────────────────────────────────────────────

    /// Pop the next live event if its time is `<= limit`, advancing the
    /// clock to that time.  Tombstones reached on the way are discarded.
    ///
    /// Events later than `limit` stay queued and the clock does not move.
    pub fn pop_until(&mut self, limit: SimTime) -> Option<Event<P>> {
        loop {
            let &Reverse((time, id)) = self.heap.peek()?;
            if time > limit {
                return None;
            }
            self.heap.pop();
            let Some(p) = self.pending.remove(&id) else {
                continue;
            };
            match (p.owner, p.payload) {
                (Some(owner), Some(payload)) => {
                    self.now = time;
                    return Some(Event { id, time, owner, payload });
                }
                _ => {
                    self.tombstones -= 1;
                    trace!(%id, %time, "skipped tombstone");
                }
            }
        }
    }

    /// Time of the next live event, discarding any tombstones in front of it.
    pub fn next_time(&mut self) -> Option<SimTime> {
        while let Some(&Reverse((time, id))) = self.heap.peek() {
            match self.pending.get(&id) {
                Some(p) if p.owner.is_some() => return Some(time),
                Some(_) => {
                    self.pending.remove(&id);
                    self.tombstones -= 1;
                }
                None => {}
            }
            self.heap.pop();
        }
        None
    }

    // ── Size and maintenance ──────────────────────────────────────────────

    /// Number of live (non-cancelled) events.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len() - self.tombstones
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancelled events still occupying the heap.
    #[inline]
    pub fn tombstone_count(&self) -> usize {
        self.tombstones
    }

    /// Rebuild the heap without tombstones.
    pub fn compact(&mut self) {
        if self.tombstones == 0 {
            return;
        }
        self.pending.retain(|_, p| p.owner.is_some());
        self.heap = self.pending.iter().map(|(&id, p)| Reverse((p.time, id))).collect();
        trace!(removed = self.tombstones, live = self.heap.len(), "event queue compacted");
        self.tombstones = 0;
    }

    fn maybe_compact(&mut self) {
        if self.tombstones as f64 > self.compaction_threshold * self.heap.len() as f64 {
            self.compact();
        }
    }
}

impl<P> fmt::Debug for EventQueue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("now", &self.now)
            .field("live", &self.len())
            .field("tombstones", &self.tombstones)
            .finish()
    }
}

/// Null the owner and drop the payload.  `false` if already a tombstone.
fn tombstone<P>(p: &mut Pending<P>) -> bool {
    if p.owner.is_none() {
        return false;
    }
    p.owner = None;
    p.payload = None;
    true
}
