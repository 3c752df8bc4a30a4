//! `sp-schedule` — the playground's event queue and simulation clock.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`queue`] | `EventQueue<P>`, `Event<P>`, `Owner`                      |
//!
//! # Ordering model (summary)
//!
//! Events pop in `(time, EventId)` order.  `EventId`s are handed out in
//! posting order, so two events at the same time fire first-posted first.
//! The clock only moves forward, and only as events are popped (or when the
//! caller sets it explicitly with [`EventQueue::set_now`]).
//!
//! Cancelled events stay in the heap as tombstones and are dropped when they
//! reach the top.  Once tombstones pass a configurable share of the queue the
//! heap is rebuilt without them.

pub mod queue;


pub use queue::{Event, EventQueue, Owner};
