//! Time-parameterised motion between two spacetime points.
//!
//! # Pluggability
//!
//! Agents move along any [`Motion`].  The default [`Trajectory`] is constant
//! linear motion; other shapes implement [`Motion::interpolate`].  A shape
//! that leaves the straight segment between its endpoints **must** also
//! override [`Motion::bounding_box`] (and [`Motion::enters_leaves_at`]),
//! otherwise the playground indexes the wrong sweep and overlap queries made
//! mid-motion miss observers.

use std::fmt;

use crate::{BoundingBox, Position, SimTime, SpError, SpResult};

/// Times at which a path enters and then leaves a box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxCrossing {
    /// First time the path is inside the box (the start time if it starts inside).
    pub enter: SimTime,
    /// Time the path leaves again.  Infinite if it never does.
    pub leave: SimTime,
}

// ── Motion trait ──────────────────────────────────────────────────────────────

/// A motion segment with a start and end (position, time) pair.
///
/// Only [`interval`](Self::interval), [`endpoints`](Self::endpoints),
/// [`interpolate`](Self::interpolate) and [`advance_to`](Self::advance_to)
/// are required.
pub trait Motion: fmt::Debug {
    /// `(start_time, end_time)`, with `start_time < end_time`.
    fn interval(&self) -> (SimTime, SimTime);

    /// `(start_position, end_position)`, of equal dimension.
    fn endpoints(&self) -> (Position, Position);

    /// Position at `t`, which the caller guarantees lies strictly inside the
    /// interval.  This is the interpolation hook.
    fn interpolate(&self, t: SimTime) -> Position;

    /// Re-base the motion so it starts at time `t` from wherever it is then.
    fn advance_to(&mut self, t: SimTime) -> SpResult<()>;

    /// Position at `t`.  Exact at both endpoints.
    ///
    /// # Errors
    /// [`SpError::OutsideInterval`] if `t` lies outside the motion interval.
    fn position_at(&self, t: SimTime) -> SpResult<Position> {
        self.is_within_interval(t, true)?;
        let (start, end) = self.interval();
        let (p0, p1) = self.endpoints();
        if t == start {
            Ok(p0)
        } else if t == end {
            Ok(p1)
        } else {
            Ok(self.interpolate(t))
        }
    }

    /// Box covering every position along the motion.  Spans the endpoints
    /// by default.
    fn bounding_box(&self) -> BoundingBox {
        let (p0, p1) = self.endpoints();
        BoundingBox::spanning(p0, p1)
    }

    /// `true` if `start <= t <= end`.  With `fatal`, fail instead of
    /// returning `false`.
    fn is_within_interval(&self, t: SimTime, fatal: bool) -> SpResult<bool> {
        let (start, end) = self.interval();
        if start <= t && t <= end {
            Ok(true)
        } else if fatal {
            Err(SpError::OutsideInterval { time: t, start, end })
        } else {
            Ok(false)
        }
    }

    /// `true` if `p` lies inside [`bounding_box`](Self::bounding_box).  With
    /// `fatal`, fail instead of returning `false`.
    fn is_within_bounding_box(&self, p: &Position, fatal: bool) -> SpResult<bool> {
        let bb = self.bounding_box();
        if bb.contains(p)? {
            Ok(true)
        } else if fatal {
            Err(SpError::InvalidValue(format!("{p} lies outside the motion's bounding box {bb}")))
        } else {
            Ok(false)
        }
    }

    /// When does the path, followed forward from its start, enter and leave
    /// `bb`?
    ///
    /// The default clips the straight line through the endpoints against each
    /// axis slab of the box, keeping only non-negative times from the start.
    /// Returns `None` if the path never enters.  The result is not clipped to
    /// the motion interval; compare against [`interval`](Self::interval) if
    /// that matters.
    fn enters_leaves_at(&self, bb: &BoundingBox) -> SpResult<Option<BoxCrossing>> {
        let (p0, p1) = self.endpoints();
        p0.check_same_dimension(&bb.bottom_left(), "path/box crossing")?;
        let (start, end) = self.interval();
        let duration = end - start;

        let mut t_in = 0.0_f64;
        let mut t_out = f64::INFINITY;
        for d in 0..p0.dimension() {
            let (lo, hi) = (bb.bottom_left()[d], bb.top_right()[d]);
            let v = (p1[d] - p0[d]) / duration;
            if v == 0.0 {
                let inside = if lo == hi { p0[d] == lo } else { lo < p0[d] && p0[d] < hi };
                if !inside {
                    return Ok(None);
                }
                continue;
            }
            let (a, b) = ((lo - p0[d]) / v, (hi - p0[d]) / v);
            t_in = t_in.max(a.min(b));
            t_out = t_out.min(a.max(b));
        }
        if t_in > t_out {
            return Ok(None);
        }

        // The slabs are closed; confirm the crossing really reaches the open
        // interior by probing its midpoint.
        let probe = if t_out.is_finite() { 0.5 * (t_in + t_out) } else { t_in };
        let at = p0.zip_with(&p1, |a, b| a + (b - a) / duration * probe);
        if !bb.contains(&at)? {
            return Ok(None);
        }
        Ok(Some(BoxCrossing { enter: start + t_in, leave: start + t_out }))
    }
}

// ── Trajectory ────────────────────────────────────────────────────────────────

/// Constant-velocity motion between two spacetime points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Trajectory {
    start:      Position,
    start_time: SimTime,
    end:        Position,
    end_time:   SimTime,
}

impl Trajectory {
    /// # Errors
    ///
    /// - [`SpError::DimensionMismatch`] if the endpoints differ in dimension.
    /// - [`SpError::EmptyInterval`] unless `start_time < end_time`.
    /// - [`SpError::InvalidValue`] for non-finite times.
    pub fn new(
        start:      Position,
        start_time: SimTime,
        end:        Position,
        end_time:   SimTime,
    ) -> SpResult<Self> {
        start.check_same_dimension(&end, "trajectory endpoints")?;
        if !start_time.is_finite() || !end_time.is_finite() {
            return Err(SpError::InvalidValue(format!(
                "trajectory times must be finite ({start_time}, {end_time})"
            )));
        }
        if start_time >= end_time {
            return Err(SpError::EmptyInterval { start: start_time, end: end_time });
        }
        Ok(Self { start, start_time, end, end_time })
    }

    /// Duration of the motion.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

impl Motion for Trajectory {
    fn interval(&self) -> (SimTime, SimTime) {
        (self.start_time, self.end_time)
    }

    fn endpoints(&self) -> (Position, Position) {
        (self.start, self.end)
    }

    fn interpolate(&self, t: SimTime) -> Position {
        let frac = (t - self.start_time) / self.duration();
        self.start.zip_with(&self.end, |a, b| a + (b - a) * frac)
    }

    fn advance_to(&mut self, t: SimTime) -> SpResult<()> {
        let p = self.position_at(t)?;
        if t >= self.end_time {
            return Err(SpError::EmptyInterval { start: t, end: self.end_time });
        }
        self.start = p;
        self.start_time = t;
        Ok(())
    }
}
