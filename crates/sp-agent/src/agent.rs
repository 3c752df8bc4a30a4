//! A single agent: identity, kind, where it is, and which sensors it carries.

use tracing::debug;

use sp_core::{
    AgentId, BoundingBox, Motion, Position, SensorId, SimTime, SpError, SpResult, Trajectory,
};

/// Where an agent is.  A static position and a motion never coexist.
#[derive(Debug, Default)]
pub enum Placement {
    /// Not yet placed.
    #[default]
    Unplaced,
    Static(Position),
    /// Following a motion; the position is interpolated from the clock.
    Moving(Box<dyn Motion>),
}

/// An agent in the playground.
#[derive(Debug)]
pub struct Agent {
    id:        AgentId,
    kind:      String,
    placement: Placement,
    sensors:   Vec<SensorId>,
}

impl Agent {
    /// An unplaced agent of kind `"agent"`.
    pub fn new(id: AgentId) -> Self {
        Self { id, kind: "agent".to_owned(), placement: Placement::Unplaced, sensors: Vec::new() }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Start out statically at `p`.
    pub fn at(mut self, p: Position) -> Self {
        self.placement = Placement::Static(p);
        self
    }

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Handles of the sensors mounted on this agent, in attachment order.
    #[inline]
    pub fn sensors(&self) -> &[SensorId] {
        &self.sensors
    }

    // ── Position ──────────────────────────────────────────────────────────

    /// The static position, or `None` if unplaced or moving.
    pub fn position(&self) -> Option<Position> {
        match self.placement {
            Placement::Static(p) => Some(p),
            _ => None,
        }
    }

    /// Position at time `now`, interpolating any active motion.
    ///
    /// # Errors
    ///
    /// - [`SpError::NotPositioned`] if the agent was never placed.
    /// - [`SpError::StaleMotion`] if `now` is past the end of a motion that
    ///   was never finished.
    /// - [`SpError::OutsideInterval`] if `now` is before the motion starts.
    pub fn position_at(&self, now: SimTime) -> SpResult<Position> {
        match &self.placement {
            Placement::Unplaced => Err(SpError::NotPositioned(self.id)),
            Placement::Static(p) => Ok(*p),
            Placement::Moving(m) => {
                let (_, end) = m.interval();
                if now > end {
                    return Err(SpError::StaleMotion { agent: self.id, now, end });
                }
                m.position_at(now)
            }
        }
    }

    /// Place the agent statically at `p`, dropping any motion.
    pub fn set_position(&mut self, p: Position) {
        self.placement = Placement::Static(p);
    }

    /// `true` if placed (statically or moving).  With `fatal`, fail instead
    /// of returning `false`.
    pub fn is_positioned(&self, fatal: bool) -> SpResult<bool> {
        match self.placement {
            Placement::Unplaced if fatal => Err(SpError::NotPositioned(self.id)),
            Placement::Unplaced => Ok(false),
            _ => Ok(true),
        }
    }

    /// `true` if following a motion.  With `fatal`, fail instead of
    /// returning `false`.
    pub fn is_moving(&self, fatal: bool) -> SpResult<bool> {
        match self.placement {
            Placement::Moving(_) => Ok(true),
            _ if fatal => Err(SpError::NotMoving(self.id)),
            _ => Ok(false),
        }
    }

    /// The active motion, if any.
    pub fn trajectory(&self) -> Option<&dyn Motion> {
        match &self.placement {
            Placement::Moving(m) => Some(m.as_ref()),
            _ => None,
        }
    }

    /// Euclidean distance to `other` at time `now`.
    pub fn distance_to(&self, other: &Agent, now: SimTime) -> SpResult<f64> {
        self.position_at(now)?.distance_to(&other.position_at(now)?)
    }

    /// The box to index this agent under: its point, or the sweep of its
    /// motion.  `None` if unplaced.
    pub fn index_box(&self) -> Option<BoundingBox> {
        match &self.placement {
            Placement::Unplaced => None,
            Placement::Static(p) => Some(BoundingBox::point(*p)),
            Placement::Moving(m) => Some(m.bounding_box()),
        }
    }

    // ── Motion ────────────────────────────────────────────────────────────

    /// Start following `motion`, which must begin where the agent is at
    /// time `now`, and at `now`.
    ///
    /// # Errors
    /// [`SpError::InvalidValue`] if the motion starts elsewhere or at another
    /// time, plus any error from [`position_at`](Self::position_at).
    pub fn begin_motion(&mut self, motion: Box<dyn Motion>, now: SimTime) -> SpResult<()> {
        let here = self.position_at(now)?;
        let (start, _) = motion.endpoints();
        if start != here {
            return Err(SpError::InvalidValue(format!(
                "motion for {} starts at {start}, not at the agent's position {here}",
                self.id
            )));
        }
        let (t0, _) = motion.interval();
        if t0 != now {
            return Err(SpError::InvalidValue(format!(
                "motion for {} starts at {t0}, not at the current time {now}",
                self.id
            )));
        }
        debug!(agent = %self.id, ?motion, "motion begins");
        self.placement = Placement::Moving(motion);
        Ok(())
    }

    /// Move linearly from the current position to `end`, starting at `now`
    /// and arriving `duration` later.
    pub fn move_to(&mut self, end: Position, duration: f64, now: SimTime) -> SpResult<()> {
        let here = self.position_at(now)?;
        let motion = Trajectory::new(here, now, end, now + duration)?;
        self.begin_motion(Box::new(motion), now)
    }

    /// Collapse an active motion to a static position at its end point.
    ///
    /// # Errors
    /// [`SpError::NotMoving`] if there is no motion.
    pub fn finish_motion(&mut self) -> SpResult<Position> {
        let end = match &self.placement {
            Placement::Moving(m) => m.endpoints().1,
            _ => return Err(SpError::NotMoving(self.id)),
        };
        self.placement = Placement::Static(end);
        debug!(agent = %self.id, %end, "motion finished");
        Ok(end)
    }

    // ── Sensor handles (maintained by the playground) ─────────────────────

    #[doc(hidden)]
    pub fn record_sensor(&mut self, sensor: SensorId) {
        if !self.sensors.contains(&sensor) {
            self.sensors.push(sensor);
        }
    }

    #[doc(hidden)]
    pub fn forget_sensor(&mut self, sensor: SensorId) -> bool {
        let before = self.sensors.len();
        self.sensors.retain(|&s| s != sensor);
        self.sensors.len() != before
    }
}
