//! The `Playground`: agents, sensors, the spatial index, and the event loop.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, info, trace, warn};

use sp_agent::{Agent, AgentStore, Placement};
use sp_core::{
    AgentId, BoundingBox, EventId, IdGen, Motion, PlaygroundConfig, Position, SensorId, SimTime,
    SpError, SpResult, Trajectory,
};
use sp_schedule::{Event, EventQueue, Owner};
use sp_sensor::{Sensor, SensorField, SensorSource, Sighting, SimpleSensor};
use sp_spatial::{EntityKey, SpatialIndex};

use crate::{Action, NoopObserver, PlaygroundObserver};

/// A registered sensor and the agent carrying it, if any.
#[derive(Debug)]
struct SensorSlot {
    sensor: Box<dyn Sensor>,
    agent:  Option<AgentId>,
}

/// Owns every agent, sensor, and pending event of one simulation.
///
/// Ids are unique per playground.  Agents and sensors are registered here and
/// referred to by [`AgentId`] / [`SensorId`] afterwards; the playground keeps
/// the spatial index in step with every placement change.
pub struct Playground {
    config:  PlaygroundConfig,
    ids:     IdGen,
    agents:  AgentStore,
    sensors: BTreeMap<SensorId, SensorSlot>,
    index:   SpatialIndex,
    queue:   EventQueue<Action>,
    /// `(start, end)` events of each agent's current motion.
    motions: HashMap<AgentId, (EventId, EventId)>,
    /// Agents removed since the observer last heard about it.
    removed: Vec<AgentId>,
}

impl Playground {
    /// An empty playground with the clock at zero.
    ///
    /// # Errors
    /// [`SpError::InvalidValue`] if the dimension is not 2 or 3, the maximum
    /// simulation time is NaN, or the compaction threshold is negative or not
    /// finite.
    pub fn new(config: PlaygroundConfig) -> SpResult<Self> {
        if !matches!(config.dimension, 2 | 3) {
            return Err(SpError::InvalidValue(format!(
                "playground dimension must be 2 or 3, got {}",
                config.dimension
            )));
        }
        if config.max_simulation_time.as_f64().is_nan() {
            return Err(SpError::InvalidValue("maximum simulation time is NaN".to_owned()));
        }
        let threshold = config.compaction_threshold;
        if !(threshold.is_finite() && threshold >= 0.0) {
            return Err(SpError::InvalidValue(format!(
                "compaction threshold must be finite and non-negative, got {threshold}"
            )));
        }
        Ok(Self {
            ids:     IdGen::new(),
            agents:  AgentStore::new(),
            sensors: BTreeMap::new(),
            index:   SpatialIndex::new(config.dimension),
            queue:   EventQueue::new(threshold),
            motions: HashMap::new(),
            removed: Vec::new(),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// Positions entering the playground must have its dimension and finite
    /// coordinates.
    fn check_position(&self, p: &Position, context: &'static str) -> SpResult<()> {
        if p.dimension() != self.config.dimension {
            return Err(SpError::DimensionMismatch {
                context,
                expected: self.config.dimension,
                got: p.dimension(),
            });
        }
        if !p.coords().iter().all(|c| c.is_finite()) {
            return Err(SpError::InvalidValue(format!("{context} {p} is not finite")));
        }
        Ok(())
    }

    fn check_box(&self, bb: &BoundingBox, context: &'static str) -> SpResult<()> {
        self.check_position(&bb.bottom_left(), context)?;
        self.check_position(&bb.top_right(), context)
    }

    /// Check every box that placing `agent` under `carrier` would index:
    /// the carrier itself and the fields of its sensors.
    fn check_placement(&self, agent: &Agent, carrier: &BoundingBox) -> SpResult<()> {
        self.check_box(carrier, "agent box")?;
        for s in agent.sensors() {
            self.check_box(&field_box(self.slot(*s)?.sensor.as_ref(), carrier)?, "sensor field")?;
        }
        Ok(())
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// A fresh agent id, unused in this playground.
    pub fn new_agent_id(&mut self) -> AgentId {
        self.ids.agent()
    }

    /// Register `agent`.  It may be unplaced or static; start motions with
    /// [`move_to`](Self::move_to) once it is registered.
    ///
    /// # Errors
    /// - [`SpError::DuplicateAgent`] if its id is taken.
    /// - [`SpError::DimensionMismatch`] for a position of the wrong dimension.
    /// - [`SpError::InvalidOperation`] if it is already moving or already
    ///   lists sensors.
    pub fn add_agent(&mut self, agent: Agent) -> SpResult<AgentId> {
        let id = agent.id();
        if self.agents.contains(id) {
            return Err(SpError::DuplicateAgent(id));
        }
        if !agent.sensors().is_empty() {
            return Err(SpError::InvalidOperation(format!(
                "{id} already lists sensors; attach them through the playground"
            )));
        }
        match agent.placement() {
            Placement::Unplaced => {}
            Placement::Static(p) => self.check_position(p, "agent position")?,
            Placement::Moving(_) => {
                return Err(SpError::InvalidOperation(format!(
                    "{id} must be registered before it starts moving"
                )));
            }
        }
        let bb = agent.index_box();
        self.agents.insert(agent)?;
        self.ids.reserve_agent(id);
        if let Some(bb) = bb {
            self.index.upsert(EntityKey::Agent(id), bb)?;
        }
        debug!(agent = %id, "agent added");
        Ok(id)
    }

    /// Register a fresh agent of kind `"agent"`, statically at `p`.
    pub fn add_agent_at(&mut self, p: Position) -> SpResult<AgentId> {
        let id = self.ids.agent();
        self.add_agent(Agent::new(id).at(p))
    }

    /// Remove an agent.  Its pending events and those of its sensors are
    /// cancelled, and its sensors are left registered but unattached.
    pub fn remove_agent(&mut self, id: AgentId) -> SpResult<Agent> {
        let mut agent = self.agents.remove(id)?;
        let mut cancelled = self.queue.cancel_owner(Owner::Agent(id));
        for s in agent.sensors().to_vec() {
            cancelled += self.queue.cancel_owner(Owner::Sensor(s));
            if let Some(slot) = self.sensors.get_mut(&s) {
                slot.agent = None;
            }
            self.index.remove(&EntityKey::Field(s));
            agent.forget_sensor(s);
        }
        self.index.remove(&EntityKey::Agent(id));
        self.motions.remove(&id);
        self.removed.push(id);
        debug!(agent = %id, cancelled, "agent removed");
        Ok(agent)
    }

    pub fn agent(&self, id: AgentId) -> SpResult<&Agent> {
        self.agents.get(id)
    }

    #[inline]
    pub fn contains_agent(&self, id: AgentId) -> bool {
        self.agents.contains(id)
    }

    /// Every registered agent, by id.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter()
    }

    /// Where the agent is now.
    pub fn agent_position(&self, id: AgentId) -> SpResult<Position> {
        self.agents.get(id)?.position_at(self.now())
    }

    // ── Sensors ───────────────────────────────────────────────────────────

    /// A fresh sensor id, unused in this playground.
    pub fn new_sensor_id(&mut self) -> SensorId {
        self.ids.sensor()
    }

    /// Register `sensor` and mount it on `agent`.  Nothing is registered if
    /// this fails.
    ///
    /// # Errors
    /// - [`SpError::DuplicateSensor`] if its id is taken.
    /// - [`SpError::AgentNotFound`].
    /// - [`SpError::DimensionMismatch`] / [`SpError::InvalidValue`] if its
    ///   field of view at the agent is not a finite box of the playground's
    ///   dimension.
    pub fn add_sensor(&mut self, sensor: Box<dyn Sensor>, agent: AgentId) -> SpResult<SensorId> {
        let id = sensor.id();
        if self.sensors.contains_key(&id) {
            return Err(SpError::DuplicateSensor(id));
        }
        if let Some(carrier) = self.agents.get(agent)?.index_box() {
            self.check_box(&field_box(sensor.as_ref(), &carrier)?, "sensor field")?;
        }
        self.ids.reserve_sensor(id);
        self.sensors.insert(id, SensorSlot { sensor, agent: None });
        self.attach_sensor(id, agent)?;
        Ok(id)
    }

    /// Mount a fresh [`SimpleSensor`] of radius `radius` on `agent`.
    pub fn add_simple_sensor(&mut self, agent: AgentId, radius: f64) -> SpResult<SensorId> {
        let sensor = SimpleSensor::new(self.ids.sensor(), radius)?;
        self.add_sensor(Box::new(sensor), agent)
    }

    /// Mount `sensor` on `agent`, taking it off any previous agent.  On error
    /// the sensor stays where it was.
    pub fn attach_sensor(&mut self, sensor: SensorId, agent: AgentId) -> SpResult<()> {
        let fov = match self.agents.get(agent)?.index_box() {
            Some(carrier) => Some(field_box(self.slot(sensor)?.sensor.as_ref(), &carrier)?),
            None => None,
        };
        if let Some(fov) = &fov {
            self.check_box(fov, "sensor field")?;
        }
        let slot = self.sensors.get_mut(&sensor).ok_or(SpError::SensorNotFound(sensor))?;
        if let Some(prev) = slot.agent.replace(agent) {
            if let Ok(prev) = self.agents.get_mut(prev) {
                prev.forget_sensor(sensor);
            }
        }
        self.agents.get_mut(agent)?.record_sensor(sensor);
        match fov {
            Some(fov) => self.index.upsert(EntityKey::Field(sensor), fov)?,
            None => {
                self.index.remove(&EntityKey::Field(sensor));
            }
        }
        debug!(%sensor, %agent, "sensor attached");
        Ok(())
    }

    /// Take `sensor` off its agent.  Returns the agent it was on.
    ///
    /// Pending samples stay queued and fail with [`SpError::Unattached`] if
    /// they fire before the sensor is attached again.
    pub fn detach_sensor(&mut self, sensor: SensorId) -> SpResult<AgentId> {
        let slot = self.sensors.get_mut(&sensor).ok_or(SpError::SensorNotFound(sensor))?;
        let agent = slot.agent.take().ok_or(SpError::Unattached(sensor))?;
        if let Ok(a) = self.agents.get_mut(agent) {
            a.forget_sensor(sensor);
        }
        self.index.remove(&EntityKey::Field(sensor));
        debug!(%sensor, %agent, "sensor detached");
        Ok(agent)
    }

    /// Unregister `sensor`, cancelling its pending events.
    pub fn remove_sensor(&mut self, sensor: SensorId) -> SpResult<Box<dyn Sensor>> {
        if self.slot(sensor)?.agent.is_some() {
            self.detach_sensor(sensor)?;
        }
        self.queue.cancel_owner(Owner::Sensor(sensor));
        let slot = self.sensors.remove(&sensor).ok_or(SpError::SensorNotFound(sensor))?;
        Ok(slot.sensor)
    }

    fn slot(&self, id: SensorId) -> SpResult<&SensorSlot> {
        self.sensors.get(&id).ok_or(SpError::SensorNotFound(id))
    }

    pub fn sensor(&self, id: SensorId) -> SpResult<&dyn Sensor> {
        Ok(self.slot(id)?.sensor.as_ref())
    }

    /// The sensor as its concrete type.
    ///
    /// # Errors
    /// [`SpError::InvalidOperation`] if it is not a `T`.
    pub fn sensor_as<T: Sensor + 'static>(&self, id: SensorId) -> SpResult<&T> {
        self.sensor(id)?.as_any().downcast_ref::<T>().ok_or_else(|| {
            SpError::InvalidOperation(format!(
                "{id} is not a {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Every registered sensor, by id.
    pub fn sensors(&self) -> impl Iterator<Item = &dyn Sensor> + '_ {
        self.sensors.values().map(|slot| slot.sensor.as_ref())
    }

    /// The agent carrying `id`, if any.
    pub fn sensor_agent(&self, id: SensorId) -> SpResult<Option<AgentId>> {
        Ok(self.slot(id)?.agent)
    }

    /// Where the sensor is now: its agent's position.
    pub fn sensor_position(&self, id: SensorId) -> SpResult<Position> {
        let agent = self.slot(id)?.agent.ok_or(SpError::Unattached(id))?;
        self.agent_position(agent)
    }

    // ── Index maintenance ─────────────────────────────────────────────────

    fn reindex_agent(&mut self, id: AgentId) -> SpResult<()> {
        let agent = self.agents.get(id)?;
        let bb = agent.index_box();
        let sensors = agent.sensors().to_vec();
        match bb {
            Some(bb) => self.index.upsert(EntityKey::Agent(id), bb)?,
            None => {
                self.index.remove(&EntityKey::Agent(id));
            }
        }
        for s in sensors {
            self.reindex_field(s)?;
        }
        Ok(())
    }

    fn reindex_field(&mut self, id: SensorId) -> SpResult<()> {
        let slot = self.slot(id)?;
        let bb = match slot.agent.map(|a| self.agents.get(a)).transpose()? {
            Some(agent) => match agent.index_box() {
                Some(carrier) => Some(field_box(slot.sensor.as_ref(), &carrier)?),
                None => None,
            },
            None => None,
        };
        match bb {
            Some(bb) => self.index.upsert(EntityKey::Field(id), bb)?,
            None => {
                self.index.remove(&EntityKey::Field(id));
            }
        }
        Ok(())
    }

    // ── Motion ────────────────────────────────────────────────────────────

    /// Place the agent statically at `p`, abandoning any motion.
    pub fn set_agent_position(&mut self, id: AgentId, p: Position) -> SpResult<()> {
        self.check_position(&p, "agent position")?;
        self.check_placement(self.agents.get(id)?, &BoundingBox::point(p))?;
        self.agents.get_mut(id)?.set_position(p);
        self.cancel_motion_events(id);
        self.reindex_agent(id)
    }

    /// Move linearly from where the agent is now to `end`, arriving
    /// `duration` later.
    pub fn move_to(&mut self, id: AgentId, end: Position, duration: f64) -> SpResult<()> {
        let now = self.now();
        let here = self.agent_position(id)?;
        let motion = Trajectory::new(here, now, end, now + duration)?;
        self.move_along(id, Box::new(motion))
    }

    /// Follow `motion`, which must start where the agent is now, and now.
    ///
    /// Replaces any motion in progress.  The agent is indexed under the
    /// motion's bounding box until it arrives, and an event at the end time
    /// collapses it to the end point.  On error the agent keeps its current
    /// placement and events.
    ///
    /// # Errors
    /// - [`SpError::DimensionMismatch`] / [`SpError::InvalidValue`] for
    ///   endpoints or a sweep box that are not finite in the playground's
    ///   dimension, or a non-finite end time.
    /// - [`SpError::EmptyInterval`] if the motion does not end after it
    ///   starts.
    /// - Anything [`Agent::begin_motion`] reports.
    pub fn move_along(&mut self, id: AgentId, motion: Box<dyn Motion>) -> SpResult<()> {
        let (start, end) = motion.endpoints();
        self.check_position(&start, "motion start")?;
        self.check_position(&end, "motion end")?;
        let (t0, t1) = motion.interval();
        if !t1.is_finite() {
            return Err(SpError::InvalidValue(format!("motion end time {t1} is not finite")));
        }
        if t1 <= t0 {
            return Err(SpError::EmptyInterval { start: t0, end: t1 });
        }
        self.check_placement(self.agents.get(id)?, &motion.bounding_box())?;
        let now = self.now();
        self.agents.get_mut(id)?.begin_motion(motion, now)?;
        self.cancel_motion_events(id);
        self.reindex_agent(id)?;
        let start = self.queue.post(t0, Owner::Agent(id), Action::MotionStart(id))?;
        let end = self.queue.post(t1, Owner::Agent(id), Action::MotionEnd(id))?;
        self.motions.insert(id, (start, end));
        Ok(())
    }

    fn cancel_motion_events(&mut self, id: AgentId) {
        if let Some((start, end)) = self.motions.remove(&id) {
            self.queue.cancel(start);
            self.queue.cancel(end);
        }
    }

    fn finish_motion(&mut self, id: AgentId) -> SpResult<Position> {
        self.motions.remove(&id);
        let end = self.agents.get_mut(id)?.finish_motion()?;
        self.reindex_agent(id)?;
        Ok(end)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The box `key` is currently indexed under.
    pub fn indexed_box(&self, key: EntityKey) -> Option<BoundingBox> {
        self.index.get(&key).copied()
    }

    /// Every indexed entity whose box intersects `bb`, sorted.
    ///
    /// Uses the open convention of [`BoundingBox::intersects`]: boxes that
    /// only share an edge or corner with `bb` are left out.
    pub fn all_bounding_boxes_intersecting(&self, bb: &BoundingBox) -> SpResult<Vec<EntityKey>> {
        let mut out = Vec::new();
        for key in self.index.query(bb)? {
            if let Some(stored) = self.index.get(&key) {
                if stored.intersects(bb)? {
                    out.push(key);
                }
            }
        }
        Ok(out)
    }

    /// Agents, other than the sensor's own, whose indexed box touches the
    /// sensor's field of view.  Sorted by id.
    ///
    /// This is a candidate set: the sensor decides which of them it
    /// actually detects.
    pub fn all_agents_within_field_of_view(
        &self,
        sensor: SensorId,
        kind:   Option<&str>,
    ) -> SpResult<Vec<AgentId>> {
        let slot = self.slot(sensor)?;
        let carrier = slot.agent.ok_or(SpError::Unattached(sensor))?;
        let fov = slot.sensor.field_of_view(self.agent_position(carrier)?);
        let mut out = Vec::new();
        for key in self.index.query(&fov)? {
            let EntityKey::Agent(a) = key else { continue };
            if a == carrier {
                continue;
            }
            if let Some(kind) = kind {
                if self.agents.get(a)?.kind() != kind {
                    continue;
                }
            }
            out.push(a);
        }
        Ok(out)
    }

    /// Sensors, other than the agent's own, whose indexed field of view
    /// contains the agent's current position.  Sorted by id.
    pub fn all_sensors_observing(
        &self,
        agent: AgentId,
        kind:  Option<&str>,
    ) -> SpResult<Vec<SensorId>> {
        let p = self.agent_position(agent)?;
        let mut out = Vec::new();
        for key in self.index.query(&BoundingBox::point(p))? {
            let EntityKey::Field(s) = key else { continue };
            let slot = self.slot(s)?;
            if slot.agent == Some(agent) || kind.is_some_and(|k| slot.sensor.kind() != k) {
                continue;
            }
            let inside = match self.index.get(&key) {
                Some(bb) => bb.contains(&p)?,
                None => false,
            };
            if inside {
                out.push(s);
            }
        }
        Ok(out)
    }

    /// Push a notification from `agent` to every sensor observing it that
    /// detects it and accepts triggers.  Returns how many received it.
    pub fn trigger_from(&mut self, agent: AgentId, kind: Option<&str>) -> SpResult<usize> {
        let now = self.now();
        let p = self.agent_position(agent)?;
        let mut delivered = 0;
        for s in self.all_sensors_observing(agent, kind)? {
            let at = self.sensor_position(s)?;
            let slot = self.sensors.get_mut(&s).ok_or(SpError::SensorNotFound(s))?;
            if !slot.sensor.detects_target(at, &p)? {
                continue;
            }
            if let Some(t) = slot.sensor.as_triggered_mut() {
                t.triggered_by(agent, now)?;
                delivered += 1;
            }
        }
        debug!(%agent, delivered, "trigger delivered");
        Ok(delivered)
    }

    /// Sample `sensor` now.  Returns the number of targets it detected.
    pub fn sample_sensor(&mut self, sensor: SensorId) -> SpResult<usize> {
        let now = self.now();
        let target_kind = self.slot(sensor)?.sensor.target_kind().map(str::to_owned);
        let at = self.sensor_position(sensor)?;
        let in_view = self
            .all_agents_within_field_of_view(sensor, target_kind.as_deref())?
            .into_iter()
            .map(|agent| Ok(Sighting { agent, position: self.agent_position(agent)? }))
            .collect::<SpResult<Vec<_>>>()?;
        let slot = self.sensors.get_mut(&sensor).ok_or(SpError::SensorNotFound(sensor))?;
        let n = slot.sensor.sample(now, at, &in_view)?;
        trace!(%sensor, %now, candidates = in_view.len(), detected = n, "sampled");
        Ok(n)
    }

    // ── Events ────────────────────────────────────────────────────────────

    fn check_owner(&self, owner: Owner) -> SpResult<()> {
        match owner {
            Owner::Playground => Ok(()),
            Owner::Agent(a) if !self.agents.contains(a) => Err(SpError::AgentNotFound(a)),
            Owner::Sensor(s) if !self.sensors.contains_key(&s) => Err(SpError::SensorNotFound(s)),
            _ => Ok(()),
        }
    }

    fn owner_alive(&self, owner: Owner) -> bool {
        self.check_owner(owner).is_ok()
    }

    /// Run `f` at `time` on behalf of `owner`.
    ///
    /// # Errors
    /// [`SpError::EventInPast`] if `time` is before now, or a not-found error
    /// for an unregistered owner.
    pub fn post_event<F>(&mut self, time: SimTime, owner: Owner, f: F) -> SpResult<EventId>
    where
        F: FnOnce(&mut Playground, SimTime) -> SpResult<()> + 'static,
    {
        self.check_owner(owner)?;
        self.queue.post(time, owner, Action::Call(Box::new(f)))
    }

    /// Run `f` `delay` after now.
    pub fn post_event_in<F>(&mut self, delay: f64, owner: Owner, f: F) -> SpResult<EventId>
    where
        F: FnOnce(&mut Playground, SimTime) -> SpResult<()> + 'static,
    {
        let time = self.now() + delay;
        self.post_event(time, owner, f)
    }

    /// Run `f` at `first` and every `interval` after, for as long as `owner`
    /// stays registered.  The returned id cancels only the first firing; use
    /// the owner to stop a repetition already under way.
    pub fn post_repeating_event<F>(
        &mut self,
        first:    SimTime,
        interval: f64,
        owner:    Owner,
        f:        F,
    ) -> SpResult<EventId>
    where
        F: FnMut(&mut Playground, SimTime) -> SpResult<()> + 'static,
    {
        check_interval(interval)?;
        self.check_owner(owner)?;
        self.queue.post(first, owner, Action::Repeat { interval, f: Box::new(f) })
    }

    /// Sample `sensor` at `time`.
    pub fn post_sample(&mut self, sensor: SensorId, time: SimTime) -> SpResult<EventId> {
        self.slot(sensor)?;
        self.queue.post(time, Owner::Sensor(sensor), Action::Sample(sensor))
    }

    /// Sample `sensor` at `first` and every `interval` after.
    pub fn post_repeating_sample(
        &mut self,
        sensor:   SensorId,
        first:    SimTime,
        interval: f64,
    ) -> SpResult<EventId> {
        check_interval(interval)?;
        self.slot(sensor)?;
        self.queue.post(first, Owner::Sensor(sensor), Action::RepeatSample { sensor, interval })
    }

    /// Cancel a pending event.  Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel_event(&mut self, id: EventId) -> bool {
        self.queue.cancel(id)
    }

    /// Number of live pending events.
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    /// Is there a live event that [`run`](Self::run) would still fire?
    pub fn has_events(&mut self) -> bool {
        let limit = self.config.max_simulation_time;
        self.queue.next_time().is_some_and(|t| t <= limit)
    }

    /// Move the clock forward to `t` without firing anything.
    ///
    /// # Errors
    /// - [`SpError::EventInPast`] if `t` is before now.
    /// - [`SpError::InvalidOperation`] if a live event is pending before `t`.
    pub fn set_simulation_time(&mut self, t: SimTime) -> SpResult<()> {
        if let Some(next) = self.queue.next_time() {
            if next < t {
                return Err(SpError::InvalidOperation(format!(
                    "cannot move the clock to {t} past the event pending at {next}"
                )));
            }
        }
        self.queue.set_now(t)
    }

    #[inline]
    pub fn maximum_simulation_time(&self) -> SimTime {
        self.config.max_simulation_time
    }

    pub fn set_maximum_simulation_time(&mut self, t: SimTime) -> SpResult<()> {
        if t.as_f64().is_nan() {
            return Err(SpError::InvalidValue("maximum simulation time is NaN".to_owned()));
        }
        self.config.max_simulation_time = t;
        Ok(())
    }

    // ── Run ───────────────────────────────────────────────────────────────

    /// Fire events in time order until none is due by the maximum simulation
    /// time.  Returns the number fired.
    pub fn run(&mut self) -> SpResult<usize> {
        self.run_with(&mut NoopObserver)
    }

    /// As [`run`](Self::run), reporting to `observer`.
    ///
    /// # Errors
    /// The first error returned by an event stops the run and is returned;
    /// the clock stays at that event's time.
    pub fn run_with<O: PlaygroundObserver>(&mut self, observer: &mut O) -> SpResult<usize> {
        let limit = self.config.max_simulation_time;
        self.report_removals(observer);
        let mut fired = 0;
        while let Some(event) = self.queue.pop_until(limit) {
            observer.on_event(event.time, event.owner);
            self.dispatch(event, observer)?;
            fired += 1;
            self.report_removals(observer);
        }
        let now = self.now();
        if !self.queue.is_empty() {
            warn!(
                pending = self.queue.len(),
                %limit,
                "stopped at the maximum simulation time with events pending"
            );
        }
        info!(fired, %now, "run finished");
        observer.on_run_end(now, fired);
        Ok(fired)
    }

    fn dispatch<O: PlaygroundObserver>(
        &mut self,
        event:    Event<Action>,
        observer: &mut O,
    ) -> SpResult<()> {
        let Event { id, time, owner, payload } = event;
        trace!(%id, %time, %owner, ?payload, "dispatch");
        match payload {
            Action::Call(f) => f(self, time),
            Action::Repeat { interval, mut f } => {
                f(self, time)?;
                if self.owner_alive(owner) {
                    self.queue.post(time + interval, owner, Action::Repeat { interval, f })?;
                }
                Ok(())
            }
            Action::Sample(sensor) => {
                let n = self.sample_sensor(sensor)?;
                observer.on_sample(sensor, time, n);
                Ok(())
            }
            Action::RepeatSample { sensor, interval } => {
                let n = self.sample_sensor(sensor)?;
                observer.on_sample(sensor, time, n);
                if self.owner_alive(owner) {
                    self.queue.post(
                        time + interval,
                        owner,
                        Action::RepeatSample { sensor, interval },
                    )?;
                }
                Ok(())
            }
            Action::MotionStart(agent) => {
                observer.on_motion_start(agent, time);
                Ok(())
            }
            Action::MotionEnd(agent) => {
                let end = self.finish_motion(agent)?;
                observer.on_motion_end(agent, time, end);
                Ok(())
            }
        }
    }

    fn report_removals<O: PlaygroundObserver>(&mut self, observer: &mut O) {
        let now = self.now();
        for agent in std::mem::take(&mut self.removed) {
            observer.on_agent_removed(agent, now);
        }
    }
}

/// Field-of-view box of `sensor` carried anywhere inside `carrier`, the
/// agent's index box: its point, or the sweep of its motion.
fn field_box(sensor: &dyn Sensor, carrier: &BoundingBox) -> SpResult<BoundingBox> {
    let (lo, hi) = carrier.corners();
    sensor.field_of_view(lo).union(&sensor.field_of_view(hi))
}

fn check_interval(interval: f64) -> SpResult<()> {
    if !(interval.is_finite() && interval > 0.0) {
        return Err(SpError::InvalidValue(format!(
            "repeat interval must be positive and finite, got {interval}"
        )));
    }
    Ok(())
}

impl fmt::Debug for Playground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playground")
            .field("now", &self.now())
            .field("agents", &self.agents.len())
            .field("sensors", &self.sensors.len())
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}

// ── SensorSource ──────────────────────────────────────────────────────────────

/// Counting sensors that are attached to a placed agent.
impl SensorSource for Playground {
    fn counting_sensors(&self) -> Vec<SensorId> {
        self.sensors
            .iter()
            .filter(|(id, slot)| {
                slot.sensor.as_counter().is_some() && self.sensor_position(**id).is_ok()
            })
            .map(|(&id, _)| id)
            .collect()
    }

    fn sensor_field(&self, id: SensorId) -> SpResult<SensorField> {
        let at = self.sensor_position(id)?;
        Ok(self.slot(id)?.sensor.field(at))
    }

    fn sensor_counts(&self, id: SensorId, targets: &[Position]) -> SpResult<usize> {
        let at = self.sensor_position(id)?;
        let counter = self
            .slot(id)?
            .sensor
            .as_counter()
            .ok_or_else(|| SpError::InvalidOperation(format!("{id} cannot count targets")))?;
        counter.counts(at, targets)
    }
}
