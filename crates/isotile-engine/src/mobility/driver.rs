use std::collections::VecDeque;

use crate::coords::{GridPos, Vec3};
use crate::iso::{EntityId, EntityStore};
use crate::motion::MotionFunction;
use crate::path::shortest_path;
use crate::terrain::Ground;
use crate::time::{Ticker, DEFAULT_FRAMERATE};

use super::error::MobilityError;
use super::policy::{MobilityPolicy, Stride};

/// Mobility configuration. `speed` is in planar cells per second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MobilityConfig {
    pub speed: f32,
    pub framerate: f32,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self { speed: 1.0, framerate: DEFAULT_FRAMERATE }
    }
}

/// What a mover did, in the order it happened. Drained by the owner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MobilityEvent {
    Stride { kind: Stride, from: GridPos, to: GridPos },
    Arrived { position: Vec3 },
    PathComplete,
}

/// Borrowed world a mover acts on. A mover is grounded exactly when `ground` is set.
pub struct MoveCtx<'a> {
    pub entities: &'a mut EntityStore,
    pub ground: Option<&'a dyn Ground>,
}

impl<'a> MoveCtx<'a> {
    #[inline]
    pub fn new(entities: &'a mut EntityStore) -> Self {
        Self { entities, ground: None }
    }

    #[inline]
    pub fn with_ground(mut self, ground: &'a dyn Ground) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Surface height under `(x, y)`; missing tiles read as 0 and nothing sits below 0.
    fn surface(&self, x: f32, y: f32) -> Option<f32> {
        self.ground
            .map(|g| g.height_at(x, y).unwrap_or(0.0).max(0.0))
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Linear { destination: Vec3, frames_to_arrive: u32 },
    Curve { function: MotionFunction, frames_to_arrive: u32, total_frames: u32 },
}

/// Moves one entity a frame at a time.
///
/// Plain `go_to` / `go_along` requests play once and report `Arrived`. Policy
/// moves (`move_to`, `move_along`) queue waypoints and issue a new stride from
/// each arrival until the queue is empty.
#[derive(Debug, Clone)]
pub struct Mobility {
    target: EntityId,
    policy: MobilityPolicy,
    ticker: Ticker,
    speed: f32,

    motion: Option<Motion>,
    waypoints: VecDeque<GridPos>,
    following: bool,

    events: Vec<MobilityEvent>,
}

impl Mobility {
    /// Binds a mover to `target`. With ground in `ctx`, the target is snapped onto
    /// the surface at its current `(x, y)`.
    pub fn bind(
        target: EntityId,
        policy: MobilityPolicy,
        config: MobilityConfig,
        ctx: &mut MoveCtx<'_>,
    ) -> Result<Self, MobilityError> {
        let position = ctx
            .entities
            .position(target)
            .ok_or(MobilityError::UnknownEntity(target))?;

        if let Some(z) = ctx.surface(position.x, position.y) {
            ctx.entities.set_position(target, Vec3::new(position.x, position.y, z));
        }

        let speed = if config.speed > 0.0 {
            config.speed
        } else {
            MobilityConfig::default().speed
        };

        Ok(Self {
            target,
            policy,
            ticker: Ticker::new(config.framerate),
            speed,
            motion: None,
            waypoints: VecDeque::new(),
            following: false,
            events: Vec::new(),
        })
    }

    #[inline]
    pub fn target(&self) -> EntityId {
        self.target
    }

    #[inline]
    pub fn policy(&self) -> MobilityPolicy {
        self.policy
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Ignores non-positive (and NaN) speeds; returns whether `speed` was taken.
    pub fn set_speed(&mut self, speed: f32) -> bool {
        if speed > 0.0 {
            self.speed = speed;
            true
        } else {
            log::debug!("{}: ignoring non-positive speed {speed}", self.target);
            false
        }
    }

    #[inline]
    pub fn framerate(&self) -> f32 {
        self.ticker.framerate()
    }

    #[inline]
    pub fn ticker_mut(&mut self) -> &mut Ticker {
        &mut self.ticker
    }

    /// True while a motion is playing or waypoints remain.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.motion.is_some() || !self.waypoints.is_empty()
    }

    /// Frames left in the current motion.
    pub fn frames_to_arrive(&self) -> u32 {
        match &self.motion {
            Some(Motion::Linear { frames_to_arrive, .. })
            | Some(Motion::Curve { frames_to_arrive, .. }) => *frames_to_arrive,
            None => 0,
        }
    }

    /// Linear move to `destination`, replacing any motion in progress.
    ///
    /// When grounded, `z` follows the surface each frame and `destination.z` is
    /// not used.
    pub fn go_to(&mut self, entities: &EntityStore, destination: Vec3) -> Result<(), MobilityError> {
        let position = entities
            .position(self.target)
            .ok_or(MobilityError::UnknownEntity(self.target))?;

        let frames = self.frames_for(position.planar_distance(destination));
        if frames == 0 {
            log::debug!("{}: already at {destination:?}", self.target);
            self.motion = None;
            return Ok(());
        }

        log::debug!("{}: go to {destination:?} in {frames} frames", self.target);
        self.motion = Some(Motion::Linear { destination, frames_to_arrive: frames });
        Ok(())
    }

    /// Plays `function` from its start, replacing any motion in progress.
    /// A function with no planar length is ignored.
    pub fn go_along(&mut self, function: MotionFunction) {
        let frames = self.frames_for(function.length());
        if frames == 0 {
            log::debug!("{}: ignoring zero-length motion", self.target);
            return;
        }

        log::debug!(
            "{}: go along {:?} -> {:?} in {frames} frames",
            self.target,
            function.start(),
            function.destination()
        );
        self.motion = Some(Motion::Curve { function, frames_to_arrive: frames, total_frames: frames });
    }

    /// Drops the current motion and any queued waypoints.
    pub fn stop(&mut self) {
        self.motion = None;
        self.waypoints.clear();
        self.following = false;
    }

    /// Moves to `destination` according to the policy.
    ///
    /// `Direct` issues one `go_to`. `Walking` searches a path over the ground and
    /// follows it; an unreachable destination stops the mover and is not an error.
    pub fn move_to(&mut self, ctx: &mut MoveCtx<'_>, destination: GridPos) -> Result<(), MobilityError> {
        let position = ctx
            .entities
            .position(self.target)
            .ok_or(MobilityError::UnknownEntity(self.target))?;

        match self.policy {
            MobilityPolicy::Direct => {
                self.stop();
                let z = ctx
                    .surface(destination.x as f32, destination.y as f32)
                    .unwrap_or(position.z);
                self.go_to(ctx.entities, destination.at_height(z))
            }
            MobilityPolicy::Walking(walking) => {
                let ground = ctx.ground.ok_or(MobilityError::Ungrounded)?;
                let source = GridPos::from_planar(position.planar());
                let path = shortest_path(source, destination, walking.move_range, |from, to| {
                    walking.can_step(ground, from, to)
                });
                if path.is_empty() && source != destination {
                    self.stop();
                    return Ok(());
                }
                self.move_along(ctx, path)
            }
        }
    }

    /// Follows `path` one cell at a time, starting with the first waypoint now.
    pub fn move_along(
        &mut self,
        ctx: &mut MoveCtx<'_>,
        path: impl IntoIterator<Item = GridPos>,
    ) -> Result<(), MobilityError> {
        if !ctx.entities.contains(self.target) {
            return Err(MobilityError::UnknownEntity(self.target));
        }
        if matches!(self.policy, MobilityPolicy::Walking(_)) && ctx.ground.is_none() {
            return Err(MobilityError::Ungrounded);
        }

        self.motion = None;
        self.waypoints = path.into_iter().collect();
        self.following = true;
        self.next_waypoint(ctx);
        Ok(())
    }

    /// Every cell the mover could reach from where it stands.
    pub fn reach(&self) -> Result<Vec<GridPos>, MobilityError> {
        Err(MobilityError::Unimplemented { operation: "reach" })
    }

    /// Runs as many frames as `elapsed` seconds cover at the mover's framerate.
    pub fn tick(&mut self, ctx: &mut MoveCtx<'_>, elapsed: f32) {
        for _ in 0..self.ticker.advance(elapsed) {
            if !self.is_moving() {
                break;
            }
            self.step(ctx);
        }
    }

    /// Advances the current motion by one frame.
    pub fn step(&mut self, ctx: &mut MoveCtx<'_>) {
        let Some(position) = ctx.entities.position(self.target) else {
            log::debug!("{}: target is gone, stopping", self.target);
            self.stop();
            return;
        };

        let Some(motion) = self.motion.as_mut() else {
            return;
        };

        let (next, arrived) = match motion {
            Motion::Linear { destination, frames_to_arrive } => {
                let n = *frames_to_arrive as f32;
                let next = if *frames_to_arrive <= 1 {
                    let z = ctx.surface(destination.x, destination.y).unwrap_or(destination.z);
                    Vec3::new(destination.x, destination.y, z)
                } else {
                    let x = position.x + (destination.x - position.x) / n;
                    let y = position.y + (destination.y - position.y) / n;
                    let z = ctx
                        .surface(x, y)
                        .unwrap_or(position.z + (destination.z - position.z) / n);
                    Vec3::new(x, y, z)
                };
                *frames_to_arrive = frames_to_arrive.saturating_sub(1);
                (next, *frames_to_arrive == 0)
            }
            Motion::Curve { function, frames_to_arrive, total_frames } => {
                *frames_to_arrive = frames_to_arrive.saturating_sub(1);
                let t = (*total_frames - *frames_to_arrive) as f32 / *total_frames as f32;
                (function.at(t), *frames_to_arrive == 0)
            }
        };

        ctx.entities.set_position(self.target, next);

        if arrived {
            self.motion = None;
            self.arrived(ctx, next);
        }
    }

    /// Drains recorded events, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, MobilityEvent> {
        self.events.drain(..)
    }

    fn arrived(&mut self, ctx: &mut MoveCtx<'_>, position: Vec3) {
        log::debug!("{}: arrived at {position:?}", self.target);
        self.events.push(MobilityEvent::Arrived { position });

        if self.following {
            self.next_waypoint(ctx);
        }
    }

    /// Pops waypoints until one starts a motion or the queue runs dry.
    /// Zero-length strides produce no motion and are skipped in place.
    fn next_waypoint(&mut self, ctx: &mut MoveCtx<'_>) {
        while self.motion.is_none() {
            let Some(position) = ctx.entities.position(self.target) else {
                self.stop();
                return;
            };

            let Some(next) = self.waypoints.pop_front() else {
                if self.following {
                    self.following = false;
                    self.events.push(MobilityEvent::PathComplete);
                }
                return;
            };

            let from = GridPos::from_planar(position.planar());
            let z = ctx
                .ground
                .and_then(|g| g.cell_height(next))
                .unwrap_or(position.z);
            let destination = next.at_height(z);

            let kind = match self.policy {
                MobilityPolicy::Direct => Stride::Walk,
                MobilityPolicy::Walking(_) => Stride::classify(z - position.z),
            };

            log::debug!("{}: {kind:?} {from} -> {next}", self.target);
            self.events.push(MobilityEvent::Stride { kind, from, to: next });

            if kind.is_airborne() {
                self.go_along(MotionFunction::parabolic_arc(position, destination));
            } else if self.go_to(ctx.entities, destination).is_err() {
                self.stop();
                return;
            }
        }
    }

    fn frames_for(&self, distance: f32) -> u32 {
        let frames = (distance * self.ticker.framerate() / self.speed).ceil();
        if frames.is_finite() && frames > 0.0 {
            frames as u32
        } else {
            0
        }
    }
}
