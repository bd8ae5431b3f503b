//! Choreographer: owned animation state, the assembly → rotation → pause loop,
//! and per-part position queries.
//!
//! Methods:
//! - new / with_clock, advance (poll timers → step state), retarget, dispose
//! - position_of, frame, snapshot and the scalar queries used by renderers

use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::config::ChoreographyConfig;
use crate::data::Vec3;
use crate::error::ChoreographyError;
use crate::ids::TimerHandle;
use crate::outputs::{ChoreographyEvent, Frame, Outputs, PartTransform};
use crate::pose_table::PoseTable;
use crate::sampling::sample_part;
use crate::state::{ActivePose, AnimationState, ChoreographerSnapshot};
use crate::timer::{Clock, RestartScheduler, SystemClock};

type AssemblyCompleteFn = Box<dyn FnMut(AnimationState)>;

/// Sequences assembly, rotation, pause and pose toggling for one model.
///
/// Single-owner and single-threaded: the render loop calls [`advance`] once
/// per frame. The only deferred work is the restart after a pause, held in a
/// one-slot [`RestartScheduler`] and delivered when `advance` or
/// [`poll_timers`] observes its deadline.
///
/// [`advance`]: Choreographer::advance
/// [`poll_timers`]: Choreographer::poll_timers
pub struct Choreographer<C: Clock = SystemClock> {
    cfg: ChoreographyConfig,
    table: Arc<PoseTable>,

    // Mutable animation state
    state: AnimationState,
    progress: f32,
    rotation_angle: f32,
    active_pose: ActivePose,

    restart: RestartScheduler<C>,
    on_assembly_complete: Option<AssemblyCompleteFn>,

    // Per-advance outputs
    outputs: Outputs,
    disposed: bool,
}

impl Choreographer<SystemClock> {
    /// Create a choreographer driven by the wall clock.
    pub fn new(
        table: impl Into<Arc<PoseTable>>,
        cfg: ChoreographyConfig,
    ) -> Result<Self, ChoreographyError> {
        Self::with_clock(table, cfg, SystemClock::new())
    }
}

impl<C: Clock> Choreographer<C> {
    /// Create a choreographer reading restart deadlines from `clock`.
    pub fn with_clock(
        table: impl Into<Arc<PoseTable>>,
        cfg: ChoreographyConfig,
        clock: C,
    ) -> Result<Self, ChoreographyError> {
        cfg.validate()?;
        let table: Arc<PoseTable> = table.into();
        for part in table.late_parts(cfg.part_window) {
            warn!(
                "part '{}' starts at {} and only settles when progress reaches 1.0",
                part.name, part.start_offset
            );
        }
        let entry = ChoreographerSnapshot::entering(cfg.initial_state, cfg.initial_pose);
        Ok(Self {
            table,
            state: entry.state,
            progress: entry.progress,
            rotation_angle: entry.rotation_angle,
            active_pose: entry.active_pose,
            restart: RestartScheduler::new(clock),
            on_assembly_complete: None,
            outputs: Outputs::default(),
            disposed: false,
            cfg,
        })
    }

    /// Register the listener invoked when an `AssemblingTransition` pass
    /// lands. Replaces any previous listener.
    pub fn set_on_assembly_complete<F>(&mut self, f: F)
    where
        F: FnMut(AnimationState) + 'static,
    {
        self.on_assembly_complete = Some(Box::new(f));
    }

    pub fn clear_on_assembly_complete(&mut self) {
        self.on_assembly_complete = None;
    }

    /// Step the choreography by `delta_seconds` of frame time.
    ///
    /// Due restarts are delivered first, then the current state accumulates
    /// `delta_seconds * speed_multiplier`. A state boundary crossed by this
    /// call is taken within it; leftover time is not carried into the next
    /// state. Negative or non-finite inputs count as zero.
    pub fn advance(&mut self, delta_seconds: f32, speed_multiplier: f32) -> &Outputs {
        self.outputs.clear();
        if self.disposed {
            return &self.outputs;
        }

        self.deliver_due_restart();

        let step = non_negative("delta_seconds", delta_seconds)
            * non_negative("speed_multiplier", speed_multiplier);

        match self.state {
            AnimationState::AssemblingLoop | AnimationState::AssemblingTransition => {
                self.progress += step * self.cfg.base_assembly_speed;
                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    if self.state == AnimationState::AssemblingLoop {
                        self.enter(AnimationState::Rotating);
                    } else {
                        self.finish_transition();
                    }
                }
            }
            AnimationState::Rotating => {
                self.rotation_angle += step * self.cfg.base_rotation_speed;
                if self.rotation_angle >= TAU {
                    self.rotation_angle %= TAU;
                    self.outputs.push_event(ChoreographyEvent::LoopCompleted {
                        pose: self.active_pose,
                    });
                    self.enter(AnimationState::Paused);
                    self.schedule_restart();
                }
            }
            AnimationState::Paused | AnimationState::Idle => {}
        }

        &self.outputs
    }

    /// Deliver a due restart without stepping animation time.
    pub fn poll_timers(&mut self) -> &Outputs {
        self.outputs.clear();
        if !self.disposed {
            self.deliver_due_restart();
        }
        &self.outputs
    }

    /// Deliver the restart identified by `handle`, as a host-side timer
    /// callback would. Handles that are no longer pending, or that arrive
    /// after the state left `Paused`, are discarded.
    pub fn fire_restart(&mut self, handle: TimerHandle) -> &Outputs {
        self.outputs.clear();
        if self.disposed {
            debug!("choreography: restart {:?} after dispose ignored", handle);
            return &self.outputs;
        }
        if self.restart.claim(handle) {
            self.complete_restart(handle);
        } else {
            self.discard_restart(handle);
        }
        &self.outputs
    }

    /// Re-enter `requested`, keeping the active pose. Any pending restart is
    /// cancelled. Settled states (`Idle`, `Paused`) start fully assembled,
    /// every other state starts from progress 0.
    pub fn retarget(&mut self, requested: AnimationState) {
        self.retarget_with_pose(requested, self.active_pose);
    }

    /// Like [`retarget`](Self::retarget), also selecting the target pose.
    pub fn retarget_with_pose(&mut self, requested: AnimationState, pose: ActivePose) {
        if let Some(h) = self.restart.cancel() {
            debug!("choreography: retarget cancelled restart {:?}", h);
        }
        let entry = ChoreographerSnapshot::entering(requested, pose);
        debug!(
            "choreography: retarget {} -> {} (pose {:?})",
            self.state, entry.state, entry.active_pose
        );
        self.state = entry.state;
        self.progress = entry.progress;
        self.rotation_angle = entry.rotation_angle;
        self.active_pose = entry.active_pose;
    }

    /// Cancel any pending restart and stop reacting to `advance`.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(h) = self.restart.cancel() {
            debug!("choreography: dispose cancelled restart {:?}", h);
        }
        self.on_assembly_complete = None;
        self.disposed = true;
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Interpolated position of `part` for the current instant.
    ///
    /// # Panics
    /// If `part` is not in the pose table.
    pub fn position_of(&self, part: &str) -> Vec3 {
        let poses = self.table.part(part);
        if self.state == AnimationState::Idle {
            return poses.position(self.active_pose.slot());
        }
        sample_part(poses, self.progress, self.active_pose, self.cfg.part_window)
    }

    #[inline]
    pub fn current_state(&self) -> AnimationState {
        self.state
    }

    /// Group scale: smaller at rest in `Idle`, larger otherwise.
    #[inline]
    pub fn current_scale(&self) -> f32 {
        if self.state == AnimationState::Idle {
            self.cfg.idle_scale
        } else {
            self.cfg.active_scale
        }
    }

    /// Group rotation in radians; non-zero only while `Rotating`.
    #[inline]
    pub fn current_rotation(&self) -> f32 {
        if self.state == AnimationState::Rotating {
            self.rotation_angle
        } else {
            0.0
        }
    }

    /// Progress as rendered (`Idle` always reads as fully assembled).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.state == AnimationState::Idle {
            1.0
        } else {
            self.progress
        }
    }

    #[inline]
    pub fn active_pose(&self) -> ActivePose {
        self.active_pose
    }

    #[inline]
    pub fn pending_restart(&self) -> Option<TimerHandle> {
        self.restart.pending()
    }

    /// Time left before the pending restart is due.
    pub fn restart_remaining(&self) -> Option<Duration> {
        self.restart.remaining()
    }

    pub fn snapshot(&self) -> ChoreographerSnapshot {
        ChoreographerSnapshot {
            state: self.state,
            progress: self.progress,
            rotation_angle: self.rotation_angle,
            active_pose: self.active_pose,
            pending_restart: self.restart.pending(),
        }
    }

    /// Positions of every part in declaration order plus group transform.
    pub fn frame(&self) -> Frame {
        Frame {
            state: self.state,
            active_pose: self.active_pose,
            progress: self.progress(),
            scale: self.current_scale(),
            rotation: self.current_rotation(),
            parts: self
                .table
                .all_parts()
                .map(|part| PartTransform {
                    part: part.to_string(),
                    position: self.position_of(part),
                })
                .collect(),
        }
    }

    #[inline]
    pub fn table(&self) -> &PoseTable {
        &self.table
    }

    #[inline]
    pub fn config(&self) -> &ChoreographyConfig {
        &self.cfg
    }

    #[inline]
    pub fn clock(&self) -> &C {
        self.restart.clock()
    }

    fn enter(&mut self, to: AnimationState) {
        let from = self.state;
        if from == to {
            return;
        }
        debug!("choreography: {} -> {}", from, to);
        self.state = to;
        self.outputs
            .push_event(ChoreographyEvent::StateChanged { from, to });
    }

    fn finish_transition(&mut self) {
        let final_state = AnimationState::Idle;
        self.enter(final_state);
        self.outputs
            .push_event(ChoreographyEvent::AssemblyComplete { final_state });
        if let Some(cb) = self.on_assembly_complete.as_mut() {
            cb(final_state);
        }
    }

    fn schedule_restart(&mut self) {
        let delay_ms = self.cfg.restart_delay_ms;
        let (handle, replaced) = self.restart.schedule(Duration::from_millis(delay_ms));
        if let Some(old) = replaced {
            debug!("choreography: restart {:?} superseded by {:?}", old, handle);
        }
        debug!("choreography: restart {:?} in {} ms", handle, delay_ms);
        self.outputs
            .push_event(ChoreographyEvent::RestartScheduled { handle, delay_ms });
    }

    fn deliver_due_restart(&mut self) {
        if let Some(handle) = self.restart.take_due() {
            self.complete_restart(handle);
        }
    }

    /// Restart body. The state is re-checked here so that every delivery
    /// path shares one guard.
    fn complete_restart(&mut self, handle: TimerHandle) {
        if self.state != AnimationState::Paused {
            self.discard_restart(handle);
            return;
        }
        let from = self.active_pose;
        if self.cfg.auto_transform {
            self.active_pose = from.toggled();
            self.outputs.push_event(ChoreographyEvent::PoseToggled {
                from,
                to: self.active_pose,
            });
        }
        // Each loop rotates a full turn from 0.
        self.progress = 0.0;
        self.rotation_angle = 0.0;
        self.enter(AnimationState::AssemblingLoop);
    }

    fn discard_restart(&mut self, handle: TimerHandle) {
        debug!(
            "choreography: stale restart {:?} discarded in {}",
            handle, self.state
        );
        self.outputs
            .push_event(ChoreographyEvent::RestartDiscarded { handle });
    }
}

impl<C: Clock> Drop for Choreographer<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for Choreographer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Choreographer")
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("rotation_angle", &self.rotation_angle)
            .field("active_pose", &self.active_pose)
            .field("restart", &self.restart)
            .field("parts", &self.table.len())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

fn non_negative(name: &str, v: f32) -> f32 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        debug!("choreography: {} = {} treated as 0", name, v);
        0.0
    }
}
