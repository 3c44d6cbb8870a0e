use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};
use utilities::{
    http_source::PollError,
    interpolation::{Bound, clamp_to_bounds, lerp},
};

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        Vec3 {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
            z: lerp(self.z, to.z, t),
        }
    }
}

/// Motion configuration as served by the remote endpoint.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    /// Seconds one move lasts.
    pub move_duration: f32,
    pub move_distance: f32,
    /// `true` moves down, `false` moves up.
    pub should_move_down: bool,
    pub is_enabled: bool,
    pub min_y: f32,
    pub max_y: f32,
}

impl MotionConfig {
    /// Negative or non-finite durations collapse to zero, which snaps straight to the target.
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.move_duration).unwrap_or(Duration::ZERO)
    }

    pub fn direction_label(&self) -> &'static str {
        if self.should_move_down { "DOWN" } else { "UP" }
    }
}

#[derive(Debug)]
pub struct MotionState {
    origin: Vec3,
    min_y: f32,
    max_y: f32,
    moving: Arc<AtomicBool>,
}

impl MotionState {
    pub fn new(origin: Vec3, min_y: f32, max_y: f32) -> Self {
        Self {
            origin,
            min_y,
            max_y,
            moving: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.min_y, self.max_y)
    }

    /// Replaces both bounds; nothing from the previous config survives.
    pub fn apply_bounds(&mut self, config: &MotionConfig) {
        self.min_y = config.min_y;
        self.max_y = config.max_y;
    }

    pub fn raw_target(&self, config: &MotionConfig) -> Vec3 {
        let direction = if config.should_move_down { -1.0 } else { 1.0 };

        Vec3 {
            y: self.origin.y + direction * config.move_distance,
            ..self.origin
        }
    }

    pub fn target(&self, config: &MotionConfig) -> (Vec3, Option<Bound>) {
        let raw = self.raw_target(config);
        let (y, hit) = clamp_to_bounds(raw.y, self.min_y, self.max_y);

        (Vec3 { y, ..raw }, hit)
    }

    pub fn is_moving(&self) -> bool {
        self.moving.load(Ordering::SeqCst)
    }

    pub fn moving_flag(&self) -> Arc<AtomicBool> {
        self.moving.clone()
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    Failed(PollError),
    Disabled,
    Moved { target: Vec3 },
}
