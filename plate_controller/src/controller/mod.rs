use std::time::Duration;

use utilities::{
    http_source::{JsonSource, fetch_json},
    interpolation::Bound,
};

use crate::{
    models::{CycleOutcome, MotionConfig, MotionState},
    plate::Plate,
};

pub mod move_thread;

use move_thread::{MoveThread, MovingGuard};

#[derive(Debug, Clone, Copy)]
pub struct ControllerTiming {
    pub check_interval: Duration,
    pub frame_interval: Duration,
}

pub struct MotionController<S: JsonSource, P: Plate> {
    source: S,
    plate: P,
    state: MotionState,
    timing: ControllerTiming,
    show_debug: bool,
}

impl<S: JsonSource, P: Plate> MotionController<S, P> {
    /// The plate's current position becomes the fixed origin for every move.
    pub fn new(
        source: S,
        plate: P,
        (min_y, max_y): (f32, f32),
        timing: ControllerTiming,
        show_debug: bool,
    ) -> Self {
        let state = MotionState::new(plate.position(), min_y, max_y);

        Self {
            source,
            plate,
            state,
            timing,
            show_debug,
        }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn plate(&self) -> &P {
        &self.plate
    }

    pub async fn run(&mut self) {
        if self.show_debug {
            tracing::info!("Start position: {:.3}", self.state.origin().y);
        }

        loop {
            tokio::time::sleep(self.timing.check_interval).await;

            if !self.state.is_moving() {
                self.run_cycle().await;
            }
        }
    }

    /// One IDLE -> FETCHING -> (MOVING) -> IDLE pass.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let _moving = MovingGuard::raise(self.state.moving_flag());

        let config: MotionConfig = match fetch_json(&self.source).await {
            Ok(config) => config,
            Err(e) => {
                if e.is_network() {
                    tracing::error!("Network Error: {e}");
                } else {
                    tracing::error!("JSON Error: {e}");
                }
                return CycleOutcome::Failed(e);
            }
        };

        self.state.apply_bounds(&config);

        if self.show_debug {
            tracing::info!(
                enabled = config.is_enabled,
                "Move: {} {:.2}m in {:.1}s",
                config.direction_label(),
                config.move_distance,
                config.move_duration
            );
        }

        if !config.is_enabled {
            return CycleOutcome::Disabled;
        }

        let (target, hit) = self.state.target(&config);
        if self.show_debug {
            let (min_y, max_y) = self.state.bounds();
            match hit {
                Some(Bound::Lower) => tracing::info!("Hit minY: {min_y:.3}"),
                Some(Bound::Upper) => tracing::info!("Hit maxY: {max_y:.3}"),
                None => {}
            }
        }

        MoveThread::new(
            &mut self.plate,
            target,
            config.duration(),
            self.timing.frame_interval,
        )
        .run()
        .await;

        if self.show_debug {
            tracing::info!("Done: {:.3}", self.plate.position().y);
        }

        CycleOutcome::Moved { target }
    }
}
