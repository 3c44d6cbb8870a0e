use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::time::{Instant, MissedTickBehavior};

use crate::{models::Vec3, plate::Plate};

/// Holds the moving flag up for as long as it lives.
pub struct MovingGuard {
    moving: Arc<AtomicBool>,
}

impl MovingGuard {
    pub fn raise(moving: Arc<AtomicBool>) -> Self {
        moving.store(true, Ordering::SeqCst);
        Self { moving }
    }
}

impl Drop for MovingGuard {
    fn drop(&mut self) {
        self.moving.store(false, Ordering::SeqCst);
    }
}

pub struct MoveThread<'a, P: Plate> {
    plate: &'a mut P,

    start_position: Vec3,
    target_position: Vec3,
    duration: Duration,
    frame_interval: Duration,
}

impl<'a, P: Plate> MoveThread<'a, P> {
    pub fn new(
        plate: &'a mut P,
        target_position: Vec3,
        duration: Duration,
        frame_interval: Duration,
    ) -> Self {
        let start_position = plate.position();

        Self {
            plate,
            start_position,
            target_position,
            duration,
            frame_interval,
        }
    }

    fn progress(&self, elapsed: Duration) -> f32 {
        elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Samples the interpolation once per frame, then snaps onto the target so
    /// no floating point residue is left behind.
    pub async fn run(mut self) {
        if !self.duration.is_zero() {
            let mut frames = tokio::time::interval(self.frame_interval);
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
            frames.tick().await;

            let started = Instant::now();
            let mut elapsed = Duration::ZERO;

            while elapsed < self.duration {
                let position = self
                    .start_position
                    .lerp(self.target_position, self.progress(elapsed));
                self.plate.set_position(position);

                frames.tick().await;
                elapsed = started.elapsed();
            }
        }

        self.plate.set_position(self.target_position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPlate {
        current: Vec3,
        history: Vec<(Duration, Vec3)>,
        epoch: Option<Instant>,
    }

    impl Plate for RecordingPlate {
        fn position(&self) -> Vec3 {
            self.current
        }

        fn set_position(&mut self, position: Vec3) {
            let epoch = *self.epoch.get_or_insert_with(Instant::now);
            self.history.push((epoch.elapsed(), position));
            self.current = position;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn interpolates_then_snaps() {
        let mut plate = RecordingPlate {
            current: Vec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let target = Vec3::new(0.0, 0.3, 0.0);

        MoveThread::new(
            &mut plate,
            target,
            Duration::from_secs(1),
            Duration::from_millis(100),
        )
        .run()
        .await;

        assert_eq!(plate.current, target);
        assert_eq!(plate.history.last().unwrap().1, target);

        // One sample per frame across the second, plus the final snap.
        assert_eq!(plate.history.len(), 11);

        let ys: Vec<f32> = plate.history.iter().map(|(_, p)| p.y).collect();
        assert_eq!(ys[0], 1.0);
        assert!(ys.windows(2).all(|w| w[1] <= w[0]));
        assert!(ys.iter().all(|y| (0.3..=1.0).contains(y)));

        let (at, _) = plate.history[5];
        assert_eq!(at, Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_snaps_immediately() {
        let mut plate = RecordingPlate::default();
        let target = Vec3::new(0.0, 0.8, 0.0);

        MoveThread::new(&mut plate, target, Duration::ZERO, Duration::from_millis(16))
            .run()
            .await;

        assert_eq!(plate.history.len(), 1);
        assert_eq!(plate.current, target);
    }

    #[test]
    fn guard_lowers_flag_on_drop() {
        let moving = Arc::new(AtomicBool::new(false));

        {
            let _guard = MovingGuard::raise(moving.clone());
            assert!(moving.load(Ordering::SeqCst));
        }

        assert!(!moving.load(Ordering::SeqCst));
    }
}
