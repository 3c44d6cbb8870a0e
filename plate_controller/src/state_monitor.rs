use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{models::Vec3, plate::Plate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateStatus {
    pub position: Vec3,
    pub moving: bool,
}

impl PlateStatus {
    pub fn capture(plate: &impl Plate, moving: &AtomicBool) -> Self {
        Self {
            position: plate.position(),
            moving: moving.load(Ordering::SeqCst),
        }
    }
}

/// Periodically reports where the plate is and whether a move is running.
pub async fn run_state_monitor(plate: impl Plate, moving: Arc<AtomicBool>, period: Duration) {
    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        let status = PlateStatus::capture(&plate, &moving);
        tracing::debug!(
            x = status.position.x,
            y = status.position.y,
            z = status.position.z,
            moving = status.moving,
            "Plate status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plate::VirtualPlate;

    #[test]
    fn captures_shared_plate_state() {
        let mut plate = VirtualPlate::new(Vec3::new(0.0, 1.0, 0.0));
        let observer = plate.clone();
        let moving = AtomicBool::new(true);

        plate.set_position(Vec3::new(0.0, 0.25, 0.0));

        assert_eq!(
            PlateStatus::capture(&observer, &moving),
            PlateStatus {
                position: Vec3::new(0.0, 0.25, 0.0),
                moving: true,
            }
        );
    }
}
