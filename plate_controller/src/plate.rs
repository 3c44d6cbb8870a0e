use std::sync::{Arc, Mutex};

use crate::models::Vec3;

/// The object whose position the controller drives.
pub trait Plate {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
}

/// In-memory plate. Clones share the same position, so one handle can drive
/// the plate while another reports on it.
#[derive(Clone, Debug, Default)]
pub struct VirtualPlate {
    position: Arc<Mutex<Vec3>>,
}

impl VirtualPlate {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: Arc::new(Mutex::new(position)),
        }
    }
}

impl Plate for VirtualPlate {
    fn position(&self) -> Vec3 {
        *self.position.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_position(&mut self, position: Vec3) {
        tracing::trace!(x = position.x, y = position.y, z = position.z, "Plate moved");
        *self.position.lock().unwrap_or_else(|e| e.into_inner()) = position;
    }
}
