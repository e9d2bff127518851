use crate::angle::{FULL_TURN, Rotation};

pub const TICK_COUNT: usize = 360;
pub const LABEL_STEP: usize = 10;
/// Puts degree 0 at the top of the displayed image, which is flipped vertically.
pub const LABEL_OFFSET: f64 = 270.0;

/// The 周天 ring: one tick per whole degree, numbered every ten. Always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DegreeRing;

impl DegreeRing {
    pub fn tick_angle(&self, degree: usize, rotation: Rotation) -> f64 {
        degree as f64 + rotation.degrees()
    }

    pub fn label_angle(&self, degree: usize, rotation: Rotation) -> f64 {
        (degree as f64 + LABEL_OFFSET + rotation.degrees()).rem_euclid(FULL_TURN)
    }

    pub fn label_text(&self, degree: usize) -> String {
        (degree % TICK_COUNT).to_string()
    }

    pub fn tick_angles(&self, rotation: Rotation) -> impl Iterator<Item = f64> + '_ {
        (0..TICK_COUNT).map(move |d| self.tick_angle(d, rotation))
    }

    /// `(angle, text)` for every labelled degree.
    pub fn label_anchors(&self, rotation: Rotation) -> impl Iterator<Item = (f64, String)> + '_ {
        (0..TICK_COUNT)
            .step_by(LABEL_STEP)
            .map(move |d| (self.label_angle(d, rotation), self.label_text(d)))
    }
}
