use derive_more::{Deref, Display, From, Into};
use serde::Serialize;

pub const FULL_TURN: f64 = 360.0;

/// Global rotation in degrees. Any value is accepted and nothing normalizes it, but a
/// non-finite rotation renders every ring empty.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Display, Deref, From, Into)]
#[serde(transparent)]
pub struct Rotation(f64);

impl Rotation {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

/// Angular layout of an equal-width ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectorLayout {
    pub sector_angle: f64,
    pub initial_offset: f64,
}

impl SectorLayout {
    pub fn new(sector_count: usize, initial_offset: f64) -> Self {
        Self {
            sector_angle: FULL_TURN / sector_count as f64,
            initial_offset,
        }
    }

    /// Start boundary of sector `index`. Left unnormalized; callers feed it to cos/sin.
    pub fn placement_angle(&self, index: usize, rotation: Rotation) -> f64 {
        index as f64 * self.sector_angle + rotation.degrees() + self.initial_offset
    }

    /// Midpoint of sector `index`.
    pub fn label_angle(&self, index: usize, rotation: Rotation) -> f64 {
        self.placement_angle(index, rotation) + self.sector_angle / 2.0
    }
}

pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Signed shortest arc from `from` to `to`, in (-180, 180].
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(FULL_TURN);
    if d > FULL_TURN / 2.0 { d - FULL_TURN } else { d }
}

/// Midpoint of the shorter arc between `a` and `b`, wrapped into [0, 360).
pub fn mid_angle(a: f64, b: f64) -> f64 {
    wrap_degrees(a + angle_delta(a, b) / 2.0)
}
