use derive_more::{AsRef, Deref, Display, From, Into};
use serde::Serialize;
use strum::{Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `angle_deg`, measured in image coordinates.
    pub fn polar(self, radius: f64, angle_deg: f64) -> Self {
        let theta = angle_deg.to_radians();
        Self::new(
            self.x + radius * theta.cos(),
            self.y + radius * theta.sin(),
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Direction from `self` to `other` in degrees, wrapped into [0, 360).
    pub fn bearing(self, other: Point) -> f64 {
        crate::angle::wrap_degrees((other.y - self.y).atan2(other.x - self.x).to_degrees())
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

/// Largest radius that keeps a circle around `center` inside a `width` x `height` image.
pub fn max_radius(center: Point, width: f64, height: f64) -> f64 {
    center
        .x
        .min(center.y)
        .min(width - center.x)
        .min(height - center.y)
}

/// Nominal stroke colours. The renderer decides the actual RGB values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Red,
    Yellow,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub tone: Option<Tone>,
    /// Thickness multiplier over the ring's base stroke.
    pub weight: Option<f64>,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            tone: None,
            weight: None,
        }
    }

    /// Radial segment around `center` spanning `inner..outer` at `angle_deg`.
    pub fn radial(center: Point, inner: f64, outer: f64, angle_deg: f64) -> Self {
        Self::new(center.polar(inner, angle_deg), center.polar(outer, angle_deg))
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct LabelText(String);

crate::impl_string_newtype!(LabelText);

/// Label anchor. The renderer is expected to pull the text inward by its own footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub position: Point,
    pub angle: f64,
    pub text: LabelText,
}

impl Label {
    pub fn at(center: Point, radius: f64, angle_deg: f64, text: impl Into<LabelText>) -> Self {
        Self {
            position: center.polar(radius, angle_deg),
            angle: angle_deg,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_axes() {
        let c = Point::new(10.0, 20.0);
        let east = c.polar(5.0, 0.0);
        assert!((east.x - 15.0).abs() < 1e-9 && (east.y - 20.0).abs() < 1e-9);

        // y grows downward in image coordinates, so 90 degrees points down
        let down = c.polar(5.0, 90.0);
        assert!((down.x - 10.0).abs() < 1e-9 && (down.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_round_trips_polar() {
        let c = Point::new(0.0, 0.0);
        for angle in [0.0, 45.0, 179.0, 270.0, 359.5] {
            let p = c.polar(100.0, angle);
            assert!((c.bearing(p) - angle).abs() < 1e-9, "angle {angle}");
        }
    }

    #[test]
    fn test_max_radius_picks_nearest_edge() {
        assert_eq!(max_radius(Point::from((500, 500)), 1000.0, 900.0), 400.0);
        assert_eq!(max_radius(Point::from((120, 500)), 1000.0, 1000.0), 120.0);
        assert!(max_radius(Point::from((-10, 5)), 100.0, 100.0) < 0.0);
    }

    #[test]
    fn test_label_text_serializes_transparently() {
        let label = Label::at(Point::default(), 0.0, 0.0, "子");
        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json["text"], "子");
    }
}
