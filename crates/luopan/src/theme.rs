use compass::{RingKind, Segment, Tone};
use palette::{Srgb, Srgba};

pub const FINE_STROKE: f64 = 2.0;
pub const BOLD_STROKE: f64 = 5.0;

pub struct ThemeColors {
    pub degree: Srgba<f64>,
    pub primary: Srgba<f64>,
    pub lodging: Srgba<f64>,
    pub hexagram: Srgba<f64>,
    pub label: Srgba<f64>,
    pub red: Srgba<f64>,
    pub yellow: Srgba<f64>,
    pub blue: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            degree: Srgba::new(1.0, 0.0, 0.0, 1.0),
            primary: Srgba::new(1.0, 0.55, 0.0, 1.0),
            lodging: Srgba::new(0.5, 0.0, 0.5, 1.0),
            hexagram: Srgba::new(0.53, 0.81, 0.92, 1.0),
            label: Srgba::new(0.5, 0.0, 0.5, 1.0),
            red: Srgba::new(1.0, 0.0, 0.0, 1.0),
            yellow: Srgba::new(1.0, 1.0, 0.0, 1.0),
            blue: Srgba::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn ring(&self, kind: RingKind) -> Srgba<f64> {
        match kind {
            RingKind::Degree => self.degree,
            RingKind::TwelveSupport | RingKind::TwentyFourMountain => self.primary,
            RingKind::TwentyEightLodging => self.lodging,
            RingKind::Hexagram => self.hexagram,
        }
    }

    pub fn tone(&self, tone: Tone) -> Srgba<f64> {
        match tone {
            Tone::Red => self.red,
            Tone::Yellow => self.yellow,
            Tone::Blue => self.blue,
        }
    }

    /// A toned segment takes its tone, anything else the ring colour.
    pub fn line(&self, kind: RingKind, segment: &Segment) -> Srgba<f64> {
        segment
            .tone
            .map(|t| self.tone(t))
            .unwrap_or_else(|| self.ring(kind))
    }

    pub fn label(&self, kind: RingKind) -> Srgba<f64> {
        match kind {
            RingKind::Degree => self.degree,
            _ => self.label,
        }
    }
}

/// Base stroke for a segment before its weight is applied. Degree ticks and hexagram
/// layer ticks are fine, sector dividers are bold.
pub fn base_stroke(kind: RingKind, segment: &Segment) -> f64 {
    match kind {
        RingKind::Degree => FINE_STROKE,
        RingKind::Hexagram if segment.weight.is_none() && segment.tone.is_some() => FINE_STROKE,
        _ => BOLD_STROKE,
    }
}

pub fn stroke_width(kind: RingKind, segment: &Segment) -> f64 {
    base_stroke(kind, segment) * segment.weight.unwrap_or(1.0)
}

pub fn to_hex(color: Srgba<f64>) -> String {
    let rgb: Srgb<u8> = color.color.into_format();
    format!("#{:x}", rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass::Point;

    fn segment() -> Segment {
        Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(to_hex(Srgba::new(1.0, 0.0, 0.0, 1.0)), "#ff0000");
        assert_eq!(to_hex(Srgba::new(0.0, 0.0, 1.0, 0.5)), "#0000ff");
        assert_eq!(to_hex(Srgba::new(1.0, 1.0, 1.0, 1.0)), "#ffffff");
    }

    #[test]
    fn test_tone_overrides_ring_colour() {
        let theme = ThemeColors::default();
        let plain = segment();
        let toned = segment().with_tone(Tone::Yellow);

        assert_eq!(theme.line(RingKind::Hexagram, &plain), theme.hexagram);
        assert_eq!(theme.line(RingKind::Hexagram, &toned), theme.yellow);
    }

    #[test]
    fn test_stroke_widths() {
        let tick = segment().with_tone(Tone::Blue);
        let divider = segment();
        let octant = segment().with_tone(Tone::Red).with_weight(2.0);

        assert_eq!(stroke_width(RingKind::Hexagram, &tick), FINE_STROKE);
        assert_eq!(stroke_width(RingKind::Hexagram, &divider), BOLD_STROKE);
        assert_eq!(stroke_width(RingKind::Hexagram, &octant), 2.0 * BOLD_STROKE);
        assert_eq!(stroke_width(RingKind::Degree, &divider), FINE_STROKE);
        assert_eq!(stroke_width(RingKind::TwelveSupport, &divider), BOLD_STROKE);
    }
}
