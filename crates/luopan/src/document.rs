use crate::theme::{ThemeColors, stroke_width, to_hex};
use compass::{LabelText, Point, RingGeometry, RingKind, Rotation};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDoc {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDoc {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub text: LabelText,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingDoc {
    pub kind: RingKind,
    pub color: String,
    pub lines: Vec<LineDoc>,
    pub labels: Vec<LabelDoc>,
}

impl RingDoc {
    pub fn new(ring: &RingGeometry, theme: &ThemeColors) -> Self {
        let kind = ring.kind;
        let label_color = to_hex(theme.label(kind));
        Self {
            kind,
            color: to_hex(theme.ring(kind)),
            lines: ring
                .lines
                .iter()
                .map(|s| LineDoc {
                    x1: s.start.x,
                    y1: s.start.y,
                    x2: s.end.x,
                    y2: s.end.y,
                    color: to_hex(theme.line(kind, s)),
                    width: stroke_width(kind, s),
                })
                .collect(),
            labels: ring
                .labels
                .iter()
                .map(|l| LabelDoc {
                    x: l.position.x,
                    y: l.position.y,
                    angle: l.angle,
                    text: l.text.clone(),
                    color: label_color.clone(),
                })
                .collect(),
        }
    }
}

/// One rendered frame, ready for whatever draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub center: Option<Point>,
    pub max_radius: Option<f64>,
    pub rotation: Rotation,
    pub overlay_scale: f64,
    pub rings: Vec<RingDoc>,
}

impl Document {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        match self.center {
            Some(c) => {
                let _ = write!(out, "centre ({}, {})", c.x, c.y);
            }
            None => out.push_str("no plate centre"),
        }
        if let Some(r) = self.max_radius {
            let _ = write!(out, ", radius {r}");
        }
        let _ = write!(out, ", rotation {}", self.rotation);
        for ring in &self.rings {
            let _ = write!(
                out,
                "\n  {:<22} {:>4} lines {:>4} labels",
                ring.kind.to_string(),
                ring.lines.len(),
                ring.labels.len()
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass::{Label, Segment, Tone};

    fn ring() -> RingGeometry {
        let center = Point::new(100.0, 100.0);
        RingGeometry {
            kind: RingKind::Hexagram,
            lines: vec![
                Segment::radial(center, 50.0, 60.0, 0.0).with_tone(Tone::Yellow),
                Segment::radial(center, 40.0, 60.0, 90.0)
                    .with_tone(Tone::Red)
                    .with_weight(2.0),
            ],
            labels: vec![Label::at(center, 70.0, 0.0, "乾")],
        }
    }

    #[test]
    fn test_ring_doc_flattens_segments() {
        let doc = RingDoc::new(&ring(), &ThemeColors::default());

        assert_eq!(doc.kind, RingKind::Hexagram);
        assert_eq!(doc.lines.len(), 2);
        assert_eq!((doc.lines[0].x1, doc.lines[0].y1), (150.0, 100.0));
        assert_eq!((doc.lines[0].x2, doc.lines[0].y2), (160.0, 100.0));
        assert_eq!(doc.lines[0].color, "#ffff00");
        assert_eq!(doc.lines[0].width, 2.0);
        assert_eq!(doc.lines[1].color, "#ff0000");
        assert_eq!(doc.lines[1].width, 10.0);

        assert_eq!(doc.labels[0].text.as_str(), "乾");
        assert_eq!((doc.labels[0].x, doc.labels[0].y), (170.0, 100.0));
    }

    #[test]
    fn test_json_shape() {
        let document = Document {
            center: Some(Point::new(100.0, 100.0)),
            max_radius: Some(90.0),
            rotation: Rotation::new(15.0),
            overlay_scale: 1.0,
            rings: vec![RingDoc::new(&ring(), &ThemeColors::default())],
        };
        let value: serde_json::Value =
            serde_json::from_str(&document.to_json(false).unwrap()).unwrap();

        assert_eq!(value["center"]["x"], 100.0);
        assert_eq!(value["rotation"], 15.0);
        assert_eq!(value["rings"][0]["kind"], "hexagram");
        assert_eq!(value["rings"][0]["labels"][0]["text"], "乾");
        assert_eq!(value["rings"][0]["lines"][1]["width"], 10.0);
    }

    #[test]
    fn test_summary_lists_rings() {
        let document = Document {
            center: None,
            max_radius: None,
            rotation: Rotation::default(),
            overlay_scale: 1.0,
            rings: vec![RingDoc::new(&ring(), &ThemeColors::default())],
        };
        let summary = document.summary();
        assert!(summary.starts_with("no plate centre"));
        assert!(summary.contains("hexagram"));
        assert!(summary.contains("2 lines"));
    }
}
