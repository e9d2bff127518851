use crate::angle::Rotation;
use crate::geom::{Label, Point, Segment, Tone};
use crate::radius::{HexagramBands, RadiusAllocator, RadiusBand, RadiusPlan};
use crate::registry::FrameSnapshot;
use crate::ring::hexagram::{HEXAGRAM_COUNT, Layer};
use crate::ring::{
    DegreeRing, FixedSector, Hexagram, PrimaryRing, RingCatalog, RingDefinition, RingKind,
    UnequalSector,
};
use serde::Serialize;
use strum::IntoEnumIterator;

pub const OCTANT_WEIGHT: f64 = 2.0;

/// Lines and labels of one ring, in absolute pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingGeometry {
    pub kind: RingKind,
    pub lines: Vec<Segment>,
    pub labels: Vec<Label>,
}

impl RingGeometry {
    pub fn empty(kind: RingKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.labels.is_empty()
    }
}

/// What the image analysis and the UI hand over for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// `None` until a plate has been detected.
    pub center: Option<Point>,
    pub max_radius: f64,
    pub unit_size: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CompassEngine<'a> {
    catalog: &'a RingCatalog,
}

impl<'a> CompassEngine<'a> {
    pub fn new(catalog: &'a RingCatalog) -> Self {
        Self { catalog }
    }

    /// Geometry for every active ring, outermost first.
    ///
    /// Without a centre nothing is produced. With an unusable radius, centre or rotation
    /// every active ring is still listed, just empty, so the renderer can tell what it is
    /// not drawing.
    pub fn render(&self, snapshot: FrameSnapshot, input: &FrameInput) -> Vec<RingGeometry> {
        let Some(center) = input.center else {
            log::trace!("No plate centre yet, skipping compass");
            return Vec::new();
        };

        if !(input.max_radius.is_finite() && input.max_radius > 0.0) {
            log::debug!("Max radius {} leaves no room for rings", input.max_radius);
            return snapshot.active.kinds().map(RingGeometry::empty).collect();
        }

        if !is_drawable(center, snapshot.rotation) {
            log::debug!(
                "Centre ({}, {}) or rotation {} is not finite",
                center.x,
                center.y,
                snapshot.rotation
            );
            return snapshot.active.kinds().map(RingGeometry::empty).collect();
        }

        let plan = RadiusAllocator::new(input.unit_size).allocate(input.max_radius);
        snapshot
            .active
            .kinds()
            .map(|kind| {
                self.compute(
                    self.catalog.definition(kind),
                    center,
                    &plan,
                    snapshot.rotation,
                )
            })
            .collect()
    }

    pub fn compute(
        &self,
        definition: RingDefinition<'_>,
        center: Point,
        plan: &RadiusPlan,
        rotation: Rotation,
    ) -> RingGeometry {
        match definition {
            RingDefinition::Fixed(ring) => fixed_geometry(ring, center, plan.primary, rotation),
            RingDefinition::Unequal(ring) => {
                unequal_geometry(ring, center, plan.lodging, rotation)
            }
            RingDefinition::Hexagram(ring) => {
                hexagram_geometry(ring, center, plan.hexagram, rotation)
            }
            RingDefinition::Degree(ring) => degree_geometry(ring, center, plan.degree, rotation),
        }
    }

    pub fn compute_primary(
        &self,
        primary: PrimaryRing,
        center: Point,
        band: RadiusBand,
        rotation: Rotation,
    ) -> RingGeometry {
        fixed_geometry(self.catalog.primary(primary), center, band, rotation)
    }

    pub fn compute_lodging(&self, center: Point, band: RadiusBand, rotation: Rotation) -> RingGeometry {
        unequal_geometry(&self.catalog.lodging, center, band, rotation)
    }

    pub fn compute_hexagram(
        &self,
        center: Point,
        bands: HexagramBands,
        rotation: Rotation,
    ) -> RingGeometry {
        hexagram_geometry(&self.catalog.hexagram, center, bands, rotation)
    }

    pub fn compute_degree(&self, center: Point, band: RadiusBand, rotation: Rotation) -> RingGeometry {
        degree_geometry(&self.catalog.degree, center, band, rotation)
    }
}

fn is_drawable(center: Point, rotation: Rotation) -> bool {
    center.is_finite() && rotation.degrees().is_finite()
}

fn unrepresentable(kind: RingKind) -> RingGeometry {
    log::debug!("{} ring does not fit at this scale", kind);
    RingGeometry::empty(kind)
}

/// Spokes from the centre out to the label radius, labels at sector midpoints.
fn fixed_geometry(
    ring: &FixedSector,
    center: Point,
    band: RadiusBand,
    rotation: Rotation,
) -> RingGeometry {
    let radius = band.outer;
    if !(radius.is_finite() && radius > 0.0 && is_drawable(center, rotation)) {
        return unrepresentable(ring.kind());
    }

    RingGeometry {
        kind: ring.kind(),
        lines: ring
            .tick_angles(rotation)
            .map(|angle| Segment::new(center, center.polar(radius, angle)))
            .collect(),
        labels: ring
            .label_angles(rotation)
            .map(|(angle, text)| Label::at(center, radius, angle, text.clone()))
            .collect(),
    }
}

fn unequal_geometry(
    ring: &UnequalSector,
    center: Point,
    band: RadiusBand,
    rotation: Rotation,
) -> RingGeometry {
    let kind = RingKind::TwentyEightLodging;
    if !(band.is_representable() && is_drawable(center, rotation)) {
        return unrepresentable(kind);
    }

    let label_radius = band.midpoint();
    RingGeometry {
        kind,
        lines: ring
            .divider_angles(rotation)
            .map(|angle| Segment::radial(center, band.inner, band.outer, angle))
            .collect(),
        labels: ring
            .label_anchors(rotation)
            .map(|(angle, text)| Label::at(center, label_radius, angle, text.clone()))
            .collect(),
    }
}

fn hexagram_geometry(
    ring: &Hexagram,
    center: Point,
    bands: HexagramBands,
    rotation: Rotation,
) -> RingGeometry {
    let kind = RingKind::Hexagram;
    if !(bands.is_representable() && is_drawable(center, rotation)) {
        return unrepresentable(kind);
    }

    let layers: Vec<(Layer, f64, RadiusBand)> = Layer::iter()
        .map(|layer| match layer {
            Layer::Outer => (layer, bands.outer, bands.outer_ticks()),
            Layer::Middle => (layer, bands.middle, bands.middle_ticks()),
            Layer::Inner => (layer, bands.inner, bands.inner_ticks()),
        })
        .collect();

    let mut lines = Vec::with_capacity(360 * layers.len() + HEXAGRAM_COUNT);

    // fine ticks on every whole degree, not just on the 64 entries
    for degree in 0..360 {
        let angle = f64::from(degree) + rotation.degrees();
        lines.extend(layers.iter().map(|(layer, _, ticks)| {
            Segment::radial(center, ticks.inner, ticks.outer, angle).with_tone(layer.tone())
        }));
    }

    let dividers = bands.dividers();
    lines.extend(ring.divider_angles(rotation).enumerate().map(|(i, angle)| {
        let segment = Segment::radial(center, dividers.inner, dividers.outer, angle);
        if Hexagram::is_octant_boundary(i) {
            segment.with_tone(Tone::Red).with_weight(OCTANT_WEIGHT)
        } else {
            segment
        }
    }));

    let labels = layers
        .iter()
        .flat_map(|&(layer, radius, _)| {
            ring.entries()
                .iter()
                .zip(ring.label_angles(rotation))
                .map(move |(entry, angle)| {
                    Label::at(center, radius, angle, entry.text(layer).clone())
                })
        })
        .collect();

    RingGeometry {
        kind,
        lines,
        labels,
    }
}

fn degree_geometry(
    ring: &DegreeRing,
    center: Point,
    band: RadiusBand,
    rotation: Rotation,
) -> RingGeometry {
    let kind = RingKind::Degree;
    if !(band.is_representable() && is_drawable(center, rotation)) {
        return unrepresentable(kind);
    }

    let label_radius = band.midpoint();
    RingGeometry {
        kind,
        lines: ring
            .tick_angles(rotation)
            .map(|angle| Segment::radial(center, band.inner, band.outer, angle))
            .collect(),
        labels: ring
            .label_anchors(rotation)
            .map(|(angle, text)| Label::at(center, label_radius, angle, text))
            .collect(),
    }
}
