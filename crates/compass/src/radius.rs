use serde::Serialize;

pub const EDGE_INSET: f64 = 5.0;
pub const DEGREE_BAND_WIDTH: f64 = 30.0;
pub const PRIMARY_PAD: f64 = 12.0;
pub const LODGING_PAD: f64 = 20.0;
pub const LODGING_BAND_WIDTH: f64 = 30.0;
pub const HEXAGRAM_SHRINK: f64 = 0.95;
pub const HEXAGRAM_MIDDLE_SCALE: f64 = 0.93;
pub const HEXAGRAM_INNER_SCALE: f64 = 0.86;
pub const DEFAULT_UNIT_SIZE: f64 = 14.0;

// tick extents around each hexagram layer radius
const OUTER_TICK_SPAN: (f64, f64) = (0.99, 1.03);
const INNER_TICK_SPAN: (f64, f64) = (0.98, 1.01);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusBand {
    pub inner: f64,
    pub outer: f64,
}

impl RadiusBand {
    pub fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    pub fn midpoint(&self) -> f64 {
        (self.inner + self.outer) / 2.0
    }

    /// A band can be drawn when it is finite, non-negative and not inverted.
    pub fn is_representable(&self) -> bool {
        self.inner.is_finite()
            && self.outer.is_finite()
            && self.inner >= 0.0
            && self.outer > self.inner
    }
}

/// Label radii of the three hexagram rings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HexagramBands {
    pub outer: f64,
    pub middle: f64,
    pub inner: f64,
}

impl HexagramBands {
    pub fn from_outer(outer: f64) -> Self {
        Self {
            outer,
            middle: outer * HEXAGRAM_MIDDLE_SCALE,
            inner: outer * HEXAGRAM_INNER_SCALE,
        }
    }

    pub fn outer_ticks(&self) -> RadiusBand {
        Self::span(self.outer, OUTER_TICK_SPAN)
    }

    pub fn middle_ticks(&self) -> RadiusBand {
        Self::span(self.middle, OUTER_TICK_SPAN)
    }

    pub fn inner_ticks(&self) -> RadiusBand {
        Self::span(self.inner, INNER_TICK_SPAN)
    }

    /// Radial extent of the dividers, from the inner ring's outer tick edge to the outer
    /// ring's inner tick edge.
    pub fn dividers(&self) -> RadiusBand {
        RadiusBand::new(self.inner_ticks().outer, self.outer_ticks().inner)
    }

    pub fn is_representable(&self) -> bool {
        self.outer.is_finite() && self.inner_ticks().is_representable() && self.inner > 0.0
    }

    fn span(radius: f64, (lo, hi): (f64, f64)) -> RadiusBand {
        RadiusBand::new(radius * lo, radius * hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadiusPlan {
    pub degree: RadiusBand,
    /// Ticks run from the centre out to `primary.outer`, where the labels are anchored.
    pub primary: RadiusBand,
    pub lodging: RadiusBand,
    pub hexagram: HexagramBands,
}

impl RadiusPlan {
    /// Outer radii from the outermost ring inward.
    pub fn outer_radii(&self) -> [f64; 4] {
        [
            self.degree.outer,
            self.primary.outer,
            self.lodging.outer,
            self.hexagram.outer,
        ]
    }
}

/// Nests the rings inside the available radius, outermost first. Nothing is cached or
/// clamped: the same inputs always produce the same plan, and a too small radius simply
/// yields bands the engine refuses to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusAllocator {
    pub unit_size: f64,
}

impl RadiusAllocator {
    pub fn new(unit_size: f64) -> Self {
        Self { unit_size }
    }

    pub fn allocate(&self, max_radius: f64) -> RadiusPlan {
        let unit = self.unit_size;

        let degree_outer = max_radius - EDGE_INSET;
        let degree = RadiusBand::new(degree_outer - DEGREE_BAND_WIDTH, degree_outer);

        // two characters inside the degree ring
        let primary_base = degree.inner - unit * 2.0;
        let primary = RadiusBand::new(0.0, primary_base + PRIMARY_PAD);

        let lodging_outer = primary_base - unit * 2.0 + LODGING_PAD;
        let lodging = RadiusBand::new(lodging_outer - LODGING_BAND_WIDTH, lodging_outer);

        let hexagram = HexagramBands::from_outer((lodging.inner - unit * 4.0) * HEXAGRAM_SHRINK);

        RadiusPlan {
            degree,
            primary,
            lodging,
            hexagram,
        }
    }
}
