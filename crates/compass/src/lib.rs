//! Geometry for luopan compass rings laid over a photographed plate.
//!
//! Given a plate centre, the radius available around it and one global rotation, the
//! engine produces tick segments and label anchors for the 12-support, 24-mountain,
//! 28-lodging, 64-hexagram and 360-degree rings, nested so they never overlap.

pub mod macros;

pub mod angle;
pub mod engine;
pub mod error;
pub mod geom;
pub mod radius;
pub mod registry;
pub mod ring;

pub use angle::{Rotation, SectorLayout};
pub use engine::{CompassEngine, FrameInput, RingGeometry};
pub use error::CompassError;
pub use geom::{Label, LabelText, Point, Segment, Tone};
pub use radius::{HexagramBands, RadiusAllocator, RadiusBand, RadiusPlan};
pub use registry::{ActiveRingSet, CompassRegistry, FrameSnapshot};
pub use ring::{PrimaryRing, RingCatalog, RingDefinition, RingKind};
