use crate::config::{Config, PlateConfig};
use crate::document::{Document, RingDoc};
use crate::theme::ThemeColors;
use compass::{CompassError, CompassRegistry, FrameInput, RingGeometry};

/// A registry configured from `Config` plus the plate it is drawn over.
#[derive(Debug, Clone)]
pub struct Session {
    registry: CompassRegistry,
    plate: PlateConfig,
    unit_size: f64,
    overlay_scale: f64,
}

impl Session {
    pub fn from_config(config: &Config) -> Result<Self, CompassError> {
        let mut registry = CompassRegistry::standard()?;
        registry.set_primary(config.compass.primary);
        registry.set_lodging(config.compass.lodging);
        registry.set_hexagram(config.compass.hexagram);
        registry.set_rotation(config.compass.rotation);

        Ok(Self {
            registry,
            plate: config.plate.clone(),
            unit_size: config.compass.unit_size,
            overlay_scale: config.overlay.scale,
        })
    }

    pub fn registry(&self) -> &CompassRegistry {
        &self.registry
    }

    /// An unknown radius renders every active ring empty.
    pub fn input(&self) -> FrameInput {
        FrameInput {
            center: self.plate.center(),
            max_radius: self.plate.resolve_max_radius().unwrap_or(0.0),
            unit_size: self.unit_size,
        }
    }

    pub fn render(&self) -> Vec<RingGeometry> {
        self.registry.render(&self.input())
    }

    pub fn document(&self, theme: &ThemeColors) -> Document {
        Document {
            center: self.plate.center(),
            max_radius: self.plate.resolve_max_radius(),
            rotation: self.registry.rotation(),
            overlay_scale: self.overlay_scale,
            rings: self
                .render()
                .iter()
                .map(|ring| RingDoc::new(ring, theme))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass::{PrimaryRing, RingKind, Rotation};

    fn config() -> Config {
        Config::from_toml(
            r#"
            [compass]
            primary = "12"
            hexagram = true
            rotation = 30.0

            [plate]
            center = [500, 500]
            image_size = [1000, 900]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_session_follows_config() {
        let session = Session::from_config(&config()).unwrap();
        let active = session.registry().active();

        assert_eq!(active.primary, Some(PrimaryRing::TwelveSupport));
        assert!(active.hexagram);
        assert!(!active.lodging);
        assert_eq!(session.registry().rotation(), Rotation::new(30.0));
        assert_eq!(session.input().max_radius, 400.0);
    }

    #[test]
    fn test_document_lists_active_rings() {
        let session = Session::from_config(&config()).unwrap();
        let document = session.document(&ThemeColors::default());

        let kinds: Vec<_> = document.rings.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RingKind::Degree, RingKind::TwelveSupport, RingKind::Hexagram]
        );
        assert_eq!(document.rings[0].lines.len(), 360);
        assert_eq!(document.rings[1].labels.len(), 12);
        assert_eq!(document.max_radius, Some(400.0));
    }

    #[test]
    fn test_unknown_radius_leaves_rings_empty() {
        let mut config = config();
        config.plate.image_size = None;
        let session = Session::from_config(&config).unwrap();

        let rings = session.render();
        assert_eq!(rings.len(), 3);
        assert!(rings.iter().all(RingGeometry::is_empty));
    }

    #[test]
    fn test_no_plate_no_rings() {
        let session = Session::from_config(&Config::default()).unwrap();
        assert!(session.document(&ThemeColors::default()).rings.is_empty());
    }
}
