use crate::angle::Rotation;
use crate::engine::{CompassEngine, FrameInput, RingGeometry};
use crate::error::CompassError;
use crate::ring::{PrimaryRing, RingCatalog, RingKind};
use serde::Serialize;

/// Which rings are on. The degree ring has no off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActiveRingSet {
    pub primary: Option<PrimaryRing>,
    pub lodging: bool,
    pub hexagram: bool,
}

impl ActiveRingSet {
    pub fn is_active(&self, kind: RingKind) -> bool {
        match kind {
            RingKind::TwelveSupport | RingKind::TwentyFourMountain => {
                self.primary.map(RingKind::from) == Some(kind)
            }
            RingKind::TwentyEightLodging => self.lodging,
            RingKind::Hexagram => self.hexagram,
            RingKind::Degree => true,
        }
    }

    /// Active rings in nesting order, outermost first.
    pub fn kinds(&self) -> impl Iterator<Item = RingKind> + use<> {
        let primary = self.primary.map(RingKind::from);
        std::iter::once(RingKind::Degree)
            .chain(primary)
            .chain(self.lodging.then_some(RingKind::TwentyEightLodging))
            .chain(self.hexagram.then_some(RingKind::Hexagram))
    }
}

/// Everything a rendering pass reads, copied out in one go.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FrameSnapshot {
    pub active: ActiveRingSet,
    pub rotation: Rotation,
}

#[derive(Debug, Clone)]
pub struct CompassRegistry {
    catalog: RingCatalog,
    active: ActiveRingSet,
    rotation: Rotation,
}

impl CompassRegistry {
    pub fn new(catalog: RingCatalog) -> Self {
        Self {
            catalog,
            active: ActiveRingSet::default(),
            rotation: Rotation::default(),
        }
    }

    pub fn standard() -> Result<Self, CompassError> {
        Ok(Self::new(RingCatalog::standard()?))
    }

    pub fn catalog(&self) -> &RingCatalog {
        &self.catalog
    }

    pub fn active(&self) -> ActiveRingSet {
        self.active
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Selecting one primary ring deselects the other.
    pub fn select_primary(&mut self, primary: PrimaryRing) {
        if self.active.primary != Some(primary) {
            log::debug!("Primary ring: {}", primary);
        }
        self.active.primary = Some(primary);
    }

    pub fn clear_primary(&mut self) {
        if let Some(previous) = self.active.primary.take() {
            log::debug!("Primary ring {} cleared", previous);
        }
    }

    pub fn set_primary(&mut self, primary: Option<PrimaryRing>) {
        match primary {
            Some(p) => self.select_primary(p),
            None => self.clear_primary(),
        }
    }

    pub fn set_lodging(&mut self, on: bool) {
        log::debug!("28-lodging ring: {}", on);
        self.active.lodging = on;
    }

    pub fn toggle_lodging(&mut self) {
        self.set_lodging(!self.active.lodging);
    }

    pub fn set_hexagram(&mut self, on: bool) {
        log::debug!("Hexagram ring: {}", on);
        self.active.hexagram = on;
    }

    pub fn toggle_hexagram(&mut self) {
        self.set_hexagram(!self.active.hexagram);
    }

    /// Turns `kind` on. Primary kinds replace the current primary ring.
    pub fn select(&mut self, kind: RingKind) {
        match kind {
            RingKind::TwelveSupport => self.select_primary(PrimaryRing::TwelveSupport),
            RingKind::TwentyFourMountain => self.select_primary(PrimaryRing::TwentyFourMountain),
            RingKind::TwentyEightLodging => self.set_lodging(true),
            RingKind::Hexagram => self.set_hexagram(true),
            RingKind::Degree => {}
        }
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<RingKind, CompassError> {
        let kind = name
            .trim()
            .parse::<RingKind>()
            .map_err(|_| CompassError::UnknownRing(name.to_string()))?;
        self.select(kind);
        Ok(kind)
    }

    pub fn set_rotation(&mut self, rotation: impl Into<Rotation>) {
        self.rotation = rotation.into();
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            active: self.active,
            rotation: self.rotation,
        }
    }

    pub fn engine(&self) -> CompassEngine<'_> {
        CompassEngine::new(&self.catalog)
    }

    pub fn render(&self, input: &FrameInput) -> Vec<RingGeometry> {
        self.engine().render(self.snapshot(), input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CompassRegistry {
        CompassRegistry::standard().unwrap()
    }

    #[test]
    fn test_starts_with_degree_ring_only() {
        let registry = registry();
        let kinds: Vec<_> = registry.active().kinds().collect();
        assert_eq!(kinds, vec![RingKind::Degree]);
        assert_eq!(registry.rotation(), Rotation::default());
    }

    #[test]
    fn test_primary_rings_are_mutually_exclusive() {
        let mut registry = registry();
        registry.select_primary(PrimaryRing::TwelveSupport);
        registry.select_primary(PrimaryRing::TwentyFourMountain);

        let active = registry.active();
        assert!(active.is_active(RingKind::TwentyFourMountain));
        assert!(!active.is_active(RingKind::TwelveSupport));

        registry.clear_primary();
        assert_eq!(registry.active().primary, None);
    }

    #[test]
    fn test_auxiliary_toggles_are_independent() {
        let mut registry = registry();
        registry.select_primary(PrimaryRing::TwelveSupport);
        registry.toggle_lodging();
        registry.toggle_hexagram();
        registry.toggle_lodging();

        let active = registry.active();
        assert_eq!(active.primary, Some(PrimaryRing::TwelveSupport));
        assert!(!active.lodging);
        assert!(active.hexagram);
        assert!(active.is_active(RingKind::Degree));
    }

    #[test]
    fn test_select_by_name() {
        let mut registry = registry();
        assert_eq!(registry.select_by_name("12支"), Ok(RingKind::TwelveSupport));
        assert_eq!(registry.select_by_name(" 24 "), Ok(RingKind::TwentyFourMountain));
        assert_eq!(registry.select_by_name("28宿"), Ok(RingKind::TwentyEightLodging));
        assert_eq!(
            registry.select_by_name("compass"),
            Err(CompassError::UnknownRing("compass".to_string()))
        );

        let kinds: Vec<_> = registry.active().kinds().collect();
        assert_eq!(
            kinds,
            vec![
                RingKind::Degree,
                RingKind::TwentyFourMountain,
                RingKind::TwentyEightLodging
            ]
        );
    }

    #[test]
    fn test_snapshot_is_detached_from_later_writes() {
        let mut registry = registry();
        registry.set_rotation(45.0);
        let snapshot = registry.snapshot();
        registry.set_rotation(90.0);
        registry.set_hexagram(true);

        assert_eq!(snapshot.rotation, Rotation::new(45.0));
        assert!(!snapshot.active.hexagram);
        assert_eq!(registry.snapshot().rotation, Rotation::new(90.0));
    }
}
