pub mod degree;
pub mod fixed;
pub mod hexagram;
pub mod lodging;

pub use degree::DegreeRing;
pub use fixed::{FixedSector, RingConfig};
pub use hexagram::{Hexagram, HexagramEntry, Layer};
pub use lodging::{Discrepancy, UnequalRingConfig, UnequalSector};

use crate::error::CompassError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum RingKind {
    #[strum(
        to_string = "twelve-support",
        serialize = "twelve",
        serialize = "12",
        serialize = "12支"
    )]
    TwelveSupport,
    #[strum(
        to_string = "twenty-four-mountain",
        serialize = "twenty-four",
        serialize = "24",
        serialize = "24山"
    )]
    TwentyFourMountain,
    #[strum(
        to_string = "twenty-eight-lodging",
        serialize = "twenty-eight",
        serialize = "28",
        serialize = "28宿"
    )]
    TwentyEightLodging,
    #[strum(to_string = "hexagram", serialize = "64", serialize = "玄空大卦")]
    Hexagram,
    #[strum(to_string = "degree", serialize = "360", serialize = "周天")]
    Degree,
}

impl RingKind {
    pub fn as_primary(self) -> Option<PrimaryRing> {
        match self {
            Self::TwelveSupport => Some(PrimaryRing::TwelveSupport),
            Self::TwentyFourMountain => Some(PrimaryRing::TwentyFourMountain),
            _ => None,
        }
    }
}

/// The rings that can occupy the primary slot. At most one is shown at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum PrimaryRing {
    #[strum(
        to_string = "twelve-support",
        serialize = "twelve",
        serialize = "12",
        serialize = "12支"
    )]
    TwelveSupport,
    #[strum(
        to_string = "twenty-four-mountain",
        serialize = "twenty-four",
        serialize = "24",
        serialize = "24山"
    )]
    TwentyFourMountain,
}

impl From<PrimaryRing> for RingKind {
    fn from(primary: PrimaryRing) -> Self {
        match primary {
            PrimaryRing::TwelveSupport => Self::TwelveSupport,
            PrimaryRing::TwentyFourMountain => Self::TwentyFourMountain,
        }
    }
}

impl TryFrom<RingKind> for PrimaryRing {
    type Error = CompassError;

    fn try_from(kind: RingKind) -> Result<Self, Self::Error> {
        kind.as_primary().ok_or(CompassError::NotPrimary(kind))
    }
}

/// Borrowed view of one ring, dispatched by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingDefinition<'a> {
    Fixed(&'a FixedSector),
    Unequal(&'a UnequalSector),
    Hexagram(&'a Hexagram),
    Degree(&'a DegreeRing),
}

impl RingDefinition<'_> {
    pub fn kind(&self) -> RingKind {
        match self {
            Self::Fixed(ring) => ring.kind(),
            Self::Unequal(_) => RingKind::TwentyEightLodging,
            Self::Hexagram(_) => RingKind::Hexagram,
            Self::Degree(_) => RingKind::Degree,
        }
    }

    pub fn sector_count(&self) -> usize {
        match self {
            Self::Fixed(ring) => ring.sector_count(),
            Self::Unequal(ring) => ring.sector_count(),
            Self::Hexagram(_) => hexagram::HEXAGRAM_COUNT,
            Self::Degree(_) => degree::TICK_COUNT,
        }
    }

    /// The first `n` label texts, for listings.
    pub fn label_preview(&self, n: usize) -> Vec<String> {
        match self {
            Self::Fixed(ring) => ring.labels().iter().take(n).map(|l| l.to_string()).collect(),
            Self::Unequal(ring) => ring.labels().iter().take(n).map(|l| l.to_string()).collect(),
            Self::Hexagram(ring) => ring
                .entries()
                .iter()
                .take(n)
                .map(|e| e.text(Layer::Middle).to_string())
                .collect(),
            Self::Degree(ring) => (0..degree::TICK_COUNT)
                .step_by(degree::LABEL_STEP)
                .take(n)
                .map(|d| ring.label_text(d))
                .collect(),
        }
    }
}

/// Every ring the compass can draw, built once and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct RingCatalog {
    pub twelve_support: FixedSector,
    pub twenty_four_mountain: FixedSector,
    pub lodging: UnequalSector,
    pub hexagram: Hexagram,
    pub degree: DegreeRing,
}

impl RingCatalog {
    pub fn standard() -> Result<Self, CompassError> {
        let catalog = Self {
            twelve_support: FixedSector::twelve_support()?,
            twenty_four_mountain: FixedSector::twenty_four_mountain()?,
            lodging: UnequalSector::lodging()?,
            hexagram: Hexagram::standard(),
            degree: DegreeRing,
        };

        for discrepancy in catalog.lodging.audit() {
            log::warn!("28-lodging table: {}", discrepancy);
        }

        Ok(catalog)
    }

    pub fn primary(&self, primary: PrimaryRing) -> &FixedSector {
        match primary {
            PrimaryRing::TwelveSupport => &self.twelve_support,
            PrimaryRing::TwentyFourMountain => &self.twenty_four_mountain,
        }
    }

    pub fn definition(&self, kind: RingKind) -> RingDefinition<'_> {
        match kind {
            RingKind::TwelveSupport => RingDefinition::Fixed(&self.twelve_support),
            RingKind::TwentyFourMountain => RingDefinition::Fixed(&self.twenty_four_mountain),
            RingKind::TwentyEightLodging => RingDefinition::Unequal(&self.lodging),
            RingKind::Hexagram => RingDefinition::Hexagram(&self.hexagram),
            RingKind::Degree => RingDefinition::Degree(&self.degree),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_label_preview() {
        let catalog = RingCatalog::standard().unwrap();
        let twelve = catalog.definition(RingKind::TwelveSupport).label_preview(3);
        assert_eq!(twelve, vec!["子", "丑", "寅"]);

        let degree = catalog.definition(RingKind::Degree).label_preview(3);
        assert_eq!(degree, vec!["0", "10", "20"]);

        let hexagram = catalog.definition(RingKind::Hexagram).label_preview(100);
        assert_eq!(hexagram.len(), 64);
    }

    #[test]
    fn test_ring_kind_parsing() {
        let cases = vec![
            ("12", RingKind::TwelveSupport),
            ("Twelve-Support", RingKind::TwelveSupport),
            ("24山", RingKind::TwentyFourMountain),
            ("TWENTY-EIGHT", RingKind::TwentyEightLodging),
            ("28宿", RingKind::TwentyEightLodging),
            ("64", RingKind::Hexagram),
            ("玄空大卦", RingKind::Hexagram),
            ("周天", RingKind::Degree),
        ];

        for (name, expected) in cases {
            assert_eq!(name.parse::<RingKind>().unwrap(), expected, "{name}");
        }
        assert!("13".parse::<RingKind>().is_err());
    }

    #[test]
    fn test_ring_kind_serde_uses_canonical_names() {
        for kind in RingKind::iter() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
            let back: RingKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
        let primary: PrimaryRing = serde_json::from_str("\"24\"").unwrap();
        assert_eq!(primary, PrimaryRing::TwentyFourMountain);
    }

    #[test]
    fn test_only_twelve_and_twenty_four_are_primary() {
        let primaries: Vec<_> = RingKind::iter().filter_map(RingKind::as_primary).collect();
        assert_eq!(
            primaries,
            vec![PrimaryRing::TwelveSupport, PrimaryRing::TwentyFourMountain]
        );
        assert_eq!(
            PrimaryRing::try_from(RingKind::Hexagram),
            Err(CompassError::NotPrimary(RingKind::Hexagram))
        );
    }

    #[test]
    fn test_standard_catalog_sector_counts() {
        let catalog = RingCatalog::standard().unwrap();
        let counts: Vec<_> = RingKind::iter()
            .map(|kind| (kind, catalog.definition(kind).sector_count()))
            .collect();
        assert_eq!(
            counts,
            vec![
                (RingKind::TwelveSupport, 12),
                (RingKind::TwentyFourMountain, 24),
                (RingKind::TwentyEightLodging, 28),
                (RingKind::Hexagram, 64),
                (RingKind::Degree, 360),
            ]
        );
        for kind in RingKind::iter() {
            assert_eq!(catalog.definition(kind).kind(), kind);
        }
    }
}
