use super::RingKind;
use crate::angle::{Rotation, SectorLayout};
use crate::error::CompassError;
use crate::geom::LabelText;

const TWELVE_SUPPORT_OFFSET: f64 = 255.0;
const TWELVE_SUPPORT_LABELS: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const TWENTY_FOUR_MOUNTAIN_OFFSET: f64 = 262.5;
const TWENTY_FOUR_MOUNTAIN_LABELS: [&str; 24] = [
    "子", "癸", "丑", "艮", "寅", "甲", "卯", "乙", "辰", "巽", "巳", "丙", "午", "丁", "未", "坤",
    "申", "庚", "酉", "辛", "戌", "乾", "亥", "壬",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RingConfig {
    pub sector_count: usize,
    pub initial_offset: f64,
    pub labels: Vec<String>,
}

impl RingConfig {
    pub fn new(initial_offset: f64, labels: &[&str]) -> Self {
        Self {
            sector_count: labels.len(),
            initial_offset,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Equal-width ring: every sector spans `360 / sector_count` degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSector {
    kind: RingKind,
    layout: SectorLayout,
    labels: Vec<LabelText>,
}

impl FixedSector {
    pub fn new(kind: RingKind, config: RingConfig) -> Result<Self, CompassError> {
        if config.sector_count == 0 {
            return Err(CompassError::EmptyRing { ring: kind });
        }
        if config.labels.len() != config.sector_count {
            return Err(CompassError::LabelCountMismatch {
                ring: kind,
                expected: config.sector_count,
                found: config.labels.len(),
            });
        }

        Ok(Self {
            kind,
            layout: SectorLayout::new(config.sector_count, config.initial_offset),
            labels: config.labels.into_iter().map(LabelText::new).collect(),
        })
    }

    pub fn twelve_support() -> Result<Self, CompassError> {
        Self::new(
            RingKind::TwelveSupport,
            RingConfig::new(TWELVE_SUPPORT_OFFSET, &TWELVE_SUPPORT_LABELS),
        )
    }

    pub fn twenty_four_mountain() -> Result<Self, CompassError> {
        Self::new(
            RingKind::TwentyFourMountain,
            RingConfig::new(TWENTY_FOUR_MOUNTAIN_OFFSET, &TWENTY_FOUR_MOUNTAIN_LABELS),
        )
    }

    pub fn kind(&self) -> RingKind {
        self.kind
    }

    pub fn layout(&self) -> SectorLayout {
        self.layout
    }

    pub fn sector_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[LabelText] {
        &self.labels
    }

    pub fn tick_angle(&self, index: usize, rotation: Rotation) -> f64 {
        self.layout.placement_angle(index, rotation)
    }

    pub fn label_angle(&self, index: usize, rotation: Rotation) -> f64 {
        self.layout.label_angle(index, rotation)
    }

    pub fn tick_angles(&self, rotation: Rotation) -> impl Iterator<Item = f64> + '_ {
        (0..self.sector_count()).map(move |i| self.tick_angle(i, rotation))
    }

    /// Label anchors paired with their text, in sector order.
    pub fn label_angles(&self, rotation: Rotation) -> impl Iterator<Item = (f64, &LabelText)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(move |(i, label)| (self.label_angle(i, rotation), label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rings() {
        let twelve = FixedSector::twelve_support().unwrap();
        assert_eq!(twelve.sector_count(), 12);
        assert_eq!(twelve.layout().sector_angle, 30.0);
        assert_eq!(twelve.labels()[0].as_str(), "子");
        assert_eq!(twelve.tick_angle(0, Rotation::default()), 255.0);

        let twenty_four = FixedSector::twenty_four_mountain().unwrap();
        assert_eq!(twenty_four.sector_count(), 24);
        assert_eq!(twenty_four.layout().sector_angle, 15.0);
        assert_eq!(twenty_four.labels()[23].as_str(), "壬");
        assert_eq!(twenty_four.label_angle(0, Rotation::default()), 270.0);
    }

    #[test]
    fn test_tick_spacing_is_independent_of_rotation() {
        for ring in [
            FixedSector::twelve_support().unwrap(),
            FixedSector::twenty_four_mountain().unwrap(),
        ] {
            let step = ring.layout().sector_angle;
            for rotation in [0.0, 33.3, -725.0] {
                let angles: Vec<f64> = ring.tick_angles(Rotation::new(rotation)).collect();
                for pair in angles.windows(2) {
                    assert!((pair[1] - pair[0] - step).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_label_count_mismatch_is_rejected() {
        let config = RingConfig {
            sector_count: 12,
            initial_offset: 0.0,
            labels: vec!["子".to_string(); 11],
        };
        assert_eq!(
            FixedSector::new(RingKind::TwelveSupport, config),
            Err(CompassError::LabelCountMismatch {
                ring: RingKind::TwelveSupport,
                expected: 12,
                found: 11,
            })
        );
    }

    #[test]
    fn test_empty_ring_is_rejected() {
        let config = RingConfig::new(0.0, &[]);
        assert!(matches!(
            FixedSector::new(RingKind::TwentyFourMountain, config),
            Err(CompassError::EmptyRing { .. })
        ));
    }
}
