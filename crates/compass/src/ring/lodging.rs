//! The twenty-eight lunar lodgings (二十八宿).
//!
//! Lodging widths are empirical and uneven, and the label table is stored separately
//! from the boundary table. Both are kept exactly as recorded; [`UnequalSector::audit`]
//! reports where they disagree instead of correcting them.

use super::RingKind;
use crate::angle::{FULL_TURN, Rotation, angle_delta, mid_angle, wrap_degrees};
use crate::error::CompassError;
use crate::geom::LabelText;
use std::fmt;

/// Shift from the stored boundary frame to image angles.
pub const BOUNDARY_OFFSET: f64 = -90.0;

/// Allowed drift between stored tables and values derived from the widths.
pub const AUDIT_TOLERANCE: f64 = 0.01;

const LODGING_LABELS: [&str; 28] = [
    "危", "室", "壁", "奎", "娄", "胃", "昴", "毕", "觜", "参", "井", "鬼", "柳", "星", "张", "翼",
    "轸", "角", "亢", "氐", "房", "心", "尾", "箕", "斗", "牛", "女", "虚",
];

const LODGING_WIDTHS: [f64; 28] = [
    16.76, 15.77, 8.87, 15.77, 11.83, 13.8, 10.84, 15.77, 1.97, 8.87, 32.53, 3.94, 14.78, 6.9,
    17.74, 17.74, 16.76, 11.83, 8.87, 14.78, 4.93, 4.93, 17.74, 10.84, 25.87, 7.89, 11.83, 9.86,
];

const LODGING_START_ANGLES: [f64; 28] = [
    0.00, 343.24, 327.47, 318.60, 302.83, 291.00, 277.20, 266.36, 250.59, 248.62, 239.75, 207.22,
    203.28, 188.50, 181.60, 163.86, 146.12, 129.36, 117.53, 108.66, 93.88, 88.95, 84.02, 66.28,
    55.44, 29.57, 21.68, 9.85,
];

const LODGING_LABEL_ANGLES: [f64; 28] = [
    261.62, 245.355, 233.035, 220.715, 206.915, 194.1, 181.78, 168.475, 159.605, 154.185, 133.485,
    115.25, 105.89, 95.05, 82.73, 64.99, 47.74, 33.445, 23.095, 11.27, 1.415, 356.485, 345.15,
    330.86, 312.505, 295.625, 285.765, 274.925,
];

/// Traditional extents in du (度), where a full circuit is 365 du.
const LODGING_DU: [u8; 28] = [
    12, 9, 15, 5, 5, 18, 11, 26, 8, 12, 10, 17, 16, 9, 16, 12, 14, 11, 16, 2, 9, 33, 4, 15, 7, 18,
    18, 17,
];

#[derive(Debug, Clone, PartialEq)]
pub struct UnequalRingConfig {
    pub labels: Vec<String>,
    pub sector_widths: Vec<f64>,
    pub start_angles: Vec<f64>,
    pub label_angles: Vec<f64>,
    /// Optional per-sector extents in du.
    pub du: Option<Vec<u8>>,
}

impl UnequalRingConfig {
    pub fn lodging() -> Self {
        Self {
            labels: LODGING_LABELS.iter().map(|l| l.to_string()).collect(),
            sector_widths: LODGING_WIDTHS.to_vec(),
            start_angles: LODGING_START_ANGLES.to_vec(),
            label_angles: LODGING_LABEL_ANGLES.to_vec(),
            du: Some(LODGING_DU.to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Discrepancy {
    WidthSum { total: f64 },
    BoundaryDrift { index: usize, stored: f64, summed: f64 },
    LabelOffCenter { index: usize, stored: f64, midpoint: f64 },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidthSum { total } => {
                write!(f, "sector widths sum to {total:.3} degrees, not 360")
            }
            Self::BoundaryDrift {
                index,
                stored,
                summed,
            } => write!(
                f,
                "boundary {index} is stored at {stored:.3} but the widths place it at {summed:.3}"
            ),
            Self::LabelOffCenter {
                index,
                stored,
                midpoint,
            } => write!(
                f,
                "label {index} is stored at {stored:.3}, sector midpoint is {midpoint:.3}"
            ),
        }
    }
}

/// Ring with per-sector widths.
#[derive(Debug, Clone, PartialEq)]
pub struct UnequalSector {
    labels: Vec<LabelText>,
    widths: Vec<f64>,
    start_angles: Vec<f64>,
    label_angles: Vec<f64>,
    du: Option<Vec<u8>>,
}

impl UnequalSector {
    pub fn new(config: UnequalRingConfig) -> Result<Self, CompassError> {
        let ring = RingKind::TwentyEightLodging;
        let expected = config.labels.len();
        if expected == 0 {
            return Err(CompassError::EmptyRing { ring });
        }

        for (table, found) in [
            ("sector width", config.sector_widths.len()),
            ("start angle", config.start_angles.len()),
            ("label angle", config.label_angles.len()),
            ("du", config.du.as_ref().map_or(expected, Vec::len)),
        ] {
            if found != expected {
                return Err(CompassError::TableLengthMismatch {
                    ring,
                    table,
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            labels: config.labels.into_iter().map(LabelText::new).collect(),
            widths: config.sector_widths,
            start_angles: config.start_angles,
            label_angles: config.label_angles,
            du: config.du,
        })
    }

    pub fn lodging() -> Result<Self, CompassError> {
        Self::new(UnequalRingConfig::lodging())
    }

    pub fn sector_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[LabelText] {
        &self.labels
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn start_angles(&self) -> &[f64] {
        &self.start_angles
    }

    /// Extent of lodging `index` in du, when the ring was built with a du table.
    pub fn du(&self, index: usize) -> Option<u8> {
        self.du.as_ref()?.get(index).copied()
    }

    /// Running sum of widths, starting at 0, one entry per sector.
    pub fn cumulative_angles(&self) -> Vec<f64> {
        self.widths
            .iter()
            .scan(0.0, |acc, width| {
                let start = *acc;
                *acc += width;
                Some(start)
            })
            .collect()
    }

    pub fn divider_angle(&self, index: usize, rotation: Rotation) -> Option<f64> {
        self.start_angles
            .get(index)
            .map(|start| start + BOUNDARY_OFFSET + rotation.degrees())
    }

    pub fn label_angle(&self, index: usize, rotation: Rotation) -> Option<f64> {
        self.label_angles.get(index).map(|a| a + rotation.degrees())
    }

    pub fn divider_angles(&self, rotation: Rotation) -> impl Iterator<Item = f64> + '_ {
        self.start_angles
            .iter()
            .map(move |start| start + BOUNDARY_OFFSET + rotation.degrees())
    }

    pub fn label_anchors(&self, rotation: Rotation) -> impl Iterator<Item = (f64, &LabelText)> + '_ {
        self.label_angles
            .iter()
            .zip(&self.labels)
            .map(move |(a, label)| (a + rotation.degrees(), label))
    }

    pub fn audit(&self) -> Vec<Discrepancy> {
        let mut found = Vec::new();

        let total: f64 = self.widths.iter().sum();
        if (total - FULL_TURN).abs() > 1e-9 {
            found.push(Discrepancy::WidthSum { total });
        }

        // stored boundaries run clockwise from 0, so each sits at -cumulative
        for (index, (&stored, summed)) in self
            .start_angles
            .iter()
            .zip(self.cumulative_angles())
            .enumerate()
        {
            let summed = wrap_degrees(-summed);
            if angle_delta(stored, summed).abs() > AUDIT_TOLERANCE {
                found.push(Discrepancy::BoundaryDrift {
                    index,
                    stored,
                    summed,
                });
            }
        }

        let count = self.sector_count();
        for (index, &stored) in self.label_angles.iter().enumerate() {
            let next = self.start_angles[(index + 1) % count];
            let midpoint =
                wrap_degrees(mid_angle(self.start_angles[index], next) + BOUNDARY_OFFSET);
            if angle_delta(stored, midpoint).abs() > AUDIT_TOLERANCE {
                found.push(Discrepancy::LabelOffCenter {
                    index,
                    stored,
                    midpoint,
                });
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_angles() {
        let ring = UnequalSector::lodging().unwrap();
        let cumulative = ring.cumulative_angles();
        assert_eq!(cumulative.len(), 28);
        assert_eq!(cumulative[0], 0.0);
        assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
        assert!((cumulative[1] - 16.76).abs() < 1e-9);
    }

    #[test]
    fn test_stored_boundaries_match_summed_widths() {
        let ring = UnequalSector::lodging().unwrap();
        for (i, summed) in ring.cumulative_angles().into_iter().enumerate() {
            let from_table = ring.divider_angle(i, Rotation::default()).unwrap();
            let from_widths = -summed + BOUNDARY_OFFSET;
            assert!(
                angle_delta(from_table, from_widths).abs() <= AUDIT_TOLERANCE,
                "boundary {i}: {from_table} vs {from_widths}"
            );
        }
    }

    #[test]
    fn test_audit_flags_width_total_only() {
        let ring = UnequalSector::lodging().unwrap();
        let found = ring.audit();
        assert_eq!(found.len(), 1, "{found:?}");
        match &found[0] {
            Discrepancy::WidthSum { total } => assert!((total - 360.01).abs() < 1e-6),
            other => panic!("unexpected discrepancy {other:?}"),
        }
    }

    #[test]
    fn test_audit_reports_tampered_label() {
        let mut config = UnequalRingConfig::lodging();
        config.label_angles[3] += 2.0;
        let ring = UnequalSector::new(config).unwrap();
        assert!(ring.audit().iter().any(|d| matches!(
            d,
            Discrepancy::LabelOffCenter { index: 3, .. }
        )));
    }

    #[test]
    fn test_label_angles_come_from_their_own_table() {
        let ring = UnequalSector::lodging().unwrap();
        assert_eq!(ring.label_angle(0, Rotation::default()), Some(261.62));
        assert_eq!(ring.label_angle(0, Rotation::new(10.0)), Some(271.62));
        assert_eq!(ring.label_angle(28, Rotation::default()), None);
        assert_eq!(ring.divider_angle(28, Rotation::default()), None);
        assert_eq!(ring.labels()[27].as_str(), "虚");
    }

    #[test]
    fn test_traditional_du_sum_to_365() {
        let ring = UnequalSector::lodging().unwrap();
        let total: u32 = (0..28).filter_map(|i| ring.du(i)).map(u32::from).sum();
        assert_eq!(total, 365);
        assert_eq!(ring.du(28), None);
    }

    #[test]
    fn test_du_comes_from_the_config() {
        let mut config = UnequalRingConfig::lodging();
        config.du = None;
        let ring = UnequalSector::new(config).unwrap();
        assert_eq!(ring.du(0), None);

        let mut config = UnequalRingConfig::lodging();
        config.du = Some(vec![1; 28]);
        let ring = UnequalSector::new(config).unwrap();
        assert_eq!(ring.du(0), Some(1));
        assert_eq!(ring.du(27), Some(1));

        let mut config = UnequalRingConfig::lodging();
        config.du = Some(vec![1; 5]);
        assert_eq!(
            UnequalSector::new(config),
            Err(CompassError::TableLengthMismatch {
                ring: RingKind::TwentyEightLodging,
                table: "du",
                expected: 28,
                found: 5,
            })
        );
    }

    #[test]
    fn test_mismatched_tables_are_rejected() {
        let mut config = UnequalRingConfig::lodging();
        config.sector_widths.pop();
        assert_eq!(
            UnequalSector::new(config),
            Err(CompassError::TableLengthMismatch {
                ring: RingKind::TwentyEightLodging,
                table: "sector width",
                expected: 28,
                found: 27,
            })
        );
    }
}
