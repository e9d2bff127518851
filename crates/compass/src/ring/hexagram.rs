use crate::angle::{FULL_TURN, Rotation, mid_angle, wrap_degrees};
use crate::geom::{LabelText, Tone};
use serde::Serialize;
use strum::{Display as StrumDisplay, EnumIter};

pub const HEXAGRAM_COUNT: usize = 64;
pub const HEXAGRAM_STEP: f64 = FULL_TURN / HEXAGRAM_COUNT as f64;
/// Index 0 sits straight up the mathematical y axis; later entries step clockwise.
pub const HEXAGRAM_ANCHOR: f64 = 90.0;
pub const OCTANT_SIZE: usize = 8;

/// (hexagram name, fortune numeral 卦运, element digit 五行)
const HEXAGRAM_TABLE: [(&str, &str, &str); HEXAGRAM_COUNT] = [
    ("乾", "一", "9"),
    ("夬", "六", "4"),
    ("有", "七", "3"),
    ("壮", "二", "8"),
    ("畜", "八", "2"),
    ("需", "三", "7"),
    ("蓄", "四", "6"),
    ("泰", "九", "1"),
    ("履", "六", "9"),
    ("兑", "一", "4"),
    ("睽", "二", "3"),
    ("归", "八", "8"),
    ("孚", "三", "2"),
    ("节", "七", "7"),
    ("损", "九", "6"),
    ("临", "四", "1"),
    ("同", "七", "9"),
    ("革", "三", "4"),
    ("离", "一", "3"),
    ("丰", "六", "8"),
    ("家", "四", "2"),
    ("既", "九", "7"),
    ("贲", "八", "6"),
    ("夷", "三", "1"),
    ("妄", "二", "9"),
    ("随", "七", "4"),
    ("噬", "六", "3"),
    ("震", "一", "8"),
    ("益", "九", "2"),
    ("屯", "四", "7"),
    ("預", "三", "6"),
    ("复", "八", "1"),
    ("坤", "一", "1"),
    ("剥", "六", "6"),
    ("比", "七", "7"),
    ("观", "二", "2"),
    ("豫", "八", "8"),
    ("晋", "三", "3"),
    ("萃", "四", "4"),
    ("否", "九", "9"),
    ("谦", "六", "1"),
    ("艮", "一", "6"),
    ("蹇", "二", "7"),
    ("渐", "七", "2"),
    ("过", "三", "8"),
    ("旅", "八", "3"),
    ("咸", "九", "4"),
    ("遯", "四", "9"),
    ("师", "七", "1"),
    ("蒙", "七", "6"),
    ("坎", "一", "7"),
    ("涣", "六", "2"),
    ("解", "四", "8"),
    ("未", "九", "3"),
    ("困", "八", "4"),
    ("讼", "三", "9"),
    ("升", "二", "1"),
    ("蛊", "七", "6"),
    ("井", "六", "7"),
    ("巽", "一", "2"),
    ("恒", "九", "8"),
    ("鼎", "四", "3"),
    ("過", "四", "4"),
    ("姤", "八", "9"),
];

/// The three concentric label rings, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layer {
    Outer,
    Middle,
    Inner,
}

impl Layer {
    pub fn tone(self) -> Tone {
        match self {
            Self::Outer => Tone::Red,
            Self::Middle => Tone::Yellow,
            Self::Inner => Tone::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HexagramEntry {
    pub name: LabelText,
    pub fortune: LabelText,
    pub element: LabelText,
    pub angle: f64,
}

impl HexagramEntry {
    /// Text shown on `layer`: the fortune numeral outside, the name in the middle and
    /// the element digit inside.
    pub fn text(&self, layer: Layer) -> &LabelText {
        match layer {
            Layer::Outer => &self.fortune,
            Layer::Middle => &self.name,
            Layer::Inner => &self.element,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hexagram {
    entries: Vec<HexagramEntry>,
}

impl Hexagram {
    pub fn standard() -> Self {
        let entries = HEXAGRAM_TABLE
            .iter()
            .enumerate()
            .map(|(i, &(name, fortune, element))| HexagramEntry {
                name: LabelText::from(name),
                fortune: LabelText::from(fortune),
                element: LabelText::from(element),
                angle: wrap_degrees(HEXAGRAM_ANCHOR - i as f64 * HEXAGRAM_STEP),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[HexagramEntry] {
        &self.entries
    }

    pub fn angle(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.angle)
    }

    pub fn label_angle(&self, index: usize, rotation: Rotation) -> Option<f64> {
        self.angle(index).map(|a| a + rotation.degrees())
    }

    /// Boundary between entry `index` and the next one, wrapping the last back to the first.
    pub fn divider_angle(&self, index: usize, rotation: Rotation) -> Option<f64> {
        let current = self.angle(index)?;
        let next = self.angle((index + 1) % self.entries.len())?;
        Some(mid_angle(current, next) + rotation.degrees())
    }

    pub fn label_angles(&self, rotation: Rotation) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(move |e| e.angle + rotation.degrees())
    }

    pub fn divider_angles(&self, rotation: Rotation) -> impl Iterator<Item = f64> + '_ {
        self.entries
            .iter()
            .zip(self.entries.iter().cycle().skip(1))
            .map(move |(a, b)| mid_angle(a.angle, b.angle) + rotation.degrees())
    }

    pub fn is_octant_boundary(index: usize) -> bool {
        index % OCTANT_SIZE == OCTANT_SIZE - 1
    }
}
