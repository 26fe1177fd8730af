//! Fixed column layout ratios.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnRatio {
    Full,
    #[default]
    Halves,
    ThirdTwoThirds,
    TwoThirdsThird,
    QuarterThreeQuarters,
    ThreeQuartersQuarter,
    Thirds,
    QuarterHalfQuarter,
    QuarterQuarterHalf,
    HalfQuarterQuarter,
    Quarters,
}

impl ColumnRatio {
    pub const ALL: [ColumnRatio; 11] = [
        ColumnRatio::Full,
        ColumnRatio::Halves,
        ColumnRatio::ThirdTwoThirds,
        ColumnRatio::TwoThirdsThird,
        ColumnRatio::QuarterThreeQuarters,
        ColumnRatio::ThreeQuartersQuarter,
        ColumnRatio::Thirds,
        ColumnRatio::QuarterHalfQuarter,
        ColumnRatio::QuarterQuarterHalf,
        ColumnRatio::HalfQuarterQuarter,
        ColumnRatio::Quarters,
    ];

    pub fn parse(ratio: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == ratio.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRatio::Full => "100",
            ColumnRatio::Halves => "50-50",
            ColumnRatio::ThirdTwoThirds => "33-67",
            ColumnRatio::TwoThirdsThird => "67-33",
            ColumnRatio::QuarterThreeQuarters => "25-75",
            ColumnRatio::ThreeQuartersQuarter => "75-25",
            ColumnRatio::Thirds => "33-33-33",
            ColumnRatio::QuarterHalfQuarter => "25-50-25",
            ColumnRatio::QuarterQuarterHalf => "25-25-50",
            ColumnRatio::HalfQuarterQuarter => "50-25-25",
            ColumnRatio::Quarters => "25-25-25-25",
        }
    }

    /// Column widths as CSS percentages
    pub fn widths(&self) -> &'static [&'static str] {
        match self {
            ColumnRatio::Full => &["100%"],
            ColumnRatio::Halves => &["50%", "50%"],
            ColumnRatio::ThirdTwoThirds => &["33%", "67%"],
            ColumnRatio::TwoThirdsThird => &["67%", "33%"],
            ColumnRatio::QuarterThreeQuarters => &["25%", "75%"],
            ColumnRatio::ThreeQuartersQuarter => &["75%", "25%"],
            ColumnRatio::Thirds => &["33.33%", "33.33%", "33.33%"],
            ColumnRatio::QuarterHalfQuarter => &["25%", "50%", "25%"],
            ColumnRatio::QuarterQuarterHalf => &["25%", "25%", "50%"],
            ColumnRatio::HalfQuarterQuarter => &["50%", "25%", "25%"],
            ColumnRatio::Quarters => &["25%", "25%", "25%", "25%"],
        }
    }

    pub fn column_count(&self) -> usize {
        self.widths().len()
    }

    /// Evenly split layout for a column count
    pub fn for_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ColumnRatio::Full),
            2 => Some(ColumnRatio::Halves),
            3 => Some(ColumnRatio::Thirds),
            4 => Some(ColumnRatio::Quarters),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ColumnRatio {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown column ratio: {}", value))
    }
}

impl From<ColumnRatio> for String {
    fn from(ratio: ColumnRatio) -> Self {
        ratio.as_str().to_string()
    }
}

/// Width table for a ratio string; unmapped ratios render as a single full-width column
pub fn get_column_widths(ratio: &str) -> Vec<String> {
    match ColumnRatio::parse(ratio) {
        Some(ratio) => ratio.widths().iter().map(|w| w.to_string()).collect(),
        None => vec!["100%".to_string()],
    }
}
