//! Choropleth intensity banding shared by map fill, tooltip, and legend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Ordered intensity bands. Lower bounds are inclusive; everything above 100
/// is Very High. Classification is the single source of truth for fill
/// color, tooltip label, and legend, so the three can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
pub enum IntensityBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl IntensityBand {
    pub const ALL: [IntensityBand; 5] = [
        IntensityBand::VeryLow,
        IntensityBand::Low,
        IntensityBand::Medium,
        IntensityBand::High,
        IntensityBand::VeryHigh,
    ];

    /// Band for a non-negative intensity value.
    pub fn for_value(value: i64) -> Self {
        if value > 100 {
            IntensityBand::VeryHigh
        } else if value > 70 {
            IntensityBand::High
        } else if value > 50 {
            IntensityBand::Medium
        } else if value > 20 {
            IntensityBand::Low
        } else {
            IntensityBand::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntensityBand::VeryLow => "Very Low",
            IntensityBand::Low => "Low",
            IntensityBand::Medium => "Medium",
            IntensityBand::High => "High",
            IntensityBand::VeryHigh => "Very High",
        }
    }

    /// Green ramp used by the map fill.
    pub fn fill_color(&self) -> &'static str {
        match self {
            IntensityBand::VeryLow => "#d9f99d",
            IntensityBand::Low => "#bef264",
            IntensityBand::Medium => "#84cc16",
            IntensityBand::High => "#65a30d",
            IntensityBand::VeryHigh => "#4d7c0f",
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            IntensityBand::VeryLow => "0-20",
            IntensityBand::Low => "21-50",
            IntensityBand::Medium => "51-70",
            IntensityBand::High => "71-100",
            IntensityBand::VeryHigh => "100+",
        }
    }
}

/// One row of the static map legend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LegendEntry {
    pub band: IntensityBand,
    pub label: String,
    pub range: String,
    pub color: String,
}

/// The five bands in ascending order, ready for the frontend legend.
pub fn legend() -> Vec<LegendEntry> {
    IntensityBand::ALL
        .iter()
        .map(|band| LegendEntry {
            band: *band,
            label: band.label().to_string(),
            range: band.range_label().to_string(),
            color: band.fill_color().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_fall_in_expected_bands() {
        let cases = [
            (0, IntensityBand::VeryLow),
            (20, IntensityBand::VeryLow),
            (21, IntensityBand::Low),
            (50, IntensityBand::Low),
            (51, IntensityBand::Medium),
            (70, IntensityBand::Medium),
            (71, IntensityBand::High),
            (100, IntensityBand::High),
            (101, IntensityBand::VeryHigh),
        ];
        for (value, expected) in cases {
            assert_eq!(IntensityBand::for_value(value), expected, "value {value}");
        }
    }

    #[test]
    fn label_and_color_come_from_the_same_band() {
        // One classification feeds both label and color, so a boundary tweak
        // cannot split them.
        for value in [0, 20, 21, 50, 51, 70, 71, 100, 101, 5000] {
            let band = IntensityBand::for_value(value);
            assert_eq!(band.label(), IntensityBand::for_value(value).label());
            assert_eq!(band.fill_color(), IntensityBand::for_value(value).fill_color());
        }
    }

    #[test]
    fn legend_is_ascending_and_distinct() {
        let legend = legend();
        assert_eq!(legend.len(), 5);
        assert_eq!(legend[0].label, "Very Low");
        assert_eq!(legend[4].label, "Very High");

        let mut colors: Vec<_> = legend.iter().map(|e| e.color.clone()).collect();
        colors.dedup();
        assert_eq!(colors.len(), 5);
    }
}
