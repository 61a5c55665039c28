//! Health metrics
//!
//! Turns status counts into the three metric cards shown at the top of a
//! report. Items classified `Other` get no card but still count toward the
//! percentage denominator.

use serde::{Deserialize, Serialize};

use crate::normalize::StatusCounts;
use crate::StatusTone;

/// One metric card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Card title, e.g. `Green`
    pub label: String,
    /// Number of items with this tone
    pub value: usize,
    /// Rounded share of all items (0-100)
    pub percent: u32,
    /// Human-readable share, e.g. `50% on track`
    pub descriptor: String,
    pub tone: StatusTone,
}

impl Metric {
    fn new(tone: StatusTone, value: usize, total: usize, caption: &str) -> Self {
        let percent = percentage(value, total);
        Self {
            label: tone.label().to_string(),
            value,
            percent,
            descriptor: format!("{}% {}", percent, caption),
            tone,
        }
    }
}

/// Metric cards with named access per tone
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Number of items the percentages are based on
    pub total: usize,
    pub green: Metric,
    pub yellow: Metric,
    pub red: Metric,
}

impl Metrics {
    /// Cards in display order: Green, Yellow, Red
    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        [&self.green, &self.yellow, &self.red].into_iter()
    }

    /// Items classified Green
    pub fn on_track(&self) -> usize {
        self.green.value
    }

    /// Items classified Red
    pub fn critical(&self) -> usize {
        self.red.value
    }
}

/// Build metric cards from status counts over `total_items` items
pub fn aggregate(counts: &StatusCounts, total_items: usize) -> Metrics {
    Metrics {
        total: total_items,
        green: Metric::new(StatusTone::Green, counts.green, total_items, "on track"),
        yellow: Metric::new(StatusTone::Yellow, counts.yellow, total_items, "watch list"),
        red: Metric::new(StatusTone::Red, counts.red, total_items, "critical"),
    }
}

/// `round(count / max(total, 1) * 100)`, half rounding up
pub fn percentage(count: usize, total: usize) -> u32 {
    let total = total.max(1);
    (count as f64 / total as f64 * 100.0).round() as u32
}
