//! Narrative composition
//!
//! Builds the single-paragraph summary from metrics, blockers and deltas,
//! framed by an opening and closing phrase chosen by the report tone.
//!
//! ```text
//! Executive summary: 2/4 initiatives on track, 1 critical. 1 blocker needs
//! attention. Minimal movement week-over-week. Emphasis: budget. Focus
//! decisions on red items and unblock owners before next checkpoint.
//! ```

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;
use crate::{BlockerEntry, DeltaEntry};

/// Number of deltas named in the narrative
pub const NARRATIVE_DELTAS: usize = 3;

/// Narrative style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Default,
    Executive,
    Team,
    Detailed,
    /// Opening taken from caller-supplied text
    Custom,
}

impl Tone {
    /// Parse a tone key. Unknown keys select `Default`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "executive" => Tone::Executive,
            "team" => Tone::Team,
            "detailed" => Tone::Detailed,
            "custom" => Tone::Custom,
            _ => Tone::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Default => "default",
            Tone::Executive => "executive",
            Tone::Team => "team",
            Tone::Detailed => "detailed",
            Tone::Custom => "custom",
        }
    }

    /// Label recorded on the report; custom tones use the override text.
    /// Unknown keys were already resolved to `Default`, so they label as `"default"`.
    pub fn label(&self, custom_tone: &str) -> String {
        match self {
            Tone::Custom if custom_tone.is_empty() => "Custom".to_string(),
            Tone::Custom => custom_tone.to_string(),
            other => other.as_str().to_string(),
        }
    }

    /// Opening and closing phrases for this tone
    pub fn config(&self, custom_tone: &str) -> ToneConfig {
        match self {
            Tone::Default => ToneConfig::new("Summary:", ""),
            Tone::Executive => ToneConfig::new(
                "Executive summary:",
                "Focus decisions on red items and unblock owners before next checkpoint.",
            ),
            Tone::Team => ToneConfig::new(
                "Team sync recap:",
                "Let's align on owners and next steps to sustain momentum.",
            ),
            Tone::Detailed => ToneConfig::new(
                "Detailed update:",
                "See notes below for supporting context and follow-ups.",
            ),
            Tone::Custom => {
                let heading = if custom_tone.is_empty() {
                    "Custom summary"
                } else {
                    custom_tone
                };
                ToneConfig::new(format!("{}:", heading), "Tailored narrative complete.")
            }
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tone::from_key(s))
    }
}

/// Tone-specific framing of the narrative
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneConfig {
    pub opening: String,
    pub closing: String,
}

impl ToneConfig {
    pub fn new(opening: impl Into<String>, closing: impl Into<String>) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
        }
    }
}

/// Compose the narrative paragraph.
///
/// Clauses are joined by single spaces; empty ones (no emphasis, the
/// default tone's closing) are left out.
pub fn compose(
    metrics: &Metrics,
    blockers: &[BlockerEntry],
    deltas: &[DeltaEntry],
    tone: Tone,
    custom_tone: &str,
    emphasis: &str,
) -> String {
    let config = tone.config(custom_tone);

    let headline = format!(
        "{}/{} initiatives on track, {} critical.",
        metrics.on_track(),
        metrics.total,
        metrics.critical()
    );

    let emphasis = if emphasis.is_empty() {
        String::new()
    } else {
        format!("Emphasis: {}.", emphasis)
    };

    let clauses = [
        config.opening,
        headline,
        blocker_summary(blockers),
        delta_summary(deltas),
        emphasis,
        config.closing,
    ];

    clauses
        .iter()
        .map(|clause| clause.trim())
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn blocker_summary(blockers: &[BlockerEntry]) -> String {
    match blockers.len() {
        0 => "No active blockers reported.".to_string(),
        1 => "1 blocker needs attention.".to_string(),
        n => format!("{} blockers need attention.", n),
    }
}

fn delta_summary(deltas: &[DeltaEntry]) -> String {
    if deltas.is_empty() {
        return "Minimal movement week-over-week.".to_string();
    }
    let movements: Vec<String> = deltas
        .iter()
        .take(NARRATIVE_DELTAS)
        .map(|delta| format!("{} ({})", delta.name, delta.text))
        .collect();
    format!("Key movements: {}.", movements.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate;
    use crate::normalize::StatusCounts;
    use pretty_assertions::assert_eq;

    fn metrics(green: usize, red: usize, total: usize) -> Metrics {
        let counts = StatusCounts {
            green,
            yellow: 0,
            red,
            other: total - green - red,
        };
        aggregate(&counts, total)
    }

    fn blocker(name: &str) -> BlockerEntry {
        BlockerEntry {
            name: name.into(),
            text: "stuck".into(),
            owner: None,
        }
    }

    fn delta(name: &str, text: &str) -> DeltaEntry {
        DeltaEntry {
            name: name.into(),
            text: text.into(),
            owner: None,
        }
    }

    #[test]
    fn default_tone_has_no_closing() {
        let text = compose(&metrics(1, 0, 1), &[], &[], Tone::Default, "", "");
        assert_eq!(
            text,
            "Summary: 1/1 initiatives on track, 0 critical. No active blockers reported. \
             Minimal movement week-over-week."
        );
    }

    #[test]
    fn blocker_pluralization() {
        let one = compose(&metrics(0, 0, 0), &[blocker("a")], &[], Tone::Team, "", "");
        assert!(one.contains("1 blocker needs attention."), "{}", one);

        let two = compose(
            &metrics(0, 0, 0),
            &[blocker("a"), blocker("b")],
            &[],
            Tone::Team,
            "",
            "",
        );
        assert!(two.contains("2 blockers need attention."), "{}", two);
    }

    #[test]
    fn key_movements_name_first_three_deltas() {
        let deltas = [
            delta("Alpha", "+3"),
            delta("Beta", "shipped"),
            delta("Gamma", "-2"),
            delta("Delta", "slipped"),
        ];
        let text = compose(&metrics(0, 0, 4), &[], &deltas, Tone::Detailed, "", "");
        assert!(text.contains("Key movements: Alpha (+3); Beta (shipped); Gamma (-2)."));
        assert!(!text.contains("Delta (slipped)"));
        assert!(text.ends_with("See notes below for supporting context and follow-ups."));
    }

    #[test]
    fn missing_emphasis_leaves_no_double_space() {
        let text = compose(&metrics(2, 1, 4), &[], &[], Tone::Executive, "", "");
        assert!(!text.contains("  "), "{}", text);
        assert!(text.contains("week-over-week. Focus decisions"));
    }

    #[test]
    fn custom_tone_opening() {
        let text = compose(&metrics(0, 0, 0), &[], &[], Tone::Custom, "Board brief", "hiring");
        assert!(text.starts_with("Board brief: 0/0 initiatives on track"));
        assert!(text.ends_with("Emphasis: hiring. Tailored narrative complete."));

        let fallback = compose(&metrics(0, 0, 0), &[], &[], Tone::Custom, "", "");
        assert!(fallback.starts_with("Custom summary: "));
    }

    #[test]
    fn tone_keys_and_labels() {
        assert_eq!(Tone::from_key("Executive"), Tone::Executive);
        assert_eq!(Tone::from_key("team"), Tone::Team);
        assert_eq!(Tone::from_key("whimsical"), Tone::Default);
        assert_eq!(Tone::from_key(""), Tone::Default);
        assert_eq!("custom".parse::<Tone>(), Ok(Tone::Custom));

        assert_eq!(Tone::Custom.label(""), "Custom");
        assert_eq!(Tone::Custom.label("Board brief"), "Board brief");
        assert_eq!(Tone::Detailed.label("ignored"), "detailed");
        assert_eq!(Tone::from_key("whimsical").label(""), "default");
    }
}
