//! Enumeration types for the Trophic solver.

use serde::{Deserialize, Serialize};

use crate::ids::SpeciesName;

// ---------------------------------------------------------------------------
// Species kinds
// ---------------------------------------------------------------------------

/// The trophic role of a species.
///
/// Producers are implicit members of every candidate and only ever provide
/// calories. Consumers are the species enumerated into candidates; they draw
/// calories from their food sources and may also provide calories to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpeciesKind {
    /// A primary producer (plants, algae).
    Producer,
    /// A species that must eat to survive.
    Consumer,
}

impl SpeciesKind {
    /// Recognize a kind label as it appears in input rows.
    ///
    /// Surrounding whitespace is ignored. `Animal` is accepted as an alias
    /// of [`SpeciesKind::Consumer`]. Any other label returns `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Producer" => Some(Self::Producer),
            "Consumer" | "Animal" => Some(Self::Consumer),
            _ => None,
        }
    }

    /// The canonical label for this kind.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Producer => "Producer",
            Self::Consumer => "Consumer",
        }
    }
}

impl core::fmt::Display for SpeciesKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Simulation verdicts
// ---------------------------------------------------------------------------

/// The classification of one candidate by the consumption simulator.
///
/// Unsustainable verdicts are ordinary results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "species", rename_all = "snake_case")]
pub enum Verdict {
    /// Every selected consumer was fed and no resource was exhausted.
    Sustainable,
    /// The named consumer ran out of food sources with need remaining.
    UnmetNeed(SpeciesName),
    /// The named resource was drawn down to exactly zero.
    ResourceDepleted(SpeciesName),
}

impl Verdict {
    /// Whether this verdict classifies the candidate as sustainable.
    pub const fn is_sustainable(&self) -> bool {
        matches!(self, Self::Sustainable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels() {
        assert_eq!(SpeciesKind::from_label("Producer"), Some(SpeciesKind::Producer));
        assert_eq!(SpeciesKind::from_label(" Consumer "), Some(SpeciesKind::Consumer));
        assert_eq!(SpeciesKind::from_label("Animal"), Some(SpeciesKind::Consumer));
        assert_eq!(SpeciesKind::from_label("producer"), None);
        assert_eq!(SpeciesKind::from_label("Fungus"), None);
        assert_eq!(SpeciesKind::Consumer.to_string(), "Consumer");
    }

    #[test]
    fn verdict_serializes_tagged() {
        let verdict = Verdict::ResourceDepleted(SpeciesName::from("P1"));
        let json = serde_json::to_string(&verdict).ok();
        assert_eq!(
            json.as_deref(),
            Some(r#"{"verdict":"resource_depleted","species":"P1"}"#)
        );
        assert!(!verdict.is_sustainable());
        assert!(Verdict::Sustainable.is_sustainable());
    }
}
