//! Fixed data substituted when a suggestion source fails.

use once_cell::sync::Lazy;

use crate::domain::decision::{CriterionSuggestion, DescriptionKind, OptionSuggestion};
use crate::domain::foundation::Weight;

/// Default criteria: Coût (3) and Qualité (4).
pub static FALLBACK_CRITERIA: Lazy<Vec<CriterionSuggestion>> = Lazy::new(|| {
    vec![
        CriterionSuggestion::new("Coût", Weight::clamped(3)),
        CriterionSuggestion::new("Qualité", Weight::clamped(4)),
    ]
});

/// Four placeholder options.
pub static FALLBACK_OPTIONS: Lazy<Vec<OptionSuggestion>> = Lazy::new(|| {
    vec![
        OptionSuggestion::new("Option A", "Première possibilité à évaluer."),
        OptionSuggestion::new("Option B", "Deuxième possibilité à évaluer."),
        OptionSuggestion::new("Option C", "Troisième possibilité à évaluer."),
        OptionSuggestion::new("Option D", "Quatrième possibilité à évaluer."),
    ]
});

/// Templated description embedding the title.
pub fn fallback_description(title: &str, kind: DescriptionKind) -> String {
    match kind {
        DescriptionKind::Option => {
            format!("{} : une option à considérer pour cette décision.", title)
        }
        DescriptionKind::Criterion => {
            format!("{} : un critère à prendre en compte pour cette décision.", title)
        }
    }
}
