//! Discipline inference from phase names.
//!
//! The rules form an ordered table; the first rule whose pattern matches the
//! phase name wins and anything unmatched is `Algemeen`. Post-production
//! sits above production because its names contain "productie".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Discipline label stored on a time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    Conceptontwikkeling,
    Strategie,
    Postproductie,
    Productie,
    Meeting,
    Algemeen,
}

impl Discipline {
    /// The label written to `TimeBlock::category`.
    pub fn label(&self) -> &'static str {
        match self {
            Discipline::Conceptontwikkeling => "Conceptontwikkeling",
            Discipline::Strategie => "Strategie",
            Discipline::Postproductie => "Postproductie",
            Discipline::Productie => "Productie",
            Discipline::Meeting => "Meeting",
            Discipline::Algemeen => "Algemeen",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the inference table.
#[derive(Debug)]
pub struct DisciplineRule {
    /// Discipline assigned when the pattern matches.
    pub discipline: Discipline,
    pattern: Regex,
}

impl DisciplineRule {
    /// Creates a rule from a regex pattern.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex; rules are compile-time constants.
    pub fn new(pattern: &str, discipline: Discipline) -> Self {
        Self {
            discipline,
            pattern: Regex::new(pattern).expect("Invalid discipline pattern"),
        }
    }

    /// Returns true if the rule applies to `phase_name`.
    pub fn matches(&self, phase_name: &str) -> bool {
        self.pattern.is_match(phase_name)
    }
}

/// The inference table, evaluated top to bottom.
pub fn discipline_rules() -> &'static [DisciplineRule] {
    static RULES: OnceLock<Vec<DisciplineRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            DisciplineRule::new(r"(?i)concept", Discipline::Conceptontwikkeling),
            DisciplineRule::new(r"(?i)strateg", Discipline::Strategie),
            DisciplineRule::new(r"(?i)post-?productie|montage|\bedit", Discipline::Postproductie),
            DisciplineRule::new(r"(?i)product|shoot|opname", Discipline::Productie),
        ]
    })
}

/// Discipline for a phase name; `Algemeen` when no rule matches.
pub fn infer_discipline(phase_name: &str) -> Discipline {
    discipline_rules()
        .iter()
        .find(|rule| rule.matches(phase_name))
        .map(|rule| rule.discipline)
        .unwrap_or(Discipline::Algemeen)
}
