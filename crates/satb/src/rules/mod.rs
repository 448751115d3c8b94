//! Rule checkers for four-part writing.
//!
//! Each rule is a stateless [`Checker`] that reads a [`Piece`] and appends
//! findings to a [`Report`]. A [`RuleSet`] picks which ones run; they always
//! run in [`Rule::ALL`] order no matter how they were named.

mod chords;
mod context;
mod distances;
mod leaps;
mod parallels;
mod range;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::piece::Piece;
use crate::report::Report;

pub use chords::ChordsChecker;
pub use context::ChordsInContextChecker;
pub use distances::DistancesChecker;
pub use leaps::LeapsChecker;
pub use parallels::ParallelsChecker;
pub use range::RangeChecker;

/// One named rule. Variant order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rule {
    Range,
    Leaps,
    Distances,
    Parallels,
    Chords,
    ChordsInContext,
}

impl Rule {
    pub const ALL: [Rule; 6] = [
        Rule::Range,
        Rule::Leaps,
        Rule::Distances,
        Rule::Parallels,
        Rule::Chords,
        Rule::ChordsInContext,
    ];

    /// Canonical rule name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Range => "RANGE",
            Rule::Leaps => "LEAPS",
            Rule::Distances => "DISTANCES",
            Rule::Parallels => "PARALELS",
            Rule::Chords => "CHORDS",
            Rule::ChordsInContext => "CHORDS_IN_CTX",
        }
    }

    pub fn checker(&self) -> &'static dyn Checker {
        match self {
            Rule::Range => &RangeChecker,
            Rule::Leaps => &LeapsChecker,
            Rule::Distances => &DistancesChecker,
            Rule::Parallels => &ParallelsChecker,
            Rule::Chords => &ChordsChecker,
            Rule::ChordsInContext => &ChordsInContextChecker,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    /// Case-insensitive. `PARALLELS` and `CHORDS_IN_CONTEXT` are accepted
    /// alongside the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RANGE" => Ok(Rule::Range),
            "LEAPS" => Ok(Rule::Leaps),
            "DISTANCES" => Ok(Rule::Distances),
            "PARALELS" | "PARALLELS" => Ok(Rule::Parallels),
            "CHORDS" => Ok(Rule::Chords),
            "CHORDS_IN_CTX" | "CHORDS_IN_CONTEXT" => Ok(Rule::ChordsInContext),
            _ => Err(RuleError::Unknown(s.to_string())),
        }
    }
}

/// A single rule over a whole piece.
pub trait Checker: Send + Sync {
    fn rule(&self) -> Rule;

    /// Append this rule's findings to `report`. Never fails.
    fn check(&self, piece: &Piece, report: &mut Report);
}

/// The rules selected for one check run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: BTreeSet<Rule>,
}

impl RuleSet {
    pub fn empty() -> Self {
        RuleSet::default()
    }

    pub fn all() -> Self {
        RuleSet {
            rules: Rule::ALL.into_iter().collect(),
        }
    }

    /// Build from rule names; `ALL` (any case) selects every rule.
    pub fn parse<I, S>(names: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = RuleSet::empty();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if name.eq_ignore_ascii_case("ALL") {
                set.rules.extend(Rule::ALL);
            } else {
                set.insert(name.parse()?);
            }
        }
        Ok(set)
    }

    pub fn insert(&mut self, rule: Rule) {
        self.rules.insert(rule);
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Selected rules in execution order.
    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().copied()
    }

    pub fn checkers(&self) -> impl Iterator<Item = &'static dyn Checker> + '_ {
        self.iter().map(|rule| rule.checker())
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        RuleSet {
            rules: iter.into_iter().collect(),
        }
    }
}

impl FromStr for RuleSet {
    type Err = RuleError;

    /// Comma or whitespace separated names, e.g. `"range, leaps"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleSet::parse(s.split(|c: char| c == ',' || c.is_whitespace()))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|rule| rule.name()).collect();
        f.write_str(&names.join(","))
    }
}
