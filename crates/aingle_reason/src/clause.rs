//! Clauses, clausal knowledge bases and binary resolution.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::literal::Literal;

/// A disjunction of literals. The empty clause denotes contradiction.
///
/// Literals are kept in a `BTreeSet`, so two clauses with the same literals
/// compare, hash and display identically regardless of construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    /// Creates the empty clause.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a single-literal clause.
    pub fn unit(literal: Literal) -> Self {
        Self::from_literals([literal])
    }

    /// Creates a clause from any collection of literals; duplicates collapse.
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// Returns the literals in canonical order.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Returns `true` if the clause contains `literal`.
    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` for the empty clause.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns `true` for a single-literal clause.
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Returns `true` if the clause contains some literal and its complement.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|l| l.is_positive() && self.literals.contains(&l.negate()))
    }

    /// Checks every atom name in the clause.
    pub fn validate(&self) -> Result<()> {
        self.literals.iter().try_for_each(Literal::validate)
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self::from_literals(iter)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, "}}")
    }
}

/// Computes every binary resolvent of `ci` and `cj`.
///
/// For each literal `l` in `ci` whose complement is in `cj`, the resolvent
/// `(ci ∪ cj) \ {l, ¬l}` is produced. Each complementary pair yields its own
/// resolvent and no deduplication happens here. An empty resolvent signals a
/// contradiction.
pub fn resolve(ci: &Clause, cj: &Clause) -> Vec<Clause> {
    let mut resolvents = Vec::new();
    for lit in &ci.literals {
        let complement = lit.negate();
        if cj.literals.contains(&complement) {
            let literals = ci
                .literals
                .iter()
                .chain(cj.literals.iter())
                .filter(|l| *l != lit && **l != complement)
                .cloned()
                .collect();
            resolvents.push(Clause { literals });
        }
    }
    resolvents
}

/// A conjunction of clauses, unique by content.
///
/// Insertion order is kept so that iteration, and therefore logging and
/// proof search, is reproducible across runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    clauses: IndexSet<Clause>,
}

impl KnowledgeBase {
    /// Creates an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause. Returns `false` if an equal clause was already present.
    pub fn add(&mut self, clause: Clause) -> bool {
        self.clauses.insert(clause)
    }

    /// Returns `true` if an equal clause is present.
    pub fn contains(&self, clause: &Clause) -> bool {
        self.clauses.contains(clause)
    }

    /// Iterates the clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of distinct clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the set of atom names mentioned anywhere in the knowledge base.
    pub fn atoms(&self) -> BTreeSet<&str> {
        self.clauses
            .iter()
            .flat_map(|c| c.literals().map(|l| l.atom.as_str()))
            .collect()
    }

    /// Checks every clause.
    pub fn validate(&self) -> Result<()> {
        self.clauses.iter().try_for_each(Clause::validate)
    }
}

impl FromIterator<Clause> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl Extend<Clause> for KnowledgeBase {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        self.clauses.extend(iter);
    }
}
