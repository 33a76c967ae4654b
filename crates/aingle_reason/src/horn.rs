//! Definite (Horn) clauses and Horn knowledge bases.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::literal::validate_atom;

/// A definite clause `head :- body1, body2, ...`. An empty body makes it a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HornClause {
    /// The atom this clause concludes.
    pub head: String,
    /// Atoms that must all hold for `head` to hold.
    pub body: Vec<String>,
}

impl HornClause {
    /// Creates a rule with the given head and body atoms.
    pub fn rule<I, S>(head: impl Into<String>, body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            head: head.into(),
            body: body.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an unconditional fact.
    pub fn fact(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            body: Vec::new(),
        }
    }

    /// Returns `true` if the clause has no body.
    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }

    /// Checks the head and every body atom.
    pub fn validate(&self) -> Result<()> {
        validate_atom(&self.head)?;
        self.body.iter().try_for_each(|atom| validate_atom(atom))
    }
}

impl fmt::Display for HornClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fact() {
            write!(f, "{}.", self.head)
        } else {
            write!(f, "{} :- {}.", self.head, self.body.join(", "))
        }
    }
}

/// An ordered collection of Horn clauses.
///
/// Order carries no logical meaning but fixes the order in which explanations
/// are enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HornKnowledgeBase {
    clauses: Vec<HornClause>,
}

impl HornKnowledgeBase {
    /// Creates an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause.
    pub fn add(&mut self, clause: HornClause) {
        self.clauses.push(clause);
    }

    /// Iterates the clauses whose head is `goal`, in knowledge-base order.
    pub fn clauses_for<'a>(&'a self, goal: &'a str) -> impl Iterator<Item = &'a HornClause> {
        self.clauses.iter().filter(move |c| c.head == goal)
    }

    /// Iterates every clause.
    pub fn iter(&self) -> impl Iterator<Item = &HornClause> {
        self.clauses.iter()
    }

    /// Returns the set of atoms mentioned as a head or in a body.
    pub fn atoms(&self) -> BTreeSet<&str> {
        self.clauses
            .iter()
            .flat_map(|c| std::iter::once(&c.head).chain(c.body.iter()))
            .map(String::as_str)
            .collect()
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Checks every clause.
    pub fn validate(&self) -> Result<()> {
        self.iter().try_for_each(HornClause::validate)
    }
}

impl FromIterator<HornClause> for HornKnowledgeBase {
    fn from_iter<I: IntoIterator<Item = HornClause>>(iter: I) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<HornClause>> for HornKnowledgeBase {
    fn from(clauses: Vec<HornClause>) -> Self {
        Self { clauses }
    }
}
