//! FOIL Rule Induction Engine
//!
//! Learns single-variable Horn rules such as `Fly(X) :- Bird(X)` from positive
//! and negative ground examples. Rules are built by sequential covering: each
//! rule starts with an empty body and greedily gains the body literal with the
//! highest FOIL information gain until it excludes every negative example, or
//! until no literal improves it any further.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{InductionConfig, ReasonerConfig};
use crate::error::{Error, Result};

/// A unary ground atom `predicate(constant)`, used for examples and background facts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroundFact {
    /// The predicate name, e.g. `Bird`.
    pub predicate: String,
    /// The constant it applies to, e.g. `tweety`.
    pub constant: String,
}

impl GroundFact {
    /// Creates a ground fact.
    pub fn new(predicate: impl Into<String>, constant: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            constant: constant.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.predicate.trim().is_empty() || self.constant.trim().is_empty() {
            return Err(Error::InvalidExample(format!(
                "empty predicate or constant in {}",
                self
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GroundFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.predicate, self.constant)
    }
}

/// A body literal `predicate(variable)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyLiteral {
    /// The background predicate tested.
    pub predicate: String,
    /// The rule variable it is applied to.
    pub variable: String,
}

impl fmt::Display for BodyLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.predicate, self.variable)
    }
}

/// A learned rule `head(X) :- b1(X), b2(X), ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedRule {
    /// The target predicate.
    pub head: String,
    /// The variable shared by the head and every body literal.
    pub variable: String,
    /// Body literals in the order they were selected.
    pub body: Vec<BodyLiteral>,
}

impl LearnedRule {
    /// Returns `true` if `constant` satisfies every body literal against `background`.
    pub fn covers(&self, constant: &str, background: &HashSet<GroundFact>) -> bool {
        self.body
            .iter()
            .all(|lit| background.contains(&GroundFact::new(lit.predicate.as_str(), constant)))
    }

    /// Counts the examples of the head predicate that this rule covers.
    pub fn coverage(
        &self,
        pos: &[GroundFact],
        neg: &[GroundFact],
        background: &HashSet<GroundFact>,
    ) -> RuleCoverage {
        let count = |examples: &[GroundFact]| {
            examples
                .iter()
                .filter(|e| e.predicate == self.head && self.covers(&e.constant, background))
                .count()
        };
        RuleCoverage {
            positives: count(pos),
            negatives: count(neg),
        }
    }

    fn covers_indexed(&self, constant: &str, facts: &FactIndex<'_>) -> bool {
        self.body
            .iter()
            .all(|lit| facts.contains(&(lit.predicate.as_str(), constant)))
    }
}

impl fmt::Display for LearnedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) :- ", self.head, self.variable)?;
        if self.body.is_empty() {
            return write!(f, "true");
        }
        for (i, lit) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}

/// How many positive and negative examples a rule covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCoverage {
    /// Positive examples of the head the rule covers.
    pub positives: usize,
    /// Negative examples of the head the rule covers.
    pub negatives: usize,
}

impl RuleCoverage {
    /// Returns `true` if the rule covers no negative example.
    pub fn is_consistent(&self) -> bool {
        self.negatives == 0
    }
}

/// FOIL information gain of narrowing a rule from `(p, n)` to `(p1, n1)`
/// covered positives and negatives:
///
/// `p1 * (log2(p1 / (p1 + n1)) - log2(p / (p + n)))`
///
/// Zero when `p == 0` or `p1 == 0`, where the logarithms are undefined.
pub fn foil_gain(p: usize, n: usize, p1: usize, n1: usize) -> f64 {
    if p == 0 || p1 == 0 {
        return 0.0;
    }
    let (p, n, p1, n1) = (p as f64, n as f64, p1 as f64, n1 as f64);
    p1 * ((p1 / (p1 + n1)).log2() - (p / (p + n)).log2())
}

type FactIndex<'a> = HashSet<(&'a str, &'a str)>;

/// A candidate body literal and the examples that would stay covered.
struct Candidate<'a> {
    predicate: &'a str,
    gain: f64,
    positives: Vec<&'a GroundFact>,
    negatives: Vec<&'a GroundFact>,
}

/// Sequential-covering FOIL learner.
#[derive(Debug, Clone, Default)]
pub struct FoilLearner {
    config: InductionConfig,
    strict: bool,
}

impl FoilLearner {
    /// Creates a learner using variable `X` and the default rule limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a learner with specific settings, validated when `learn` runs.
    pub fn with_config(config: InductionConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Creates a learner from the induction section of a `ReasonerConfig`.
    pub fn from_reasoner_config(config: &ReasonerConfig) -> Self {
        Self {
            config: config.induction.clone(),
            strict: config.strict,
        }
    }

    /// Enables or disables eager validation of examples and background facts.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Returns the learner's settings.
    pub fn config(&self) -> &InductionConfig {
        &self.config
    }

    /// Learns rules that together cover every positive example.
    ///
    /// Candidate predicates are tried in the iteration order of `predicates`,
    /// and a later candidate replaces the current best only on strictly greater
    /// gain. When no candidate has positive gain the rule is accepted as it is,
    /// even if it still covers negatives.
    pub fn learn(
        &self,
        pos: &[GroundFact],
        neg: &[GroundFact],
        background: &HashSet<GroundFact>,
        predicates: &IndexSet<String>,
    ) -> Result<Vec<LearnedRule>> {
        self.config.validate()?;
        if self.strict {
            pos.iter()
                .chain(neg)
                .chain(background)
                .try_for_each(GroundFact::validate)?;
        }

        let facts: FactIndex<'_> = background
            .iter()
            .map(|f| (f.predicate.as_str(), f.constant.as_str()))
            .collect();

        let mut rules = Vec::new();
        let mut remaining: Vec<&GroundFact> = pos.iter().collect();

        while let Some(first) = remaining.first() {
            if rules.len() >= self.config.max_rules {
                return Err(Error::RuleLimitExceeded {
                    limit: self.config.max_rules,
                });
            }

            let head = first.predicate.clone();
            let rule = self.learn_rule(&head, &remaining, neg, &facts, predicates);
            debug!("Learned rule {}", rule);

            remaining
                .retain(|e| !(e.predicate == head && rule.covers_indexed(&e.constant, &facts)));
            rules.push(rule);
        }

        debug!("Learned {} rule(s) from {} positive example(s)", rules.len(), pos.len());
        Ok(rules)
    }

    /// Grows the body of a single rule for `head`.
    fn learn_rule<'a>(
        &self,
        head: &str,
        remaining: &[&'a GroundFact],
        neg: &'a [GroundFact],
        facts: &FactIndex<'_>,
        predicates: &'a IndexSet<String>,
    ) -> LearnedRule {
        let mut body: Vec<BodyLiteral> = Vec::new();
        let mut pos_cover: Vec<&GroundFact> = remaining
            .iter()
            .copied()
            .filter(|e| e.predicate == head)
            .collect();
        let mut neg_cover: Vec<&GroundFact> = neg.iter().filter(|e| e.predicate == head).collect();

        while !neg_cover.is_empty() {
            let (p, n) = (pos_cover.len(), neg_cover.len());
            let mut best: Option<Candidate<'_>> = None;

            for pred in predicates {
                if body.iter().any(|lit| &lit.predicate == pred) {
                    continue;
                }
                let keeps = |e: &&GroundFact| facts.contains(&(pred.as_str(), e.constant.as_str()));
                let positives: Vec<_> = pos_cover.iter().copied().filter(keeps).collect();
                let negatives: Vec<_> = neg_cover.iter().copied().filter(keeps).collect();
                let gain = foil_gain(p, n, positives.len(), negatives.len());
                trace!(
                    "{}({}) candidate {}: p1={} n1={} gain={:.4}",
                    head,
                    self.config.variable,
                    pred,
                    positives.len(),
                    negatives.len(),
                    gain
                );

                let best_gain = best.as_ref().map_or(0.0, |c| c.gain);
                if gain > best_gain {
                    best = Some(Candidate {
                        predicate: pred,
                        gain,
                        positives,
                        negatives,
                    });
                }
            }

            let Some(chosen) = best else {
                debug!(
                    "No literal improves {}({}); accepting rule covering {} negative(s)",
                    head,
                    self.config.variable,
                    neg_cover.len()
                );
                break;
            };

            body.push(BodyLiteral {
                predicate: chosen.predicate.to_string(),
                variable: self.config.variable.clone(),
            });
            pos_cover = chosen.positives;
            neg_cover = chosen.negatives;
        }

        LearnedRule {
            head: head.to_string(),
            variable: self.config.variable.clone(),
            body,
        }
    }
}

/// Learns rules with a default-configured learner.
pub fn learn_rules(
    pos: &[GroundFact],
    neg: &[GroundFact],
    background: &HashSet<GroundFact>,
    predicates: &IndexSet<String>,
) -> Result<Vec<LearnedRule>> {
    FoilLearner::new().learn(pos, neg, background, predicates)
}
