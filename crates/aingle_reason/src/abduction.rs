//! Horn Abduction Engine
//!
//! Explains an observed goal atom by backward chaining through a Horn
//! knowledge base and collecting the abducible atoms that would have to be
//! assumed. Only inclusion-minimal explanations are returned, and an optional
//! cost map ranks them further.
//!
//! The minimality check compares every pair of candidates, which is quadratic
//! in the number of candidates produced for a goal.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use indexmap::IndexSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::{AbductionConfig, ReasonerConfig};
use crate::error::{Error, Result};
use crate::horn::HornKnowledgeBase;
use crate::literal::validate_atom;

/// Maps an abducible atom to the cost of assuming it. Atoms without an entry
/// cost `f64::INFINITY`.
pub type CostMap = HashMap<String, f64>;

/// A set of abducible atoms that, together with the knowledge base, derives a goal.
///
/// The empty explanation means the goal follows from the knowledge base alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Explanation {
    atoms: BTreeSet<String>,
}

impl Explanation {
    /// Creates the empty explanation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an explanation assuming a single atom.
    pub fn single(atom: impl Into<String>) -> Self {
        Self::from_atoms([atom.into()])
    }

    /// Creates an explanation from any collection of atoms.
    pub fn from_atoms<I, S>(atoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            atoms: atoms.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterates the assumed atoms in sorted order.
    pub fn atoms(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(String::as_str)
    }

    /// Returns `true` if `atom` is assumed.
    pub fn contains(&self, atom: &str) -> bool {
        self.atoms.contains(atom)
    }

    /// Number of assumed atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if nothing needs to be assumed.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns `true` if every atom of `self` is in `other` and `other` has more.
    pub fn is_strict_subset_of(&self, other: &Explanation) -> bool {
        self.atoms.len() < other.atoms.len() && self.atoms.is_subset(&other.atoms)
    }

    /// Returns the union of two explanations.
    pub fn union(&self, other: &Explanation) -> Explanation {
        Self {
            atoms: self.atoms.union(&other.atoms).cloned().collect(),
        }
    }

    /// Sums the cost of every assumed atom; unpriced atoms count as infinite.
    pub fn cost(&self, cost: &CostMap) -> f64 {
        self.atoms
            .iter()
            .map(|a| cost.get(a).copied().unwrap_or(f64::INFINITY))
            .sum()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, atom) in self.atoms.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", atom)?;
        }
        write!(f, "}}")
    }
}

/// An explanation together with its total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedExplanation {
    /// The assumed atoms.
    pub explanation: Explanation,
    /// Sum of the atoms' costs; infinite if any atom is unpriced.
    pub cost: f64,
}

/// Counters collected while answering one abduction query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbductionStats {
    /// Number of goal expansions, including recursive sub-goals.
    pub goals_expanded: usize,
    /// Number of branches cut because the goal was already being expanded.
    pub cycle_cuts: usize,
    /// Number of candidates discarded as strict supersets or duplicates.
    pub candidates_pruned: usize,
    /// Deepest recursion level reached.
    pub max_depth_reached: usize,
}

/// The explanations found for a goal, with the statistics of the search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbductionOutcome {
    /// The goal that was explained.
    pub goal: String,
    /// Inclusion-minimal explanations, in enumeration order.
    pub explanations: Vec<Explanation>,
    /// Search counters.
    pub stats: AbductionStats,
}

impl AbductionOutcome {
    /// Returns `true` if at least one explanation exists.
    pub fn is_explained(&self) -> bool {
        !self.explanations.is_empty()
    }
}

/// Backward-chaining abductive explainer for propositional Horn theories.
#[derive(Debug, Clone, Default)]
pub struct AbductionEngine {
    config: AbductionConfig,
    strict: bool,
}

impl AbductionEngine {
    /// Creates an engine with the default depth bound and no input validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with specific bounds. They are checked on every call,
    /// so unusable bounds surface as `Error::Config`.
    pub fn with_config(config: AbductionConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Creates an engine from the abduction section of a `ReasonerConfig`.
    pub fn from_reasoner_config(config: &ReasonerConfig) -> Self {
        Self {
            config: config.abduction.clone(),
            strict: config.strict,
        }
    }

    /// Enables or disables eager validation of goals, clauses, abducibles and costs.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Returns the engine's bounds.
    pub fn config(&self) -> &AbductionConfig {
        &self.config
    }

    /// Returns every inclusion-minimal explanation of `goal`.
    pub fn explain(
        &self,
        goal: &str,
        kb: &HornKnowledgeBase,
        abducibles: &HashSet<String>,
    ) -> Result<Vec<Explanation>> {
        self.run(goal, kb, abducibles).map(|o| o.explanations)
    }

    /// Explains `goal` and reports the search statistics alongside.
    pub fn run(
        &self,
        goal: &str,
        kb: &HornKnowledgeBase,
        abducibles: &HashSet<String>,
    ) -> Result<AbductionOutcome> {
        self.config.validate()?;
        if self.strict {
            validate_atom(goal)?;
            kb.validate()?;
            abducibles.iter().try_for_each(|a| validate_atom(a))?;
        }

        let mut stats = AbductionStats::default();
        let mut expanding = HashSet::new();
        let explanations = self.expand(goal, kb, abducibles, &mut expanding, 0, &mut stats)?;

        debug!(
            "Abduced {} explanation(s) for {} ({} goals expanded, {} cycle cuts)",
            explanations.len(),
            goal,
            stats.goals_expanded,
            stats.cycle_cuts
        );

        Ok(AbductionOutcome {
            goal: goal.to_string(),
            explanations,
            stats,
        })
    }

    /// Returns the minimal explanations of `goal` whose total cost is lowest.
    ///
    /// All explanations tied at the minimum are returned. Costs only filter the
    /// inclusion-minimal set; nothing is re-minimized afterwards.
    pub fn explain_min_cost(
        &self,
        goal: &str,
        kb: &HornKnowledgeBase,
        abducibles: &HashSet<String>,
        cost: &CostMap,
    ) -> Result<Vec<CostedExplanation>> {
        if self.strict {
            for (atom, &c) in cost {
                if c.is_nan() || c < 0.0 {
                    return Err(Error::InvalidCost {
                        atom: atom.clone(),
                        cost: c,
                    });
                }
            }
        }

        let scored: Vec<_> = self
            .explain(goal, kb, abducibles)?
            .into_iter()
            .map(|explanation| CostedExplanation {
                cost: explanation.cost(cost),
                explanation,
            })
            .collect();

        let min_cost = scored.iter().map(|s| s.cost).fold(f64::INFINITY, f64::min);
        Ok(scored.into_iter().filter(|s| s.cost == min_cost).collect())
    }

    /// Explains one goal along the current chain of expansions.
    ///
    /// `expanding` holds the goals on the path from the top-level call to this
    /// one; it is restored before returning so sibling branches never see it.
    /// A cycle is cut before the depth bound is consulted.
    fn expand(
        &self,
        goal: &str,
        kb: &HornKnowledgeBase,
        abducibles: &HashSet<String>,
        expanding: &mut HashSet<String>,
        depth: usize,
        stats: &mut AbductionStats,
    ) -> Result<Vec<Explanation>> {
        if expanding.contains(goal) {
            trace!("Cycle on {} at depth {}", goal, depth);
            stats.cycle_cuts += 1;
            return Ok(Vec::new());
        }
        // Leaves past the cap are fine; only further rule expansion is refused.
        if depth > self.config.max_depth && kb.clauses_for(goal).next().is_some() {
            return Err(Error::MaxDepthExceeded {
                depth: self.config.max_depth,
            });
        }

        stats.goals_expanded += 1;
        stats.max_depth_reached = stats.max_depth_reached.max(depth);
        expanding.insert(goal.to_string());

        let mut candidates = Vec::new();
        if abducibles.contains(goal) {
            candidates.push(Explanation::single(goal));
        }

        for clause in kb.clauses_for(goal) {
            let mut body_explanations = Vec::with_capacity(clause.body.len());
            for atom in &clause.body {
                let sub = self.expand(atom, kb, abducibles, expanding, depth + 1, stats)?;
                if sub.is_empty() {
                    trace!("{} cannot fire: {} is unexplained", clause, atom);
                    body_explanations.clear();
                    break;
                }
                body_explanations.push(sub);
            }
            if body_explanations.len() == clause.body.len() {
                candidates.extend(product(&body_explanations));
            }
        }

        expanding.remove(goal);

        let before = candidates.len();
        let minimal = minimize(candidates);
        stats.candidates_pruned += before - minimal.len();
        Ok(minimal)
    }
}

/// Unions one explanation from each list, for every combination.
///
/// An empty slice yields a single empty explanation, which is how facts
/// explain their head without assumptions.
fn product(lists: &[Vec<Explanation>]) -> Vec<Explanation> {
    let mut combos = vec![Explanation::empty()];
    for options in lists {
        let mut next = Vec::with_capacity(combos.len() * options.len());
        for partial in &combos {
            for option in options {
                next.push(partial.union(option));
            }
        }
        combos = next;
    }
    combos
}

/// Drops every candidate that strictly contains another, then duplicates.
fn minimize(candidates: Vec<Explanation>) -> Vec<Explanation> {
    let minimal: IndexSet<Explanation> = candidates
        .iter()
        .filter(|e| !candidates.iter().any(|other| other.is_strict_subset_of(e)))
        .cloned()
        .collect();
    minimal.into_iter().collect()
}

/// Returns every inclusion-minimal explanation of `goal`, using a
/// default-configured engine.
pub fn abduce(
    goal: &str,
    kb: &HornKnowledgeBase,
    abducibles: &HashSet<String>,
) -> Result<Vec<Explanation>> {
    AbductionEngine::new().explain(goal, kb, abducibles)
}

/// Returns the cheapest inclusion-minimal explanations of `goal`, using a
/// default-configured engine.
pub fn abduce_min_cost(
    goal: &str,
    kb: &HornKnowledgeBase,
    abducibles: &HashSet<String>,
    cost: &CostMap,
) -> Result<Vec<CostedExplanation>> {
    AbductionEngine::new().explain_min_cost(goal, kb, abducibles, cost)
}
