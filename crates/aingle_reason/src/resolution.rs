//! Resolution Entailment Engine
//!
//! Decides `kb ⊨ query` by refutation: the negated query is added to the
//! knowledge base and pairwise resolution is saturated until either the empty
//! clause appears (entailed) or a round produces nothing new (not entailed).

use indexmap::IndexSet;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::clause::{resolve, Clause, KnowledgeBase};
use crate::config::{ReasonerConfig, ResolutionConfig};
use crate::error::{Error, Result};
use crate::literal::{negate, Literal};

/// Saturation-based propositional resolution prover.
///
/// The engine holds only its configuration. Every call builds its own working
/// clause set, so a single engine can be shared and reused freely.
#[derive(Debug, Clone, Default)]
pub struct ResolutionEngine {
    config: ResolutionConfig,
    strict: bool,
}

impl ResolutionEngine {
    /// Creates an engine with the default bounds and no input validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with specific bounds. `prove` rejects zero bounds with
    /// `Error::Config`.
    pub fn with_config(config: ResolutionConfig) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Creates an engine from the resolution section of a `ReasonerConfig`.
    pub fn from_reasoner_config(config: &ReasonerConfig) -> Self {
        Self {
            config: config.resolution.clone(),
            strict: config.strict,
        }
    }

    /// Enables or disables eager validation of the knowledge base and query.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Returns the engine's bounds.
    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    /// Returns `Ok(true)` iff `kb` entails `query`.
    pub fn entails(&self, kb: &KnowledgeBase, query: &Literal) -> Result<bool> {
        self.prove(kb, query).map(|outcome| outcome.entailed)
    }

    /// Runs the refutation procedure and reports the verdict with statistics.
    ///
    /// Each round resolves every unordered pair of distinct clauses in the
    /// working set. The loop ends as soon as the empty clause is derived, or
    /// when a round yields no clause outside the working set.
    pub fn prove(&self, kb: &KnowledgeBase, query: &Literal) -> Result<ResolutionOutcome> {
        self.config.validate()?;
        if self.strict {
            kb.validate()?;
            query.validate()?;
        }

        let mut clauses: IndexSet<Clause> = kb.iter().cloned().collect();
        clauses.insert(Clause::unit(negate(query)));

        let mut outcome = ResolutionOutcome::new(query.clone());

        loop {
            if outcome.rounds >= self.config.max_rounds {
                return Err(Error::MaxRoundsExceeded {
                    rounds: self.config.max_rounds,
                });
            }
            outcome.rounds += 1;

            let mut new = IndexSet::new();
            for (i, ci) in clauses.iter().enumerate() {
                for cj in clauses.iter().skip(i + 1) {
                    for resolvent in resolve(ci, cj) {
                        outcome.resolvents_generated += 1;
                        if resolvent.is_empty() {
                            debug!(
                                "Refuted ~{} in round {} from {} and {}",
                                query, outcome.rounds, ci, cj
                            );
                            outcome.entailed = true;
                            outcome.clauses = clauses.len();
                            outcome.refutation = Some((ci.clone(), cj.clone()));
                            return Ok(outcome);
                        }
                        trace!("{} + {} => {}", ci, cj, resolvent);
                        new.insert(resolvent);
                    }
                }
            }

            if new.iter().all(|c| clauses.contains(c)) {
                debug!(
                    "Saturated after {} rounds with {} clauses, {} not entailed",
                    outcome.rounds,
                    clauses.len(),
                    query
                );
                outcome.clauses = clauses.len();
                return Ok(outcome);
            }

            clauses.extend(new);
            if clauses.len() > self.config.max_clauses {
                return Err(Error::ClauseLimitExceeded {
                    limit: self.config.max_clauses,
                });
            }
        }
    }
}

/// The result of a single refutation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// The query that was tested.
    pub query: Literal,
    /// Whether the knowledge base entails the query.
    pub entailed: bool,
    /// Number of saturation rounds performed.
    pub rounds: usize,
    /// Total resolvents computed, including duplicates.
    pub resolvents_generated: usize,
    /// Size of the working clause set when the run ended.
    pub clauses: usize,
    /// The two clauses whose resolvent was empty, if the query was entailed.
    pub refutation: Option<(Clause, Clause)>,
}

impl ResolutionOutcome {
    fn new(query: Literal) -> Self {
        Self {
            query,
            entailed: false,
            rounds: 0,
            resolvents_generated: 0,
            clauses: 0,
            refutation: None,
        }
    }
}

/// Returns `Ok(true)` iff `kb ⊨ query`, using a default-configured engine.
pub fn resolution_entails(kb: &KnowledgeBase, query: &Literal) -> Result<bool> {
    ResolutionEngine::new().entails(kb, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[&str]) -> Clause {
        lits.iter().map(|s| s.parse::<Literal>().unwrap()).collect()
    }

    fn sample_kb() -> KnowledgeBase {
        [
            clause(&["A", "B"]),
            clause(&["~A", "C"]),
            clause(&["~B", "C"]),
            clause(&["~C", "D"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_entails_by_case_split() {
        let kb = sample_kb();
        assert!(resolution_entails(&kb, &Literal::pos("D")).unwrap());
        assert!(resolution_entails(&kb, &Literal::pos("C")).unwrap());
    }

    #[test]
    fn test_does_not_entail() {
        let kb = sample_kb();
        assert!(!resolution_entails(&kb, &Literal::pos("A")).unwrap());
        assert!(!resolution_entails(&kb, &Literal::neg("D")).unwrap());
    }

    #[test]
    fn test_empty_kb_entails_nothing() {
        let kb = KnowledgeBase::new();
        assert!(!resolution_entails(&kb, &Literal::pos("A")).unwrap());
        assert!(!resolution_entails(&kb, &Literal::neg("A")).unwrap());
    }

    #[test]
    fn test_unit_fact_entailed() {
        let kb: KnowledgeBase = [clause(&["A"])].into_iter().collect();
        let outcome = ResolutionEngine::new().prove(&kb, &Literal::pos("A")).unwrap();
        assert!(outcome.entailed);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(
            outcome.refutation,
            Some((clause(&["A"]), clause(&["~A"])))
        );
    }

    #[test]
    fn test_negative_query() {
        let kb: KnowledgeBase = [clause(&["~A", "~B"]), clause(&["B"])].into_iter().collect();
        assert!(resolution_entails(&kb, &Literal::neg("A")).unwrap());
    }

    #[test]
    fn test_outcome_statistics() {
        let outcome = ResolutionEngine::new()
            .prove(&sample_kb(), &Literal::pos("A"))
            .unwrap();
        assert!(!outcome.entailed);
        assert!(outcome.rounds >= 1);
        assert!(outcome.clauses > sample_kb().len());
        assert!(outcome.refutation.is_none());
    }

    #[test]
    fn test_round_limit() {
        let engine = ResolutionEngine::with_config(ResolutionConfig {
            max_rounds: 1,
            max_clauses: 100_000,
        });
        let err = engine.prove(&sample_kb(), &Literal::pos("A")).unwrap_err();
        assert!(matches!(err, Error::MaxRoundsExceeded { rounds: 1 }));
    }

    #[test]
    fn test_clause_limit() {
        let engine = ResolutionEngine::with_config(ResolutionConfig {
            max_rounds: 100,
            max_clauses: 5,
        });
        let err = engine.prove(&sample_kb(), &Literal::pos("A")).unwrap_err();
        assert!(matches!(err, Error::ClauseLimitExceeded { limit: 5 }));
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let config = ResolutionConfig {
            max_rounds: 0,
            max_clauses: 100_000,
        };
        let engine = ResolutionEngine::with_config(config.clone());
        assert_eq!(engine.config(), &config);

        let kb: KnowledgeBase = [Clause::unit(Literal::pos("A"))].into_iter().collect();
        let err = engine.prove(&kb, &Literal::pos("A")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_strict_mode_rejects_bad_atoms() {
        let kb: KnowledgeBase = [Clause::unit(Literal::pos("~A"))].into_iter().collect();
        let mut engine = ResolutionEngine::new();
        assert!(engine.entails(&kb, &Literal::pos("A")).is_ok());

        engine.set_strict(true);
        let err = engine.entails(&kb, &Literal::pos("A")).unwrap_err();
        assert!(matches!(err, Error::InvalidLiteral(_)));
    }

    #[test]
    fn test_repeated_calls_identical() {
        let engine = ResolutionEngine::new();
        let kb = sample_kb();
        let first = engine.prove(&kb, &Literal::pos("D")).unwrap();
        let second = engine.prove(&kb, &Literal::pos("D")).unwrap();
        assert_eq!(first, second);
    }
}
