//! AIngle Reason - Propositional Inference Toolkit
//!
//! This crate provides three independent reasoning engines over propositional
//! knowledge: deduction by resolution, abduction over Horn theories, and
//! induction of Horn rules from ground examples. Each engine is a plain value
//! holding its configuration; every call works on its own copy of the data
//! and leaves the inputs untouched.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Reasoning Engines                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐ │
//! │  │   Resolution   │  │ Horn Abduction │  │ FOIL Induction │ │
//! │  │  kb ⊨ query ?  │  │ minimal / cost │  │ covering rules │ │
//! │  └────────────────┘  └────────────────┘  └────────────────┘ │
//! │          │                   │                              │
//! │  ┌────────────────┐  ┌────────────────┐                     │
//! │  │ Clause Algebra │  │  Horn Clauses  │                     │
//! │  │ negate/resolve │  │  head :- body  │                     │
//! │  └────────────────┘  └────────────────┘                     │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use aingle_reason::{
//!     abduce, resolution_entails, Clause, HornClause, HornKnowledgeBase, KnowledgeBase, Literal,
//! };
//!
//! // (A ∨ B), (¬A ∨ C), (¬B ∨ C) entail C.
//! let kb: KnowledgeBase = [
//!     Clause::from_literals([Literal::pos("A"), Literal::pos("B")]),
//!     Clause::from_literals([Literal::neg("A"), Literal::pos("C")]),
//!     Clause::from_literals([Literal::neg("B"), Literal::pos("C")]),
//! ]
//! .into_iter()
//! .collect();
//! assert!(resolution_entails(&kb, &Literal::pos("C")).unwrap());
//!
//! // wet :- rain.  Assuming rain explains wet.
//! let horn: HornKnowledgeBase = vec![HornClause::rule("wet", ["rain"])].into();
//! let abducibles: HashSet<String> = ["rain".to_string()].into_iter().collect();
//! let explanations = abduce("wet", &horn, &abducibles).unwrap();
//! assert_eq!(explanations[0].to_string(), "{rain}");
//! ```

pub mod abduction;
pub mod clause;
pub mod config;
pub mod error;
pub mod horn;
pub mod induction;
pub mod literal;
pub mod resolution;

// Re-exports
pub use abduction::{
    abduce, abduce_min_cost, AbductionEngine, AbductionOutcome, AbductionStats,
    CostMap, CostedExplanation, Explanation,
};
pub use clause::{resolve, Clause, KnowledgeBase};
pub use config::{AbductionConfig, InductionConfig, ReasonerConfig, ResolutionConfig};
pub use error::{Error, Result};
pub use horn::{HornClause, HornKnowledgeBase};
pub use induction::{
    foil_gain, learn_rules, BodyLiteral, FoilLearner, GroundFact, LearnedRule, RuleCoverage,
};
pub use literal::{negate, Literal};
pub use resolution::{resolution_entails, ResolutionEngine, ResolutionOutcome};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
