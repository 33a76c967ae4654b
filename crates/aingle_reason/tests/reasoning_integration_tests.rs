//! Integration tests for AIngle Reason
//!
//! These tests drive the three engines through the public API only, using
//! the classic textbook scenarios for deduction, abduction and induction.

use aingle_reason::*;
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet};

fn clause(lits: &[&str]) -> Clause {
    lits.iter().map(|s| s.parse::<Literal>().unwrap()).collect()
}

fn case_split_kb() -> KnowledgeBase {
    [
        clause(&["A", "B"]),
        clause(&["~A", "C"]),
        clause(&["~B", "C"]),
        clause(&["~C", "D"]),
    ]
    .into_iter()
    .collect()
}

fn horn_kb() -> HornKnowledgeBase {
    vec![
        HornClause::rule("r", ["p", "q"]),
        HornClause::rule("r", ["s"]),
        HornClause::rule("p", ["t"]),
        HornClause::fact("q"),
    ]
    .into()
}

fn abducibles() -> HashSet<String> {
    ["s", "t"].iter().map(|s| s.to_string()).collect()
}

/// Test the resolution engine on the reference knowledge base
#[test]
fn test_resolution_reference_queries() {
    let kb = case_split_kb();
    assert!(resolution_entails(&kb, &"D".parse().unwrap()).unwrap());
    assert!(!resolution_entails(&kb, &"A".parse().unwrap()).unwrap());
}

/// Test that adding clauses never retracts an entailment
#[test]
fn test_resolution_monotonicity() {
    let query = Literal::pos("D");
    let mut kb = case_split_kb();
    assert!(resolution_entails(&kb, &query).unwrap());

    for extra in [clause(&["E"]), clause(&["~E", "F"]), clause(&["~D", "G"]), clause(&["A"])] {
        kb.add(extra);
        assert!(resolution_entails(&kb, &query).unwrap());
    }

    // And a previously non-entailed query can become entailed.
    assert!(resolution_entails(&kb, &Literal::pos("A")).unwrap());
    assert!(resolution_entails(&kb, &Literal::pos("G")).unwrap());
}

/// Test that every literal of a contradictory knowledge base is entailed
#[test]
fn test_resolution_inconsistent_kb() {
    let kb: KnowledgeBase = [clause(&["P"]), clause(&["~P"])].into_iter().collect();
    assert!(resolution_entails(&kb, &Literal::pos("Q")).unwrap());
    assert!(resolution_entails(&kb, &Literal::neg("Q")).unwrap());
}

/// Test abduction on the reference Horn theory
#[test]
fn test_abduction_reference() {
    let found: BTreeSet<_> = abduce("r", &horn_kb(), &abducibles())
        .unwrap()
        .into_iter()
        .collect();
    let expected = BTreeSet::from([Explanation::single("s"), Explanation::single("t")]);
    assert_eq!(found, expected);
}

/// Test cost-weighted abduction, including ties
#[test]
fn test_abduction_min_cost() {
    let cost: CostMap = [("s".to_string(), 5.0), ("t".to_string(), 1.0)]
        .into_iter()
        .collect();
    let best = abduce_min_cost("r", &horn_kb(), &abducibles(), &cost).unwrap();
    assert_eq!(
        best,
        vec![CostedExplanation {
            explanation: Explanation::single("t"),
            cost: 1.0
        }]
    );

    let equal: CostMap = [("s".to_string(), 1.0), ("t".to_string(), 1.0)]
        .into_iter()
        .collect();
    let best = abduce_min_cost("r", &horn_kb(), &abducibles(), &equal).unwrap();
    let atoms: BTreeSet<_> = best.into_iter().map(|c| c.explanation).collect();
    assert_eq!(
        atoms,
        BTreeSet::from([Explanation::single("s"), Explanation::single("t")])
    );
}

/// Test that returned explanations are mutually incomparable by inclusion
#[test]
fn test_abduction_minimality_on_diagnosis_theory() {
    let kb: HornKnowledgeBase = vec![
        HornClause::rule("no_light", ["bulb_broken"]),
        HornClause::rule("no_light", ["no_power"]),
        HornClause::rule("no_power", ["fuse_blown"]),
        HornClause::rule("no_power", ["outage", "fuse_blown"]),
        HornClause::rule("no_power", ["outage"]),
    ]
    .into();
    let abducibles: HashSet<String> = ["bulb_broken", "fuse_blown", "outage"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let found = abduce("no_light", &kb, &abducibles).unwrap();
    assert_eq!(found.len(), 3);
    for e1 in &found {
        for e2 in &found {
            assert!(!e1.is_strict_subset_of(e2));
        }
    }
}

/// Test rule induction on the reference bird example
#[test]
fn test_induction_reference() {
    let background: HashSet<_> = [
        ("Bird", "tweety"),
        ("Bird", "polly"),
        ("Bird", "tweety2"),
        ("Mammal", "leo"),
        ("Mammal", "max"),
    ]
    .into_iter()
    .map(|(p, c)| GroundFact::new(p, c))
    .collect();
    let pos: Vec<_> = ["tweety", "polly", "tweety2"]
        .into_iter()
        .map(|c| GroundFact::new("Fly", c))
        .collect();
    let neg: Vec<_> = ["leo", "max"]
        .into_iter()
        .map(|c| GroundFact::new("Fly", c))
        .collect();
    let predicates: IndexSet<String> = ["Bird", "Mammal"].iter().map(|s| s.to_string()).collect();

    let rules = learn_rules(&pos, &neg, &background, &predicates).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].to_string(), "Fly(X) :- Bird(X)");
    assert_eq!(
        rules[0].coverage(&pos, &neg, &background),
        RuleCoverage {
            positives: 3,
            negatives: 0
        }
    );
}

/// Test that engines carry no state between calls
#[test]
fn test_engines_are_idempotent() {
    let config = ReasonerConfig::default();

    let resolution = ResolutionEngine::from_reasoner_config(&config);
    let kb = case_split_kb();
    let q = Literal::pos("C");
    assert_eq!(resolution.prove(&kb, &q).unwrap(), resolution.prove(&kb, &q).unwrap());

    let abduction = AbductionEngine::from_reasoner_config(&config);
    assert_eq!(
        abduction.run("r", &horn_kb(), &abducibles()).unwrap(),
        abduction.run("r", &horn_kb(), &abducibles()).unwrap()
    );

    let learner = FoilLearner::from_reasoner_config(&config);
    let background: HashSet<_> = [GroundFact::new("Bird", "tweety")].into_iter().collect();
    let pos = vec![GroundFact::new("Fly", "tweety")];
    let neg = vec![GroundFact::new("Fly", "rex")];
    let predicates: IndexSet<String> = ["Bird".to_string()].into_iter().collect();
    assert_eq!(
        learner.learn(&pos, &neg, &background, &predicates).unwrap(),
        learner.learn(&pos, &neg, &background, &predicates).unwrap()
    );
}

/// Test that a strict configuration is honoured by every engine
#[test]
fn test_strict_config_applies_to_all_engines() {
    let config = ReasonerConfig::from_json(r#"{"strict": true}"#).unwrap();

    let kb: KnowledgeBase = [Clause::unit(Literal::pos(""))].into_iter().collect();
    let err = ResolutionEngine::from_reasoner_config(&config)
        .entails(&kb, &Literal::pos("A"))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLiteral(_)));

    let horn: HornKnowledgeBase = vec![HornClause::rule("a", ["b c"])].into();
    let err = AbductionEngine::from_reasoner_config(&config)
        .explain("a", &horn, &HashSet::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLiteral(_)));

    let err = FoilLearner::from_reasoner_config(&config)
        .learn(&[GroundFact::new("", "x")], &[], &HashSet::new(), &IndexSet::new())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidExample(_)));
}

/// Test that outcomes serialize for callers that export results
#[test]
fn test_outcomes_serialize() {
    let outcome = ResolutionEngine::new()
        .prove(&case_split_kb(), &Literal::pos("D"))
        .unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    let back: ResolutionOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back, outcome);

    let outcome = AbductionEngine::new().run("r", &horn_kb(), &abducibles()).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["goal"], "r");
    assert_eq!(json["explanations"].as_array().unwrap().len(), 2);
}
