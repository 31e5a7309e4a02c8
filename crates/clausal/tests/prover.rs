//! End-to-end tests: parse, clausify and saturate TPTP problems

use clausal::inference::Justification;
use clausal::{
    add_equality_axioms, parse_problem, ClausificationMode, LitSelection, ProofState,
    ProverError, SearchParams, Session, SzsStatus,
};
use std::time::Duration;

fn prove_with(tptp: &str, params: SearchParams) -> (ProofState, clausal::Result<Option<clausal::Clause>>) {
    let problem = parse_problem(tptp, &[]).unwrap();
    let has_conjecture = problem.has_conjecture();
    let mut session = Session::new();
    let mut clauses = problem.into_clause_set(ClausificationMode::Standard, &mut session);
    add_equality_axioms(&mut clauses, &mut session);
    let mut state = ProofState::with_session(params, clauses, session);
    state.set_conjecture(has_conjecture);
    let result = state.saturate(Duration::from_secs(10));
    (state, result)
}

fn prove(tptp: &str) -> ProofState {
    let (state, result) = prove_with(tptp, SearchParams::default());
    result.unwrap();
    state
}

/// Every inference step must name parents that appear earlier in the proof
fn assert_proof_well_formed(state: &ProofState) {
    let witness = state.witness().expect("no witness");
    assert!(witness.is_empty());
    let proof = state.proof(witness);
    assert!(!proof.is_empty());
    for (i, step) in proof.steps.iter().enumerate() {
        assert_eq!(step.number, i + 1);
        if let Justification::Inference { parents, .. } = &step.justification {
            assert!(!parents.is_empty());
            assert!(parents.iter().all(|&p| p < step.number), "step {}", step.number);
        }
    }
    assert!(proof.steps.last().unwrap().clause.is_empty());
}

#[test]
fn test_complementary_units() {
    let state = prove("cnf(a, axiom, p). cnf(b, negated_conjecture, ~p).");
    assert_eq!(state.status(), SzsStatus::Unsatisfiable);
    assert_proof_well_formed(&state);
}

#[test]
fn test_satisfiable_exhaustion() {
    let state = prove("cnf(a, axiom, p(a)). cnf(b, axiom, q(b)). cnf(c, axiom, ~p(X) | r(X)).");
    assert_eq!(state.status(), SzsStatus::Satisfiable);
    assert!(state.witness().is_none());
}

#[test]
fn test_socrates_is_a_theorem() {
    let state = prove(
        "
        fof(humans_are_mortal, axiom, ![X]: (human(X) => mortal(X))).
        fof(socrates_is_human, axiom, human(socrates)).
        fof(socrates_is_mortal, conjecture, mortal(socrates)).
        ",
    );
    assert_eq!(state.status(), SzsStatus::Theorem);
    assert_proof_well_formed(&state);
}

#[test]
fn test_unproved_conjecture_is_counter_satisfiable() {
    let state = prove(
        "
        fof(a1, axiom, ![X]: (p(X) => q(X))).
        fof(goal, conjecture, q(b)).
        ",
    );
    assert_eq!(state.status(), SzsStatus::CounterSatisfiable);
}

#[test]
fn test_existential_conjecture() {
    // The witness has to be found by unification with the negated goal
    let state = prove(
        "
        fof(a1, axiom, p(f(c))).
        fof(goal, conjecture, ?[X]: p(X)).
        ",
    );
    assert_eq!(state.status(), SzsStatus::Theorem);
}

#[test]
fn test_skolemized_axiom() {
    let state = prove(
        "
        fof(a1, axiom, ![X]: ?[Y]: r(X, Y)).
        fof(a2, axiom, ![X, Y]: (r(X, Y) => s(Y))).
        fof(goal, conjecture, ?[Z]: s(Z)).
        ",
    );
    assert_eq!(state.status(), SzsStatus::Theorem);
    assert_proof_well_formed(&state);
}

#[test]
fn test_equality_needs_axioms() {
    let tptp = "
        cnf(e1, axiom, a = b).
        cnf(e2, axiom, b = c).
        cnf(goal, negated_conjecture, f(a) != f(c)).
    ";
    let state = prove(tptp);
    assert_eq!(state.status(), SzsStatus::Unsatisfiable);
    assert_proof_well_formed(&state);
    let witness = state.witness().unwrap();
    let proof = state.proof(witness);
    assert!(proof
        .steps
        .iter()
        .any(|s| matches!(s.justification, Justification::EqAxiom)));
}

#[test]
fn test_every_option_combination_agrees() {
    let tptp = "
        cnf(c1, axiom, p(X) | q(X)).
        cnf(c2, axiom, ~p(a) | q(b)).
        cnf(c3, axiom, ~q(X) | r(X)).
        cnf(c4, negated_conjecture, ~r(a)).
        cnf(c5, negated_conjecture, ~r(b)).
    ";
    for params in SearchParams::default().all_option_combinations() {
        let summary = params.summary();
        let (state, result) = prove_with(tptp, params);
        assert!(result.unwrap().is_some(), "{}", summary);
        assert_eq!(state.status(), SzsStatus::Unsatisfiable, "{}", summary);
    }
}

#[test]
fn test_literal_selection_still_refutes() {
    let tptp = "
        cnf(c1, axiom, p(X) | q(X)).
        cnf(c2, axiom, ~p(X) | q(X)).
        cnf(c3, axiom, p(X) | ~q(X)).
        cnf(c4, negated_conjecture, ~p(X) | ~q(X)).
    ";
    for selection in LitSelection::ALL {
        let params = SearchParams {
            literal_selection: Some(selection),
            ..SearchParams::default()
        };
        let (state, result) = prove_with(tptp, params);
        assert!(result.unwrap().is_some(), "{}", selection);
        assert_eq!(state.status(), SzsStatus::Unsatisfiable, "{}", selection);
    }
}

#[test]
fn test_resource_limit() {
    // Unbounded: p(a), p(X) => p(f(X))
    let tptp = "cnf(c1, axiom, p(a)). cnf(c2, axiom, ~p(X) | p(f(X))).";
    let params = SearchParams {
        max_clauses: 10,
        ..SearchParams::default()
    };
    let (state, result) = prove_with(tptp, params);
    match result {
        Err(e @ ProverError::ResourceLimit { limit: 10, .. }) => {
            assert_eq!(e.szs_status(), "ResourceOut");
        }
        other => panic!("expected resource limit, got {:?}", other),
    }
    assert_eq!(state.status(), SzsStatus::ResourceOut);
}

#[test]
fn test_timeout() {
    let problem = parse_problem(
        "cnf(c1, axiom, p(a)). cnf(c2, axiom, ~p(X) | p(f(X))).",
        &[],
    )
    .unwrap();
    let mut session = Session::new();
    let clauses = problem.into_clause_set(ClausificationMode::Standard, &mut session);
    let mut state = ProofState::with_session(SearchParams::default(), clauses, session);
    let result = state.saturate(Duration::from_millis(50)).unwrap();
    assert!(result.is_none());
    assert_eq!(state.status(), SzsStatus::Timeout);
    assert!(state.statistics().elapsed >= Duration::from_millis(50));
}
