//! Proof state and the given-clause algorithm
//!
//! ## Clause Sets
//!
//! - **Unprocessed (U)**: clauses awaiting selection, scored by the
//!   heuristic's evaluation functions
//! - **Processed (P)**: clauses that have been selected and used for
//!   generating inferences, either indexed or scanned linearly
//!
//! Invariant: every resolvent and factor among clauses in P is in U or P, or
//! was deleted by a deletion strategy.
//!
//! ## Algorithm
//!
//! Each call to [`ProofState::process_clause`]:
//!
//! 1. **Select**: extract the best clause G from U and rename its variables
//! 2. **Empty clause**: if G is empty it is the refutation witness
//! 3. **Tautology deletion** and **forward subsumption** may discard G
//! 4. **Backward subsumption**: drop clauses in P that G subsumes, unless
//!    they still support live clauses
//! 5. **Literal selection** on G
//! 6. **Generate**: all factors of G, resolvents of G with P and with a
//!    renamed copy of itself
//! 7. **Activate**: move G to P and the new clauses to U
//!
//! Every clause ever created is kept in an archive keyed by name, so a proof
//! can be rebuilt from the witness after the search.

use super::clause_set::{ClauseSet, HeuristicClauseSet, IndexedClauseSet, ProcessedClauses};
use super::statistics::{ProofStatistics, SzsStatus};
use super::support::SupportLedger;
use crate::config::SearchParams;
use crate::error::{ProverError, Result};
use crate::inference::{compute_all_factors, compute_all_resolvents, resolution, Proof};
use crate::logic::Clause;
use crate::session::Session;
use crate::simplifying::{backward_subsumption, forward_subsumption};
use log::{debug, info, trace};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// State of one proof attempt
pub struct ProofState {
    params: SearchParams,
    session: Session,
    unprocessed: HeuristicClauseSet,
    processed: Box<dyn ProcessedClauses>,
    ledger: SupportLedger,
    archive: HashMap<String, Clause>,
    stats: ProofStatistics,
    has_conjecture: bool,
    witness: Option<Clause>,
}

impl ProofState {
    pub fn new(params: SearchParams, clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self::with_session(params, clauses, Session::new())
    }

    /// Build a proof state that continues the counters of `session`, usually
    /// the one that parsed and clausified the input
    pub fn with_session(
        params: SearchParams,
        clauses: impl IntoIterator<Item = Clause>,
        session: Session,
    ) -> Self {
        let processed: Box<dyn ProcessedClauses> = if params.indexing {
            Box::new(IndexedClauseSet::new())
        } else {
            Box::new(ClauseSet::new())
        };
        let mut state = ProofState {
            unprocessed: HeuristicClauseSet::new(params.heuristics.eval_structure()),
            params,
            session,
            processed,
            ledger: SupportLedger::new(),
            archive: HashMap::new(),
            stats: ProofStatistics::default(),
            has_conjecture: false,
            witness: None,
        };
        for clause in clauses {
            state.register(clause);
            state.stats.initial_clauses += 1;
        }
        state.stats.max_clauses_held = state.unprocessed.len();
        state
    }

    /// Report `Theorem`/`CounterSatisfiable` instead of
    /// `Unsatisfiable`/`Satisfiable`
    pub fn set_conjecture(&mut self, has_conjecture: bool) {
        self.has_conjecture = has_conjecture;
    }

    /// Name a new clause uniquely, count it as live and queue it in U
    fn register(&mut self, mut clause: Clause) {
        while clause.name.is_empty() || self.archive.contains_key(&clause.name) {
            clause.name = self.session.next_clause_name();
        }
        self.ledger.record(&clause);
        self.archive.insert(clause.name.clone(), clause.clone());
        self.unprocessed.add(clause);
    }

    /// Run one iteration of the given-clause loop. Returns the empty clause
    /// if one was selected.
    pub fn process_clause(&mut self) -> Option<Clause> {
        let selected = self.unprocessed.extract_best()?;
        let mut given = selected.fresh_var_copy(&mut self.session);
        debug!("given: {}", given);

        if given.is_empty() {
            self.witness = Some(given.clone());
            return Some(given);
        }

        if self.params.delete_tautologies && given.is_tautology() {
            debug!("tautology deleted: {}", given.name);
            self.stats.tautologies_deleted += 1;
            self.ledger.release(&given);
            return None;
        }

        if self.params.forward_subsumption && forward_subsumption(self.processed.as_ref(), &given) {
            debug!("forward subsumed: {}", given.name);
            self.stats.forward_subsumed += 1;
            self.ledger.release(&given);
            return None;
        }

        if self.params.backward_subsumption {
            self.stats.backward_subsumed +=
                backward_subsumption(&given, self.processed.as_mut(), &mut self.ledger);
        }

        if let Some(selection) = self.params.literal_selection {
            selection.apply(&mut given);
        }

        let factors = compute_all_factors(&given);
        self.stats.factors += factors.len();

        let mut resolvents = compute_all_resolvents(&given, self.processed.as_ref());
        resolvents.extend(self.self_resolvents(&given));
        self.stats.resolvents += resolvents.len();

        self.processed.add(given);
        self.stats.processed_clauses += 1;

        for clause in factors.into_iter().chain(resolvents) {
            trace!("new: {} [{}]", clause.literals_string(), clause.derivation.rationale);
            self.register(clause);
        }
        None
    }

    /// Resolvents of `given` with a variable-disjoint copy of itself. The
    /// pairs `(i, j)` and `(j, i)` give variants, so only `i < j` is tried.
    fn self_resolvents(&mut self, given: &Clause) -> Vec<Clause> {
        let copy = given.fresh_var_copy(&mut self.session);
        let mut resolvents = Vec::new();
        for i in 0..given.len() {
            for j in i + 1..copy.len() {
                if let Some(resolvent) = resolution(given, i, &copy, j) {
                    resolvents.push(resolvent);
                }
            }
        }
        resolvents
    }

    /// Run the loop until a refutation is found, U is exhausted, `timeout`
    /// has passed or the clause limit is exceeded.
    ///
    /// The time limit is checked once per given clause, so a single long
    /// iteration may overrun it.
    pub fn saturate(&mut self, timeout: Duration) -> Result<Option<Clause>> {
        let start = Instant::now();
        let outcome = self.run(start, timeout);
        self.stats.elapsed = start.elapsed();
        info!("{} after {} given clauses", self.stats.status, self.stats.processed_clauses);
        outcome
    }

    fn run(&mut self, start: Instant, timeout: Duration) -> Result<Option<Clause>> {
        while !self.unprocessed.is_empty() {
            if start.elapsed() > timeout {
                if let Some(empty) = self.take_queued_refutation() {
                    return Ok(Some(empty));
                }
                self.stats.status = SzsStatus::Timeout;
                return Ok(None);
            }

            if let Some(empty) = self.process_clause() {
                self.refuted();
                return Ok(Some(empty));
            }

            let held = self.unprocessed.len() + self.processed.len();
            self.stats.max_clauses_held = self.stats.max_clauses_held.max(held);
            if self.params.max_clauses > 0 && held > self.params.max_clauses {
                if let Some(empty) = self.take_queued_refutation() {
                    return Ok(Some(empty));
                }
                self.stats.status = SzsStatus::ResourceOut;
                return Err(ProverError::ResourceLimit {
                    limit: self.params.max_clauses,
                    clauses: held,
                });
            }
        }

        self.stats.status = match (self.params.literal_selection, self.has_conjecture) {
            (Some(_), _) => SzsStatus::GaveUp,
            (None, true) => SzsStatus::CounterSatisfiable,
            (None, false) => SzsStatus::Satisfiable,
        };
        Ok(None)
    }

    /// An empty clause already derived wins over a resource outcome
    fn take_queued_refutation(&mut self) -> Option<Clause> {
        let empty = self.unprocessed.take_empty()?;
        debug!("empty clause {} taken before stopping", empty.name);
        self.witness = Some(empty.clone());
        self.refuted();
        Some(empty)
    }

    fn refuted(&mut self) {
        self.stats.status = if self.has_conjecture {
            SzsStatus::Theorem
        } else {
            SzsStatus::Unsatisfiable
        };
    }

    pub fn statistics(&self) -> &ProofStatistics {
        &self.stats
    }

    pub fn status(&self) -> SzsStatus {
        self.stats.status
    }

    /// The empty clause found by the last search, if any
    pub fn witness(&self) -> Option<&Clause> {
        self.witness.as_ref()
    }

    /// Derivation of `witness` through the archive of created clauses
    pub fn proof(&self, witness: &Clause) -> Proof {
        Proof::reconstruct(witness, |name| self.archive.get(name))
    }

    /// Any clause created in this proof attempt, by name
    pub fn clause(&self, name: &str) -> Option<&Clause> {
        self.archive.get(name)
    }

    pub fn unprocessed(&self) -> &HeuristicClauseSet {
        &self.unprocessed
    }

    pub fn processed(&self) -> &dyn ProcessedClauses {
        self.processed.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}
