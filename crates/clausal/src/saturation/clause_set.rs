//! Clause containers used by the given-clause loop
//!
//! [`ClauseSet`] is the plain container with linear-scan candidate
//! retrieval. [`IndexedClauseSet`] wraps one and keeps a resolution index and
//! a subsumption index in step with it. [`HeuristicClauseSet`] wraps one and
//! scores clauses on insertion for best-first extraction. The processed side
//! of a proof state is used through [`ProcessedClauses`], which both the
//! plain and the indexed set implement.

use crate::index::{ClauseIndex, ResolutionIndex, SubsumptionIndex};
use crate::logic::{Clause, Literal, Signature};
use crate::selection::EvalStructure;
use crate::session::Session;
use indexmap::IndexMap;

/// Insertion-ordered clauses keyed by name
#[derive(Debug, Clone, Default)]
pub struct ClauseSet {
    clauses: IndexMap<String, Clause>,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named clause. A clause with the same name is replaced and
    /// returned.
    pub fn add(&mut self, clause: Clause) -> Option<Clause> {
        self.clauses.insert(clause.name.clone(), clause)
    }

    /// Add a clause, giving it a fresh session name if it has none or its
    /// name is already taken
    pub fn add_unique(&mut self, mut clause: Clause, session: &mut Session) {
        while clause.name.is_empty() || self.clauses.contains_key(&clause.name) {
            clause.name = session.next_clause_name();
        }
        self.clauses.insert(clause.name.clone(), clause);
    }

    /// Remove by name, keeping the order of the remaining clauses
    pub fn remove(&mut self, name: &str) -> Option<Clause> {
        self.clauses.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Clause> {
        self.clauses.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clauses.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.values()
    }

    /// Clause at insertion position `idx`
    pub fn get_index(&self, idx: usize) -> Option<&Clause> {
        self.clauses.get_index(idx).map(|(_, c)| c)
    }

    pub(crate) fn shift_remove_index(&mut self, idx: usize) -> Option<Clause> {
        self.clauses.shift_remove_index(idx).map(|(_, c)| c)
    }

    pub fn signature(&self) -> Signature {
        Signature::from_clauses(self.iter())
    }

    pub fn into_vec(self) -> Vec<Clause> {
        self.clauses.into_values().collect()
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let mut set = ClauseSet::new();
        for clause in iter {
            set.add(clause);
        }
        set
    }
}

impl IntoIterator for ClauseSet {
    type Item = Clause;
    type IntoIter = indexmap::map::IntoValues<String, Clause>;

    /// Clauses in insertion order
    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_values()
    }
}

impl Extend<Clause> for ClauseSet {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        for clause in iter {
            self.add(clause);
        }
    }
}

/// The processed clause set as seen by inference and subsumption
pub trait ProcessedClauses {
    fn add(&mut self, clause: Clause);

    fn remove(&mut self, name: &str) -> Option<Clause>;

    fn get(&self, name: &str) -> Option<&Clause>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_>;

    /// Literals that may resolve with `lit`, as `(clause, literal index)`
    fn resolution_candidates(&self, lit: &Literal) -> Vec<(&Clause, usize)>;

    /// Clauses that may subsume `clause`
    fn subsuming_candidates(&self, clause: &Clause) -> Vec<&Clause>;

    /// Names of clauses that `clause` may subsume
    fn subsumed_candidates(&self, clause: &Clause) -> Vec<String>;
}

impl ProcessedClauses for ClauseSet {
    fn add(&mut self, clause: Clause) {
        ClauseSet::add(self, clause);
    }

    fn remove(&mut self, name: &str) -> Option<Clause> {
        ClauseSet::remove(self, name)
    }

    fn get(&self, name: &str) -> Option<&Clause> {
        ClauseSet::get(self, name)
    }

    fn len(&self) -> usize {
        ClauseSet::len(self)
    }

    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_> {
        Box::new(self.iter())
    }

    /// Every eligible literal of every clause; resolution itself filters
    fn resolution_candidates(&self, _lit: &Literal) -> Vec<(&Clause, usize)> {
        self.iter()
            .flat_map(|c| {
                c.literals
                    .iter()
                    .enumerate()
                    .filter(|(_, l)| l.inference_eligible)
                    .map(move |(i, _)| (c, i))
            })
            .collect()
    }

    fn subsuming_candidates(&self, _clause: &Clause) -> Vec<&Clause> {
        self.iter().collect()
    }

    fn subsumed_candidates(&self, _clause: &Clause) -> Vec<String> {
        self.clauses.keys().cloned().collect()
    }
}

/// A clause set with a resolution index and a subsumption index
#[derive(Debug, Clone, Default)]
pub struct IndexedClauseSet {
    set: ClauseSet,
    resolution_index: ResolutionIndex,
    subsumption_index: SubsumptionIndex,
}

impl IndexedClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, clause: Clause) {
        if let Some(replaced) = self.set.remove(&clause.name) {
            self.unindex(&replaced);
        }
        self.resolution_index.insert(&clause);
        self.subsumption_index.insert(&clause);
        self.set.add(clause);
    }

    pub fn remove(&mut self, name: &str) -> Option<Clause> {
        let clause = self.set.remove(name)?;
        self.unindex(&clause);
        Some(clause)
    }

    fn unindex(&mut self, clause: &Clause) {
        self.resolution_index.remove(clause);
        self.subsumption_index.remove(clause);
    }

    pub fn get(&self, name: &str) -> Option<&Clause> {
        self.set.get(name)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.set.iter()
    }

    pub fn resolution_index(&self) -> &ResolutionIndex {
        &self.resolution_index
    }

    pub fn subsumption_index(&self) -> &SubsumptionIndex {
        &self.subsumption_index
    }
}

impl ProcessedClauses for IndexedClauseSet {
    fn add(&mut self, clause: Clause) {
        IndexedClauseSet::add(self, clause);
    }

    fn remove(&mut self, name: &str) -> Option<Clause> {
        IndexedClauseSet::remove(self, name)
    }

    fn get(&self, name: &str) -> Option<&Clause> {
        IndexedClauseSet::get(self, name)
    }

    fn len(&self) -> usize {
        IndexedClauseSet::len(self)
    }

    fn clauses(&self) -> Box<dyn Iterator<Item = &Clause> + '_> {
        Box::new(self.iter())
    }

    fn resolution_candidates(&self, lit: &Literal) -> Vec<(&Clause, usize)> {
        self.resolution_index
            .resolution_literals(lit)
            .into_iter()
            .filter_map(|(name, idx)| self.set.get(&name).map(|c| (c, idx)))
            .collect()
    }

    fn subsuming_candidates(&self, clause: &Clause) -> Vec<&Clause> {
        self.subsumption_index
            .subsuming_candidates(clause)
            .into_iter()
            .filter_map(|name| self.set.get(&name))
            .collect()
    }

    fn subsumed_candidates(&self, clause: &Clause) -> Vec<String> {
        self.subsumption_index.subsumed_candidates(clause)
    }
}

/// A clause set that scores clauses on insertion and extracts the best one
#[derive(Debug, Clone)]
pub struct HeuristicClauseSet {
    set: ClauseSet,
    eval: EvalStructure,
}

impl HeuristicClauseSet {
    pub fn new(eval: EvalStructure) -> Self {
        HeuristicClauseSet {
            set: ClauseSet::new(),
            eval,
        }
    }

    /// Score `clause` with every evaluation function and store it
    pub fn add(&mut self, mut clause: Clause) {
        clause.evaluation = self.eval.evaluate(&clause);
        self.set.add(clause);
    }

    /// Remove the clause with the lowest score in the column chosen by the
    /// round robin; the earliest inserted clause wins ties
    pub fn extract_best(&mut self) -> Option<Clause> {
        if self.set.is_empty() {
            return None;
        }
        let column = self.eval.next_eval();
        let score = |c: &Clause| c.evaluation.get(column).copied().unwrap_or(i64::MAX);

        let mut best = 0;
        let mut best_score = i64::MAX;
        for (i, clause) in self.set.iter().enumerate() {
            let s = score(clause);
            if i == 0 || s < best_score {
                best = i;
                best_score = s;
            }
        }
        self.set.shift_remove_index(best)
    }

    pub fn remove(&mut self, name: &str) -> Option<Clause> {
        self.set.remove(name)
    }

    /// Remove and return a queued empty clause, if there is one
    pub fn take_empty(&mut self) -> Option<Clause> {
        let name = self.set.iter().find(|c| c.is_empty())?.name.clone();
        self.set.remove(&name)
    }

    pub fn get(&self, name: &str) -> Option<&Clause> {
        self.set.get(name)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.set.iter()
    }

    pub fn eval_structure(&self) -> &EvalStructure {
        &self.eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Term;
    use crate::selection::Heuristic;

    fn unit(name: &str, pred: &str, args: Vec<Term>) -> Clause {
        Clause::new(vec![Literal::predicate(pred, args, false)]).named(name)
    }

    fn heavy(name: &str) -> Clause {
        unit(
            name,
            "p",
            vec![Term::compound("f", vec![Term::compound("g", vec![Term::var("X")])])],
        )
    }

    #[test]
    fn test_clause_set_keeps_insertion_order() {
        let mut set = ClauseSet::new();
        set.add(unit("b", "p", vec![]));
        set.add(unit("a", "q", vec![]));
        set.add(unit("c", "r", vec![]));
        set.remove("a");
        let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c"]);

        let owned: Vec<String> = set.into_iter().map(|c| c.name).collect();
        assert_eq!(owned, vec!["b", "c"]);
    }

    #[test]
    fn test_add_unique_renames_collisions() {
        let mut session = Session::new();
        let mut set = ClauseSet::new();
        set.add_unique(unit("c1", "p", vec![]), &mut session);
        set.add_unique(unit("c1", "q", vec![]), &mut session);
        set.add_unique(Clause::new(vec![]), &mut session);
        assert_eq!(set.len(), 3);
        let names: Vec<_> = set.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_indexed_set_keeps_indices_in_step() {
        let mut set = IndexedClauseSet::new();
        set.add(unit("c1", "p", vec![Term::var("X")]));
        set.add(Clause::new(vec![Literal::predicate("p", vec![Term::constant("a")], true)]).named("c2"));

        let query = Literal::predicate("p", vec![Term::constant("b")], true);
        let found = set.resolution_candidates(&query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.name, "c1");

        set.remove("c1");
        assert!(set.resolution_candidates(&query).is_empty());
        assert!(set.resolution_index().resolution_literals(&query).is_empty());
        assert_eq!(set.subsumption_index().len(), 1);
    }

    #[test]
    fn test_plain_set_offers_every_eligible_literal() {
        let mut set = ClauseSet::new();
        let mut c = Clause::new(vec![
            Literal::predicate("p", vec![], false),
            Literal::predicate("q", vec![], true),
        ])
        .named("c1");
        c.literals[0].inference_eligible = false;
        set.add(c);
        let query = Literal::predicate("r", vec![], false);
        let found = ProcessedClauses::resolution_candidates(&set, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1, 1);
    }

    #[test]
    fn test_extract_best_symbol_count() {
        let mut set = HeuristicClauseSet::new(Heuristic::SymbolCount.eval_structure());
        set.add(heavy("heavy"));
        set.add(unit("light1", "p", vec![]));
        set.add(unit("light2", "q", vec![]));

        assert_eq!(set.extract_best().map(|c| c.name), Some("light1".to_string()));
        assert_eq!(set.extract_best().map(|c| c.name), Some("light2".to_string()));
        assert_eq!(set.extract_best().map(|c| c.name), Some("heavy".to_string()));
        assert!(set.extract_best().is_none());
    }

    #[test]
    fn test_extract_best_pick_given_mixes_in_oldest() {
        let mut set = HeuristicClauseSet::new(Heuristic::PickGiven2.eval_structure());
        set.add(heavy("old"));
        for i in 0..5 {
            set.add(unit(&format!("l{}", i), "p", vec![]));
        }
        // Round robin is weight, FIFO, weight, weight, FIFO, ...: the first
        // call to next_eval decrements 2 -> 1 and stays on weight
        let order: Vec<String> = (0..3).filter_map(|_| set.extract_best().map(|c| c.name)).collect();
        assert_eq!(order, vec!["l0", "old", "l1"]);
    }
}
