//! TPTP problem parsing
//!
//! Reads `cnf` and `fof` statements and resolves `include` directives.
//! Included files are looked up relative to the including file, then in the
//! configured include directories, then under `$TPTP`.

pub mod statements;
pub mod tptp;

pub use statements::{split_statements, Statement};
pub use tptp::TptpStatement;

use crate::clausify::{clausify, ClausificationMode, NamedFormula};
use crate::error::{ProverError, Result};
use crate::logic::{Clause, ClauseType};
use crate::saturation::ClauseSet;
use crate::session::Session;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the TPTP library root
pub const TPTP_ENV: &str = "TPTP";

/// Statements of a problem, includes already resolved
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub clauses: Vec<Clause>,
    pub formulas: Vec<NamedFormula>,
}

impl Problem {
    pub fn len(&self) -> usize {
        self.clauses.len() + self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A `fof` conjecture is present, so a proof establishes a theorem
    pub fn has_conjecture(&self) -> bool {
        self.formulas.iter().any(|f| f.role == ClauseType::Conjecture)
    }

    /// Clausify all formulas and collect them with the clauses. Clashing
    /// names are replaced by fresh session names.
    pub fn into_clause_set(self, mode: ClausificationMode, session: &mut Session) -> ClauseSet {
        let mut set = ClauseSet::new();
        for clause in self.clauses {
            set.add_unique(clause, session);
        }
        for formula in self.formulas {
            for clause in clausify(formula, mode, session) {
                set.add_unique(clause, session);
            }
        }
        set
    }
}

/// Parse TPTP text. Relative includes are resolved against the current
/// directory.
pub fn parse_problem(text: &str, include_dirs: &[PathBuf]) -> Result<Problem> {
    let mut loader = Loader::new(include_dirs);
    let mut problem = Problem::default();
    loader.load_text(text, "<input>", Path::new("."), None, &mut problem)?;
    Ok(problem)
}

/// Parse a TPTP file and everything it includes
pub fn parse_problem_file(path: &Path, include_dirs: &[PathBuf]) -> Result<Problem> {
    let mut loader = Loader::new(include_dirs);
    let mut problem = Problem::default();
    loader.load_file(path, None, &mut problem)?;
    Ok(problem)
}

/// Parse a TPTP file and clausify it
pub fn load_clauses(
    path: &Path,
    include_dirs: &[PathBuf],
    mode: ClausificationMode,
    session: &mut Session,
) -> Result<ClauseSet> {
    Ok(parse_problem_file(path, include_dirs)?.into_clause_set(mode, session))
}

struct Loader<'a> {
    include_dirs: &'a [PathBuf],
    /// Files currently being read, outermost first
    open: Vec<PathBuf>,
}

impl<'a> Loader<'a> {
    fn new(include_dirs: &'a [PathBuf]) -> Self {
        Loader {
            include_dirs,
            open: Vec::new(),
        }
    }

    fn load_file(
        &mut self,
        path: &Path,
        selection: Option<&[String]>,
        problem: &mut Problem,
    ) -> Result<()> {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.open.contains(&canonical) {
            return Err(ProverError::CircularInclude(path.display().to_string()));
        }
        let text = fs::read_to_string(path).map_err(|error| ProverError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        debug!("reading {}", path.display());

        self.open.push(canonical);
        let dir = path.parent().unwrap_or(Path::new("."));
        let result = self.load_text(&text, &path.display().to_string(), dir, selection, problem);
        self.open.pop();
        result
    }

    fn load_text(
        &mut self,
        text: &str,
        source_name: &str,
        current_dir: &Path,
        selection: Option<&[String]>,
        problem: &mut Problem,
    ) -> Result<()> {
        let (statements, rest) = split_statements(text);
        if let Some(rest) = rest {
            return Err(ProverError::parse(
                source_name,
                rest.line,
                "statement not terminated by '.'",
            ));
        }

        let selected = |name: &str| selection.map_or(true, |names| names.iter().any(|n| n == name));

        for stmt in statements {
            match tptp::statement(&stmt.text) {
                Ok((_, TptpStatement::Cnf(clause))) => {
                    if selected(&clause.name) {
                        problem.clauses.push(clause);
                    }
                }
                Ok((_, TptpStatement::Fof(formula))) => {
                    if selected(&formula.name) {
                        problem.formulas.push(formula);
                    }
                }
                Ok((_, TptpStatement::Include { file, selection })) => {
                    let path = self.resolve(&file, current_dir)?;
                    self.load_file(&path, selection.as_deref(), problem)?;
                }
                Err(e) => return Err(statement_error(source_name, &stmt, e)),
            }
        }
        Ok(())
    }

    fn resolve(&self, file: &str, current_dir: &Path) -> Result<PathBuf> {
        let tptp_root = std::env::var_os(TPTP_ENV).map(PathBuf::from);
        std::iter::once(current_dir.to_path_buf())
            .chain(self.include_dirs.iter().cloned())
            .chain(tptp_root)
            .map(|dir| dir.join(file))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ProverError::IncludeNotFound(file.to_string()))
    }
}

fn statement_error(
    source_name: &str,
    stmt: &Statement,
    error: nom::Err<nom::error::Error<&str>>,
) -> ProverError {
    let keyword = tptp::statement_keyword(&stmt.text).unwrap_or("");
    if !matches!(keyword, "cnf" | "fof" | "include") {
        warn!("{}:{}: unsupported statement '{}'", source_name, stmt.line, keyword);
        return ProverError::parse(
            source_name,
            stmt.line,
            format!("unsupported statement kind '{}'", keyword),
        );
    }
    let near = match &error {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
        nom::Err::Incomplete(_) => "",
    };
    let near: String = near.chars().take(40).collect();
    ProverError::parse(
        source_name,
        stmt.line,
        format!("malformed {} statement near '{}'", keyword, near.trim()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_problem() {
        let text = "
            % a comment
            cnf(c1, axiom, p(a)).
            fof(f1, axiom, ![X]: (p(X) => q(X))).
            fof(goal, conjecture, q(a)).
        ";
        let problem = parse_problem(text, &[]).unwrap();
        assert_eq!(problem.clauses.len(), 1);
        assert_eq!(problem.formulas.len(), 2);
        assert!(problem.has_conjecture());

        let mut session = Session::new();
        let set = problem.into_clause_set(ClausificationMode::Standard, &mut session);
        assert_eq!(set.len(), 3);
        let negated = set
            .iter()
            .filter(|c| c.clause_type == ClauseType::NegatedConjecture)
            .count();
        assert_eq!(negated, 1);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let text = "cnf(c1, axiom, p(a)).\n\ncnf(c2, axiom, p(a) | ).";
        match parse_problem(text, &[]) {
            Err(ProverError::Parse { line, message, .. }) => {
                assert_eq!(line, 3);
                assert!(message.contains("cnf"), "{}", message);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_statement() {
        assert!(matches!(
            parse_problem("cnf(c1, axiom, p(a))", &[]),
            Err(ProverError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_unsupported_language() {
        match parse_problem("tff(t, type, a: $i).", &[]) {
            Err(ProverError::Parse { message, .. }) => assert!(message.contains("tff")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_include() {
        assert!(matches!(
            parse_problem("include('no/such/file.ax').", &[]),
            Err(ProverError::IncludeNotFound(_))
        ));
    }

    #[test]
    fn test_name_clash_is_renamed() {
        let text = "cnf(c1, axiom, p). fof(f, axiom, q).";
        let mut session = Session::new();
        let set = parse_problem(text, &[])
            .unwrap()
            .into_clause_set(ClausificationMode::Small, &mut session);
        // The clausified formula is named c1 by the session, clashing with
        // the input clause
        assert_eq!(set.len(), 2);
        assert!(set.contains("c1"));
    }
}
