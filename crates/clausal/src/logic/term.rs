//! Terms in first-order logic

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable in first-order logic. Its identity is its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A term: either a variable or a function symbol applied to arguments.
/// Constants are compounds without arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Compound(String, Vec<Term>),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Compound(name.into(), Vec::new())
    }

    pub fn compound(symbol: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound(symbol.into(), args)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Compound(_, args) if args.is_empty())
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Compound(..) => None,
        }
    }

    /// Top function symbol, `None` for variables
    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Variable(_) => None,
            Term::Compound(f, _) => Some(f),
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Term::Variable(_) => &[],
            Term::Compound(_, args) => args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args().len()
    }

    /// Variables in order of first occurrence
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars = IndexSet::new();
        self.collect_variables(&mut vars);
        vars.into_iter().collect()
    }

    pub fn collect_variables(&self, vars: &mut IndexSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Compound(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Collect function symbols with their arities. Constants are included
    /// with arity 0.
    pub fn collect_functions(&self, funcs: &mut IndexMap<String, usize>) {
        if let Term::Compound(f, args) = self {
            funcs.entry(f.clone()).or_insert(args.len());
            for arg in args {
                arg.collect_functions(funcs);
            }
        }
    }

    /// Does `var` occur anywhere in this term?
    pub fn occurs(&self, var: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == var,
            Term::Compound(_, args) => args.iter().any(|arg| arg.occurs(var)),
        }
    }

    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Compound(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Symbol-counting weight: every function symbol occurrence costs
    /// `fweight`, every variable occurrence `vweight`.
    pub fn weight(&self, fweight: i64, vweight: i64) -> i64 {
        match self {
            Term::Variable(_) => vweight,
            Term::Compound(_, args) => {
                fweight
                    + args
                        .iter()
                        .map(|arg| arg.weight(fweight, vweight))
                        .sum::<i64>()
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Term::Variable(_) => 1,
            Term::Compound(_, args) => 1 + args.iter().map(Term::depth).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Symbols that are not plain TPTP words are written single-quoted
fn write_symbol(f: &mut fmt::Formatter<'_>, symbol: &str) -> fmt::Result {
    let word = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let plain = match symbol.chars().next() {
        Some(c) if c.is_ascii_lowercase() => word(symbol),
        Some('$') => symbol.len() > 1 && word(&symbol[1..]),
        Some('"') => true,
        Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => {
            let digits = symbol.trim_start_matches(['+', '-']);
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    };
    if plain {
        return write!(f, "{}", symbol);
    }
    write!(f, "'")?;
    for c in symbol.chars() {
        if c == '\\' || c == '\'' {
            write!(f, "\\")?;
        }
        write!(f, "{}", c)?;
    }
    write!(f, "'")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Compound(name, args) => {
                write_symbol(f, name)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(args: Vec<Term>) -> Term {
        Term::compound("f", args)
    }

    #[test]
    fn test_variables_in_first_occurrence_order() {
        let t = f(vec![Term::var("Y"), f(vec![Term::var("X"), Term::var("Y")])]);
        let names: Vec<_> = t.variables().into_iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["Y", "X"]);
    }

    #[test]
    fn test_weight_counts_symbols_and_variables() {
        // f(X, g(a))
        let t = f(vec![
            Term::var("X"),
            Term::compound("g", vec![Term::constant("a")]),
        ]);
        assert_eq!(t.weight(2, 1), 2 + 1 + 2 + 2);
        assert_eq!(t.weight(1, 1), 4);
    }

    #[test]
    fn test_occurs_and_ground() {
        let x = Variable::new("X");
        let t = f(vec![Term::constant("a"), Term::var("X")]);
        assert!(t.occurs(&x));
        assert!(!t.is_ground());
        assert!(Term::constant("a").is_ground());
        assert!(Term::constant("a").is_constant());
        assert_eq!(t.depth(), 2);
    }

    #[test]
    fn test_display() {
        let t = f(vec![Term::constant("a"), Term::compound("g", vec![Term::var("X")])]);
        assert_eq!(t.to_string(), "f(a,g(X))");
        assert_eq!(Term::constant("Big Apple").to_string(), "'Big Apple'");
        assert_eq!(Term::constant("it's").to_string(), "'it\\'s'");
        assert_eq!(Term::constant("-12").to_string(), "-12");
        assert_eq!(Term::constant("\"obj\"").to_string(), "\"obj\"");
    }

    #[test]
    fn test_collect_functions() {
        let t = f(vec![Term::constant("a"), Term::compound("g", vec![Term::var("X")])]);
        let mut funcs = IndexMap::new();
        t.collect_functions(&mut funcs);
        assert_eq!(funcs.get("f"), Some(&2));
        assert_eq!(funcs.get("g"), Some(&1));
        assert_eq!(funcs.get("a"), Some(&0));
    }
}
