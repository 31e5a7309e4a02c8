//! nom grammar for TPTP `cnf`, `fof` and `include` statements

use crate::clausify::{Connective, Formula, NamedFormula, Quantifier};
use crate::logic::{Clause, ClauseType, Literal, Term, Variable};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{all_consuming, map, not, opt, recognize, value},
    multi::{fold_many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

type PResult<'a, T> = IResult<&'a str, T>;

/// A parsed top-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum TptpStatement {
    Cnf(Clause),
    Fof(NamedFormula),
    Include {
        file: String,
        /// Names to keep from the included file; `None` keeps everything
        selection: Option<Vec<String>>,
    },
}

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn upper_word(input: &str) -> PResult<&str> {
    recognize(pair(satisfy(|c| c.is_ascii_uppercase()), take_while(is_word_char)))(input)
}

fn lower_word(input: &str) -> PResult<&str> {
    recognize(pair(satisfy(|c| c.is_ascii_lowercase()), take_while(is_word_char)))(input)
}

fn dollar_word(input: &str) -> PResult<&str> {
    recognize(pair(char('$'), lower_word))(input)
}

fn integer(input: &str) -> PResult<&str> {
    recognize(pair(opt(one_of("+-")), digit1))(input)
}

/// Contents of a quoted string with `\` escapes resolved
fn quoted(quote: char, input: &str) -> PResult<String> {
    let (rest, _) = char(quote)(input)?;
    let mut out = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            }
            c if c == quote => return Ok((&rest[i + c.len_utf8()..], out)),
            c => out.push(c),
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn single_quoted(input: &str) -> PResult<String> {
    quoted('\'', input)
}

/// `"..."` distinct objects keep their quotes as part of the symbol
fn distinct_object(input: &str) -> PResult<String> {
    let (input, s) = quoted('"', input)?;
    Ok((input, format!("\"{}\"", s)))
}

fn atomic_word(input: &str) -> PResult<String> {
    alt((map(lower_word, String::from), single_quoted))(input)
}

/// A statement name: atomic word or integer
pub fn name(input: &str) -> PResult<String> {
    alt((atomic_word, map(digit1, String::from)))(input)
}

fn functor(input: &str) -> PResult<String> {
    alt((atomic_word, map(dollar_word, String::from)))(input)
}

pub fn term(input: &str) -> PResult<Term> {
    alt((
        map(upper_word, Term::var),
        compound_term,
        map(distinct_object, Term::constant),
        map(integer, Term::constant),
    ))(input)
}

fn arguments(input: &str) -> PResult<Vec<Term>> {
    delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), term),
        preceded(multispace0, char(')')),
    )(input)
}

fn compound_term(input: &str) -> PResult<Term> {
    let (input, f) = functor(input)?;
    let (input, args) = opt(arguments)(input)?;
    Ok((input, Term::Compound(f, args.unwrap_or_default())))
}

/// `=` or `!=`, not the start of `=>`
fn equality_operator(input: &str) -> PResult<bool> {
    alt((
        value(true, tag("!=")),
        value(false, terminated(char('='), not(char('>')))),
    ))(input)
}

/// An atom, equation or disequation
pub fn atomic_literal(input: &str) -> PResult<Literal> {
    let (rest, lhs) = term(input)?;
    let (rest, equation) = opt(tuple((ws(equality_operator), term)))(rest)?;
    match (lhs, equation) {
        (lhs, Some((negated, rhs))) => Ok((rest, Literal::equation(lhs, rhs, negated))),
        (Term::Variable(_), None) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        ))),
        (atom, None) => Ok((rest, Literal::new(atom, false))),
    }
}

fn cnf_literal(input: &str) -> PResult<Literal> {
    ws(alt((
        map(preceded(ws(char('~')), atomic_literal), |l| l.negate()),
        atomic_literal,
    )))(input)
}

fn disjunction(input: &str) -> PResult<Vec<Literal>> {
    separated_list1(char('|'), cnf_literal)(input)
}

/// A clause body, optionally parenthesized
pub fn cnf_formula(input: &str) -> PResult<Vec<Literal>> {
    alt((delimited(ws(char('(')), cnf_formula, ws(char(')'))), disjunction))(input)
}

/// Non-associative binary connectives
fn nonassoc_connective(input: &str) -> PResult<Connective> {
    alt((
        value(Connective::Equiv, tag("<=>")),
        value(Connective::Xor, tag("<~>")),
        value(Connective::Implies, tag("=>")),
        value(Connective::ReverseImplies, tag("<=")),
    ))(input)
}

/// `A <op> B` binds weakest, then `|` and `~|`, then `&` and `~&`
pub fn fof_formula(input: &str) -> PResult<Formula> {
    let (input, lhs) = fof_or(input)?;
    let (input, rest) = opt(pair(ws(nonassoc_connective), fof_or))(input)?;
    Ok(match rest {
        Some((op, rhs)) => (input, Formula::binary(op, lhs, rhs)),
        None => (input, lhs),
    })
}

fn fof_or(input: &str) -> PResult<Formula> {
    let (input, first) = fof_and(input)?;
    let op = alt((value(Connective::Nor, tag("~|")), value(Connective::Or, char('|'))));
    fold_many0(
        pair(ws(op), fof_and),
        move || first.clone(),
        |lhs, (op, rhs)| Formula::binary(op, lhs, rhs),
    )(input)
}

fn fof_and(input: &str) -> PResult<Formula> {
    let (input, first) = fof_unit(input)?;
    let op = alt((value(Connective::Nand, tag("~&")), value(Connective::And, char('&'))));
    fold_many0(
        pair(ws(op), fof_unit),
        move || first.clone(),
        |lhs, (op, rhs)| Formula::binary(op, lhs, rhs),
    )(input)
}

fn fof_unit(input: &str) -> PResult<Formula> {
    ws(alt((
        map(preceded(char('~'), fof_unit), |f| match f {
            Formula::Literal(lit) => Formula::Literal(lit.negate()),
            f => Formula::negation(f),
        }),
        fof_quantified,
        delimited(char('('), fof_formula, char(')')),
        map(atomic_literal, Formula::Literal),
    )))(input)
}

fn fof_quantified(input: &str) -> PResult<Formula> {
    let (input, q) = alt((
        value(Quantifier::Forall, char('!')),
        value(Quantifier::Exists, char('?')),
    ))(input)?;
    let (input, vars) = delimited(
        ws(char('[')),
        separated_list1(ws(char(',')), upper_word),
        ws(char(']')),
    )(input)?;
    let (input, _) = char(':')(input)?;
    let (input, body) = fof_unit(input)?;
    let formula = vars
        .into_iter()
        .rev()
        .fold(body, |body, var| Formula::quantified(q, Variable::new(var), body));
    Ok((input, formula))
}

fn general_list(input: &str) -> PResult<()> {
    value(
        (),
        delimited(
            ws(char('[')),
            separated_list0(ws(char(',')), general_term),
            ws(char(']')),
        ),
    )(input)
}

fn general_data(input: &str) -> PResult<()> {
    value(
        (),
        alt((
            atomic_word,
            map(upper_word, String::from),
            map(dollar_word, String::from),
            map(integer, String::from),
            distinct_object,
        )),
    )(input)
}

/// Annotation terms are checked for shape and discarded
fn general_term(input: &str) -> PResult<()> {
    ws(alt((
        general_list,
        value(
            (),
            tuple((
                general_data,
                opt(delimited(
                    ws(char('(')),
                    separated_list1(ws(char(',')), general_term),
                    char(')'),
                )),
                opt(preceded(ws(char(':')), general_term)),
            )),
        ),
    )))(input)
}

fn annotations(input: &str) -> PResult<()> {
    value(
        (),
        opt(pair(
            preceded(ws(char(',')), general_term),
            opt(preceded(ws(char(',')), general_term)),
        )),
    )(input)
}

fn role(input: &str) -> PResult<&str> {
    ws(lower_word)(input)
}

fn statement_head<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> PResult<'a, (String, &'a str)> {
    move |input| {
        let (input, _) = tuple((ws(tag(keyword)), char('(')))(input)?;
        let (input, name) = ws(name)(input)?;
        let (input, _) = char(',')(input)?;
        let (input, role) = role(input)?;
        let (input, _) = char(',')(input)?;
        Ok((input, (name, role)))
    }
}

fn statement_tail(input: &str) -> PResult<()> {
    value((), tuple((annotations, ws(char(')')), char('.'), multispace0)))(input)
}

fn cnf_statement(input: &str) -> PResult<TptpStatement> {
    let (input, (name, role)) = statement_head("cnf")(input)?;
    let (input, literals) = cnf_formula(input)?;
    let (input, _) = statement_tail(input)?;
    let clause = Clause::with_type(literals, ClauseType::from_tptp_role(role)).named(name);
    Ok((input, TptpStatement::Cnf(clause)))
}

fn fof_statement(input: &str) -> PResult<TptpStatement> {
    let (input, (name, role)) = statement_head("fof")(input)?;
    let (input, formula) = ws(fof_formula)(input)?;
    let (input, _) = statement_tail(input)?;
    let role = ClauseType::from_tptp_role(role);
    Ok((input, TptpStatement::Fof(NamedFormula::new(name, role, formula))))
}

fn include_statement(input: &str) -> PResult<TptpStatement> {
    let (input, _) = tuple((ws(tag("include")), char('(')))(input)?;
    let (input, file) = ws(single_quoted)(input)?;
    let (input, selection) = opt(preceded(
        char(','),
        delimited(
            ws(char('[')),
            separated_list0(ws(char(',')), ws(name)),
            ws(char(']')),
        ),
    ))(input)?;
    let (input, _) = tuple((ws(char(')')), char('.'), multispace0))(input)?;
    Ok((input, TptpStatement::Include { file, selection }))
}

/// Parse one complete statement
pub fn statement(input: &str) -> PResult<TptpStatement> {
    all_consuming(alt((cnf_statement, fof_statement, include_statement)))(input)
}

/// The keyword a statement starts with, e.g. `cnf`
pub fn statement_keyword(input: &str) -> Option<&str> {
    lower_word(input.trim_start()).ok().map(|(_, word)| word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TptpStatement {
        statement(input).unwrap().1
    }

    fn clause(input: &str) -> Clause {
        match parse(input) {
            TptpStatement::Cnf(c) => c,
            other => panic!("expected cnf, got {:?}", other),
        }
    }

    fn formula(input: &str) -> NamedFormula {
        match parse(input) {
            TptpStatement::Fof(f) => f,
            other => panic!("expected fof, got {:?}", other),
        }
    }

    #[test]
    fn test_cnf_clause() {
        let c = clause("cnf(c_1, axiom, ~p(X, f(a)) | X = b | g(X) != a).");
        assert_eq!(c.name, "c_1");
        assert_eq!(c.clause_type, ClauseType::Axiom);
        assert_eq!(c.literals_string(), "~p(X,f(a))|X=b|g(X)!=a");
    }

    #[test]
    fn test_cnf_roles_and_names() {
        let c = clause("cnf('quoted name', negated_conjecture, (q)).");
        assert_eq!(c.name, "quoted name");
        assert_eq!(c.clause_type, ClauseType::NegatedConjecture);
        let c = clause("cnf(42, hypothesis, p).");
        assert_eq!(c.name, "42");
        assert_eq!(c.clause_type, ClauseType::Axiom);
    }

    #[test]
    fn test_cnf_with_annotations() {
        let c = clause("cnf(c3, plain, p(a), inference(resolution, [status(thm)], [c1, c2])).");
        assert_eq!(c.literals_string(), "p(a)");
        let c = clause("cnf(c4, axiom, p(a), file('SYN000-1.p', ax), [description('x')]).");
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_false_clause() {
        let c = clause("cnf(empty, plain, $false).");
        assert_eq!(c.len(), 1);
        assert!(c.literals[0].is_false_constant());
    }

    #[test]
    fn test_fof_precedence() {
        let f = formula("fof(f, axiom, a | b & c => d).");
        assert_eq!(f.formula.to_string(), "((a|(b&c))=>d)");
        let f = formula("fof(f, axiom, a & b & c).");
        assert_eq!(f.formula.to_string(), "((a&b)&c)");
        let f = formula("fof(f, axiom, ~a | ~ (b <~> c)).");
        assert_eq!(f.formula.to_string(), "(~a|~((b<~>c)))");
    }

    #[test]
    fn test_fof_quantifiers() {
        let f = formula("fof(ax, axiom, ![X, Y]: (p(X) => ?[Z]: r(X, Y, Z))).");
        assert_eq!(f.formula.to_string(), "![X]:![Y]:(p(X)=>?[Z]:r(X,Y,Z))");
        let f = formula("fof(goal, conjecture, ? [X] : X != a).");
        assert_eq!(f.role, ClauseType::Conjecture);
        assert_eq!(f.formula.to_string(), "?[X]:X!=a");
    }

    #[test]
    fn test_equality_is_not_implication() {
        let f = formula("fof(f, axiom, a = b => b = a).");
        assert_eq!(f.formula.to_string(), "(a=b=>b=a)");
        let f = formula("fof(f, axiom, p <= q).");
        assert_eq!(f.formula.to_string(), "(p<=q)");
    }

    #[test]
    fn test_include() {
        assert_eq!(
            parse("include('Axioms/SET001-0.ax')."),
            TptpStatement::Include {
                file: "Axioms/SET001-0.ax".to_string(),
                selection: None
            }
        );
        assert_eq!(
            parse("include('ax.p', [a1, a2])."),
            TptpStatement::Include {
                file: "ax.p".to_string(),
                selection: Some(vec!["a1".to_string(), "a2".to_string()])
            }
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(statement("cnf(c, axiom, p(X).").is_err());
        assert!(statement("cnf(c, axiom, X).").is_err());
        assert!(statement("fof(f, axiom, (a & b).").is_err());
        assert_eq!(statement_keyword("  tff(x, type, a)."), Some("tff"));
    }
}
