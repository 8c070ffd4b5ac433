use winnow::ascii::till_line_ending;
use winnow::combinator::{alt, cut_err, delimited, fail, not, opt, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use crate::{Combinator, Condition, FieldRef, Operand, Operator, Predicate, Term};

const KEYWORDS: [&str; 6] = ["AND", "and", "OR", "or", "in", "is"];

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// A word that must not run straight into another word character.
fn keyword<'i>(word: &'static str) -> impl Parser<&'i str, &'i str, ErrMode<ContextError>> {
    terminated(word, not(one_of(is_word_char)))
}

// -- Identifiers ------------------------------------------------------------

fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn path<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_word_char).parse_next(input)
}

// -- Raw spans --------------------------------------------------------------

fn skip_quoted(input: &mut &str, quote: char) -> ModalResult<()> {
    loop {
        match cut_err(any).parse_next(input)? {
            '\\' => {
                cut_err(any).parse_next(input)?;
            }
            c if c == quote => return Ok(()),
            _ => {}
        }
    }
}

fn quoted(input: &mut &str) -> ModalResult<()> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    skip_quoted(input, quote)
}

/// Skips a bracketed span kept verbatim. References inside it would never be
/// resolved, so `$name` and `@name` outside quotes are rejected. Path
/// interpolation such as `$(database)` passes through.
fn skip_balanced(input: &mut &str, mut open: char, close: char) -> ModalResult<()> {
    open.parse_next(input)?;
    let mut depth = 1usize;
    while depth > 0 {
        match cut_err(any).parse_next(input)? {
            '"' => skip_quoted(input, '"')?,
            '\'' => skip_quoted(input, '\'')?,
            '$' | '@' if input.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') => {
                return cut_err(fail)
                    .context(StrContext::Label("field reference inside a raw expression"))
                    .parse_next(input);
            }
            c if c == open => depth += 1,
            c if c == close => depth -= 1,
            _ => {}
        }
    }
    Ok(())
}

fn bracketed(input: &mut &str) -> ModalResult<()> {
    skip_balanced(input, '[', ']')
}

fn call_args(input: &mut &str) -> ModalResult<()> {
    skip_balanced(input, '(', ')')
}

fn call_suffixes(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(0.., (call_args, take_while(0.., is_word_char)).void())
        .parse_next(input)?;
    Ok(())
}

/// Identifiers, dotted paths, numbers and calls such as `f(x).y`.
fn bare_token<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        opt('!'),
        opt('-'),
        take_while(0.., is_word_char),
        call_suffixes,
    )
        .take()
        .verify(|s: &str| {
            let body = s.trim_start_matches(['!', '-']);
            !body.is_empty()
                && (body.len() < s.len() || !body.starts_with('('))
                && !KEYWORDS.contains(&s)
        })
        .parse_next(input)
}

// -- Operands ---------------------------------------------------------------

fn field_ref(input: &mut &str) -> ModalResult<Operand> {
    preceded('$', cut_err(name))
        .map(|n| Operand::Field(FieldRef::from_name(n)))
        .parse_next(input)
}

fn lookup(input: &mut &str) -> ModalResult<Operand> {
    '@'.parse_next(input)?;
    let via = cut_err(name).parse_next(input)?;
    cut_err('.').parse_next(input)?;
    let attribute = cut_err(path)
        .context(StrContext::Expected(StrContextValue::Description(
            "attribute",
        )))
        .parse_next(input)?;
    Ok(Operand::Lookup {
        via: FieldRef::from_name(via),
        attribute: attribute.to_owned(),
    })
}

fn operand(input: &mut &str) -> ModalResult<Operand> {
    ws.parse_next(input)?;
    alt((
        field_ref,
        lookup,
        quoted.take().map(Operand::from),
        bracketed.take().map(Operand::from),
        bare_token.map(Operand::from),
    ))
    .context(StrContext::Expected(StrContextValue::Description("operand")))
    .parse_next(input)
}

// -- Operators --------------------------------------------------------------

fn operator(input: &mut &str) -> ModalResult<Operator> {
    ws.parse_next(input)?;
    alt((
        "==".value(Operator::Eq),
        "!=".value(Operator::Neq),
        "<=".value(Operator::Lte),
        "<".value(Operator::Lt),
        ">=".value(Operator::Gte),
        ">".value(Operator::Gt),
        keyword("array-contains-any").value(Operator::ArrayContainsAny),
        keyword("array-contains").value(Operator::ArrayContains),
        keyword("not-in").value(Operator::NotIn),
        keyword("in").value(Operator::In),
        keyword("is").value(Operator::Is),
    ))
    .parse_next(input)
}

// -- Expressions (precedence: OR < AND < term) ------------------------------

fn term(input: &mut &str) -> ModalResult<Term> {
    let left = operand.parse_next(input)?;
    let checkpoint = input.checkpoint();
    if let Ok(op) = operator.parse_next(input) {
        let right = cut_err(operand).parse_next(input)?;
        return Ok(Term::Condition(Condition::new(left, op, right)));
    }
    input.reset(&checkpoint);
    match left {
        Operand::Literal(expr) => Ok(Term::Literal(expr)),
        // A field reference on its own has no truth value.
        _ => Err(ErrMode::from_input(input).cut()),
    }
}

fn primary(input: &mut &str) -> ModalResult<Term> {
    ws.parse_next(input)?;
    alt((delimited('(', expr, (ws, cut_err(')'))), term))
        .context(StrContext::Expected(StrContextValue::Description(
            "expression",
        )))
        .parse_next(input)
}

fn chain(combinator: Combinator, first: Term, rest: Vec<Term>) -> Term {
    if rest.is_empty() {
        return first;
    }
    let mut terms = Vec::with_capacity(rest.len() + 1);
    terms.push(first);
    terms.extend(rest);
    Term::Predicate(Predicate { combinator, terms })
}

fn and_expr(input: &mut &str) -> ModalResult<Term> {
    let first = primary(input)?;
    let rest: Vec<Term> = repeat(
        0..,
        preceded((ws, alt((keyword("AND"), keyword("and"), "&&"))), cut_err(primary)),
    )
    .parse_next(input)?;
    Ok(chain(Combinator::And, first, rest))
}

fn or_expr(input: &mut &str) -> ModalResult<Term> {
    let first = and_expr(input)?;
    let rest: Vec<Term> = repeat(
        0..,
        preceded((ws, alt((keyword("OR"), keyword("or"), "||"))), cut_err(and_expr)),
    )
    .parse_next(input)?;
    Ok(chain(Combinator::Or, first, rest))
}

fn expr(input: &mut &str) -> ModalResult<Term> {
    ws.parse_next(input)?;
    or_expr(input)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_predicate(input: &mut &str) -> ModalResult<Predicate> {
    let term = cut_err(expr)
        .context(StrContext::Expected(StrContextValue::Description(
            "predicate",
        )))
        .parse_next(input)?;
    ws.parse_next(input)?;

    Ok(match term {
        Term::Predicate(p) => p,
        other => Predicate {
            combinator: Combinator::And,
            terms: vec![other],
        },
    })
}
