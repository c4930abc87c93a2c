use crate::{Clause, Literal};
use anyhow::{anyhow, Result};
use itertools::Itertools;
use std::{io::Write, str::SplitWhitespace};

pub(crate) fn expect_usize(words: &mut SplitWhitespace, what: &str) -> Result<usize> {
    match words.next() {
        Some(s) => match str::parse::<usize>(s) {
            Ok(n) => Ok(n),
            Err(_) => Err(anyhow!(r#"expected {}, got "{}""#, what, s)),
        },
        None => Err(anyhow!(r#"expected {}, got end of line"#, what)),
    }
}

pub(crate) fn expect_eol(words: &mut SplitWhitespace, what: &str) -> Result<()> {
    if let Some(s) = words.next() {
        Err(anyhow!(r#"expected end of line, got {} "{}""#, what, s))
    } else {
        Ok(())
    }
}

/// Reads a preamble line of the form `p <kind> <n_vars> <n>`, the first word being already consumed.
pub(crate) fn read_preamble(
    words: &mut SplitWhitespace,
    preamble_data: &mut Option<(usize, usize)>,
    kind: &str,
    what: &str,
) -> Result<()> {
    if preamble_data.is_some() {
        return Err(anyhow!("got a second preamble line"));
    }
    match words.next() {
        Some(s) if s == kind => Ok(()),
        Some(s) => Err(anyhow!(
            r#"expected "{}" as second word, got "{}""#,
            kind,
            s
        )),
        None => Err(anyhow!(r#"expected "{}", got end of line"#, kind)),
    }?;
    let n_vars = expect_usize(words, "a number of variables as third word")?;
    let n = expect_usize(words, &format!("{} as fourth word", what))?;
    expect_eol(words, "a fifth word")?;
    *preamble_data = Some((n_vars, n));
    Ok(())
}

pub(crate) fn assert_preamble_is_present(preamble_data: &Option<(usize, usize)>) -> Result<()> {
    if preamble_data.is_none() {
        Err(anyhow!("preamble has not been defined"))
    } else {
        Ok(())
    }
}

fn expect_literal_or_zero(words: &mut SplitWhitespace, n_vars: usize) -> Result<Literal> {
    match words.next() {
        Some(word) => match str::parse::<Literal>(word) {
            Ok(n) => {
                if n.unsigned_abs() <= n_vars {
                    Ok(n)
                } else {
                    Err(anyhow!(
                        r#"literal {} has a variable index higher than the number of variables"#,
                        n
                    ))
                }
            }
            Err(_) => Err(anyhow!(r#"expected a literal, got "{}""#, word)),
        },
        None => Err(anyhow!(r#"expected a literal or 0, got end of line"#)),
    }
}

/// Reads a sequence of literals ended by 0, which must also end the line.
pub(crate) fn read_clause(words: &mut SplitWhitespace, n_vars: usize) -> Result<Clause> {
    let mut clause = Vec::new();
    loop {
        let l = expect_literal_or_zero(words, n_vars)?;
        if l == 0 {
            break;
        }
        clause.push(l);
    }
    expect_eol(words, "something after 0")?;
    Ok(clause)
}

/// Writes a line made of an optional prefix word and the literals of a clause, ended by 0.
pub(crate) fn write_clause(
    writer: &mut dyn Write,
    prefix: Option<&str>,
    clause: &[Literal],
) -> std::io::Result<()> {
    let literals = clause.iter().map(Literal::to_string);
    let words = prefix
        .map(str::to_string)
        .into_iter()
        .chain(literals)
        .chain(std::iter::once("0".to_string()));
    writeln!(writer, "{}", words.format(" "))
}
