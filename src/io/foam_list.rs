//! ASCII label lists: `N ( v0 v1 ... )`.
//!
//! Used for partition addressing, decomposition maps and the membership
//! list. An optional `FoamFile { ... }` header is skipped on read and
//! always written. The uniform form `N{v}` is accepted on read.

use std::fs;
use std::path::Path;

use crate::io::foam_text::{Token, foam_header, skip_block, strip_comments, tokenize};
use crate::mesh_error::MeshRemapError;
use crate::topology::addressing::Label;

fn parse_err(message: impl Into<String>) -> MeshRemapError {
    MeshRemapError::ListParse(message.into())
}

fn parse_label(tok: Option<&Token>) -> Result<Label, MeshRemapError> {
    match tok {
        Some(Token::Word(w)) => w
            .parse::<Label>()
            .map_err(|_| parse_err(format!("`{w}` is not an integer"))),
        Some(other) => Err(parse_err(format!("expected an integer, found {other}"))),
        None => Err(parse_err("unexpected end of list")),
    }
}

fn expect(tok: Option<&Token>, c: char) -> Result<(), MeshRemapError> {
    match tok {
        Some(Token::Punct(p)) if *p == c => Ok(()),
        Some(other) => Err(parse_err(format!("expected `{c}`, found {other}"))),
        None => Err(parse_err(format!("expected `{c}`, found end of list"))),
    }
}

/// Parse a label list from text.
pub fn parse_label_list(text: &str) -> Result<Vec<Label>, MeshRemapError> {
    let tokens = tokenize(&strip_comments(text));
    let mut pos = 0;
    if matches!(tokens.first(), Some(Token::Word(w)) if w == "FoamFile") {
        pos = skip_block(&tokens, 1).ok_or_else(|| parse_err("unterminated FoamFile header"))?;
    }
    let mut it = tokens[pos..].iter().peekable();

    // unsized form `( ... )`
    if matches!(it.peek(), Some(Token::Punct('('))) {
        it.next();
        let mut values = Vec::new();
        loop {
            match it.next() {
                Some(Token::Punct(')')) => return Ok(values),
                tok => values.push(parse_label(tok)?),
            }
        }
    }

    let count = parse_label(it.next())?;
    let count = usize::try_from(count).map_err(|_| parse_err(format!("negative list size {count}")))?;
    match it.next() {
        Some(Token::Punct('(')) => {
            // never reserve more than the tokens left can fill
            let mut values = Vec::with_capacity(count.min(it.len()));
            for _ in 0..count {
                values.push(parse_label(it.next())?);
            }
            match it.next() {
                Some(Token::Punct(')')) => Ok(values),
                Some(Token::Word(_)) => Err(parse_err(format!(
                    "list declares {count} entries but holds more"
                ))),
                tok => {
                    expect(tok, ')')?;
                    Ok(values)
                }
            }
        }
        Some(Token::Punct('{')) => {
            let value = parse_label(it.next())?;
            expect(it.next(), '}')?;
            let mut values = Vec::new();
            values
                .try_reserve_exact(count)
                .map_err(|_| parse_err(format!("uniform list of {count} entries is too large")))?;
            values.resize(count, value);
            Ok(values)
        }
        // `0` alone is an empty list
        None if count == 0 => Ok(Vec::new()),
        tok => {
            expect(tok, '(')?;
            Ok(Vec::new())
        }
    }
}

/// Render a label list with header, one value per line.
pub fn format_label_list(values: &[Label], object: &str) -> String {
    let mut out = foam_header("labelList", object);
    out.push_str(&format!("{}\n(\n", values.len()));
    for v in values {
        out.push_str(&v.to_string());
        out.push('\n');
    }
    out.push_str(")\n");
    out
}

/// Read and parse a label list file.
pub fn read_label_list(path: impl AsRef<Path>) -> Result<Vec<Label>, MeshRemapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| MeshRemapError::io(path, e))?;
    parse_label_list(&text).map_err(|e| match e {
        MeshRemapError::ListParse(msg) => {
            MeshRemapError::ListParse(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Write a label list file, creating parent directories.
pub fn write_label_list(path: impl AsRef<Path>, values: &[Label]) -> Result<(), MeshRemapError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MeshRemapError::io(parent, e))?;
    }
    let object = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(path, format_label_list(values, &object)).map_err(|e| MeshRemapError::io(path, e))
}
