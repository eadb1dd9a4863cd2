//! Reading and writing `system/decomposeParDict`.

use std::fs;
use std::path::Path;

use crate::io::foam_text::{Token, foam_header, skip_block, strip_comments, tokenize};
use crate::mesh_error::MeshRemapError;

pub const DECOMPOSE_PAR_DICT: &str = "system/decomposeParDict";
pub const NUMBER_OF_SUBDOMAINS: &str = "numberOfSubdomains";

/// Value tokens of the top-level entry `keyword`, up to its `;`.
///
/// Nested `{}` blocks, including the `FoamFile` header, are skipped.
pub fn top_level_entry(text: &str, keyword: &str) -> Option<Vec<String>> {
    let tokens = tokenize(&strip_comments(text));
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            Token::Punct('{') => {
                i = skip_block(&tokens, i)?;
            }
            Token::Word(w) if w == keyword && !matches!(tokens.get(i + 1), Some(Token::Punct('{'))) => {
                let mut values = Vec::new();
                for tok in &tokens[i + 1..] {
                    match tok {
                        Token::Punct(';') => return Some(values),
                        Token::Word(v) => values.push(v.clone()),
                        Token::Punct(c) => values.push(c.to_string()),
                    }
                }
                return None;
            }
            _ => i += 1,
        }
    }
    None
}

/// `numberOfSubdomains` of the decomposed case at `case_root`.
pub fn read_number_of_subdomains(case_root: impl AsRef<Path>) -> Result<usize, MeshRemapError> {
    let path = case_root.as_ref().join(DECOMPOSE_PAR_DICT);
    let text = fs::read_to_string(&path).map_err(|e| MeshRemapError::io(&path, e))?;
    let values = top_level_entry(&text, NUMBER_OF_SUBDOMAINS).ok_or_else(|| {
        MeshRemapError::MissingKeyword {
            path: path.clone(),
            keyword: NUMBER_OF_SUBDOMAINS.into(),
        }
    })?;
    match values.as_slice() {
        [n] => n.parse::<usize>().map_err(|_| MeshRemapError::DictionaryParse {
            path,
            message: format!("{NUMBER_OF_SUBDOMAINS} `{n}` is not a non-negative integer"),
        }),
        other => Err(MeshRemapError::DictionaryParse {
            path,
            message: format!("{NUMBER_OF_SUBDOMAINS} expects one value, found {other:?}"),
        }),
    }
}

/// Write a minimal `decomposeParDict` declaring `n` subdomains.
pub fn write_decompose_par_dict(
    case_root: impl AsRef<Path>,
    n: usize,
) -> Result<(), MeshRemapError> {
    let path = case_root.as_ref().join(DECOMPOSE_PAR_DICT);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| MeshRemapError::io(parent, e))?;
    }
    let mut text = foam_header("dictionary", "decomposeParDict");
    text.push_str(&format!("{NUMBER_OF_SUBDOMAINS} {n};\n\nmethod          manual;\n"));
    fs::write(&path, text).map_err(|e| MeshRemapError::io(&path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICT: &str = r#"
FoamFile
{
    version 2.0;
    object  decomposeParDict;
    numberOfSubdomains 99;
}
// numberOfSubdomains 7;
numberOfSubdomains  4;
method          simple;
simpleCoeffs
{
    n               (2 2 1);
    numberOfSubdomains 12;
}
"#;

    #[test]
    fn reads_top_level_entry_only() {
        assert_eq!(
            top_level_entry(DICT, NUMBER_OF_SUBDOMAINS),
            Some(vec!["4".to_string()])
        );
        assert_eq!(top_level_entry(DICT, "method"), Some(vec!["simple".to_string()]));
        assert_eq!(top_level_entry(DICT, "missing"), None);
    }

    #[test]
    fn dictionary_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_decompose_par_dict(dir.path(), 3).unwrap();
        assert_eq!(read_number_of_subdomains(dir.path()).unwrap(), 3);
    }

    #[test]
    fn configuration_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_number_of_subdomains(dir.path()),
            Err(MeshRemapError::MissingFile(_))
        ));

        fs::create_dir_all(dir.path().join("system")).unwrap();
        let path = dir.path().join(DECOMPOSE_PAR_DICT);
        fs::write(&path, "method simple;").unwrap();
        assert!(matches!(
            read_number_of_subdomains(dir.path()),
            Err(MeshRemapError::MissingKeyword { .. })
        ));

        fs::write(&path, "numberOfSubdomains four;").unwrap();
        assert!(matches!(
            read_number_of_subdomains(dir.path()),
            Err(MeshRemapError::DictionaryParse { .. })
        ));
    }
}
