// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parse interactive examples out of docstrings and text files.
//!
//! An example starts at a `>>> ` prompt, continues over `... ` lines and is
//! followed by its expected output, which runs until a blank line or the
//! next prompt:
//! ```text
//! >>> total = 0
//! >>> for i in range(3):
//! ...     total += i
//! >>> total
//! 3
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ParseError;
use crate::example::{Example, ExampleBlock};

const PS1: &str = ">>>";
const PS2: &str = "...";
const TAB_SIZE: usize = 8;

/// Parse `text` into a block named `name`.
pub fn parse_block(
    text: &str,
    globs: BTreeMap<String, String>,
    name: &str,
    filename: Option<&Path>,
    lineno: usize,
) -> Result<ExampleBlock, ParseError> {
    Ok(ExampleBlock {
        name: name.to_string(),
        filename: filename.map(Path::to_path_buf),
        lineno,
        docstring: text.to_string(),
        examples: parse_examples(text, name)?,
        globs,
    })
}

/// Extract every example in `text`. `name` is only used in errors.
pub fn parse_examples(text: &str, name: &str) -> Result<Vec<Example>, ParseError> {
    let text = expand_tabs(text);
    let lines: Vec<&str> = text.split('\n').collect();
    let mut examples = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let indent = leading_spaces(lines[i]);
        let first = &lines[i][indent..];
        if !first.starts_with(PS1) {
            i += 1;
            continue;
        }

        let start = i;
        check_prompt_blank(first, PS1, name, i)?;
        let mut source = vec![strip_prompt(first)];
        i += 1;

        // Continuation lines
        while i < lines.len() {
            let line = lines[i];
            let rest = line.trim_start_matches(' ');
            if !rest.starts_with(PS2) {
                break;
            }
            if leading_spaces(line) != indent {
                return Err(inconsistent(name, i, line));
            }
            check_prompt_blank(rest, PS2, name, i)?;
            source.push(strip_prompt(rest));
            i += 1;
        }

        // Expected output: non-blank lines that don't start a new example
        let mut want = Vec::new();
        while i < lines.len() {
            let line = lines[i];
            if line.trim().is_empty() || line.trim_start_matches(' ').starts_with(PS1) {
                break;
            }
            if leading_spaces(line) < indent {
                return Err(inconsistent(name, i, line));
            }
            want.push(&line[indent..]);
            i += 1;
        }

        if is_blank_or_comment(&source) {
            continue;
        }

        examples.push(Example {
            source: format!("{}\n", source.join("\n")),
            want: if want.is_empty() {
                String::new()
            } else {
                format!("{}\n", want.join("\n"))
            },
            lineno: start,
            indent,
        });
    }

    Ok(examples)
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// A prompt must be followed by a space unless it ends the line.
fn check_prompt_blank(
    rest: &str,
    prompt: &'static str,
    name: &str,
    line: usize,
) -> Result<(), ParseError> {
    match rest.as_bytes().get(prompt.len()) {
        None | Some(b' ') => Ok(()),
        Some(_) => Err(ParseError::LacksBlank {
            name: name.to_string(),
            line: line + 1,
            prompt,
            text: rest.to_string(),
        }),
    }
}

fn strip_prompt(rest: &str) -> &str {
    rest.get(PS1.len() + 1..).unwrap_or("")
}

fn inconsistent(name: &str, line: usize, text: &str) -> ParseError {
    ParseError::InconsistentIndent {
        name: name.to_string(),
        line: line + 1,
        text: text.to_string(),
    }
}

/// Examples whose source is only blanks and comments are dropped.
fn is_blank_or_comment(source: &[&str]) -> bool {
    source.iter().all(|line| {
        let t = line.trim();
        t.is_empty() || t.starts_with('#')
    })
}

fn expand_tabs(text: &str) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut col = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - col % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                col += pad;
            }
            '\n' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_example() {
        let examples = parse_examples(">>> 1+1\n2\n", "t").unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].source, "1+1\n");
        assert_eq!(examples[0].want, "2\n");
        assert_eq!(examples[0].lineno, 0);
    }

    #[test]
    fn test_indented_docstring() {
        let doc = "Add things.\n\n    >>> total = 0\n    >>> for i in range(3):\n    ...     total += i\n    >>> total\n    3\n    ";
        let examples = parse_examples(doc, "m.f").unwrap();
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[0].want, "");
        assert_eq!(examples[1].source, "for i in range(3):\n    total += i\n");
        assert_eq!(examples[2].source, "total\n");
        assert_eq!(examples[2].want, "3\n");
        assert_eq!(examples[2].lineno, 5);
        assert_eq!(examples[2].indent, 4);
    }

    #[test]
    fn test_no_examples() {
        assert!(parse_examples("Just prose.\n\nNothing to run.", "m").unwrap().is_empty());
        assert!(parse_examples(">>> # only a comment\n", "m").unwrap().is_empty());
    }

    #[test]
    fn test_output_stops_at_blank_line() {
        let examples = parse_examples(">>> print('a')\na\n\nmore prose\n", "m").unwrap();
        assert_eq!(examples[0].want, "a\n");
    }

    #[test]
    fn test_lacks_blank() {
        let err = parse_examples(">>>1+1\n2\n", "m.f").unwrap_err();
        assert_eq!(
            err,
            ParseError::LacksBlank {
                name: "m.f".into(),
                line: 1,
                prompt: ">>>",
                text: ">>>1+1".into(),
            }
        );
        assert!(err.to_string().contains("lacks blank after >>>"));
    }

    #[test]
    fn test_inconsistent_indent() {
        let err = parse_examples("    >>> x = [1,\n  ... 2]\n", "m").unwrap_err();
        assert!(matches!(err, ParseError::InconsistentIndent { line: 2, .. }));

        let err = parse_examples("    >>> x\n  1\n", "m").unwrap_err();
        assert!(matches!(err, ParseError::InconsistentIndent { line: 2, .. }));
    }

    #[test]
    fn test_tabs_expand() {
        let examples = parse_examples("\t>>> 1\n\t1\n", "m").unwrap();
        assert_eq!(examples[0].indent, 8);
        assert_eq!(examples[0].want, "1\n");
    }

    #[test]
    fn test_parse_block() {
        let block = parse_block(">>> 1\n1\n", BTreeMap::new(), "guide.txt", Some(Path::new("docs/guide.txt")), 0).unwrap();
        assert_eq!(block.name, "guide.txt");
        assert_eq!(block.filename.as_deref(), Some(Path::new("docs/guide.txt")));
        assert_eq!(block.examples.len(), 1);
    }
}
