//! Fact records and the facts-file line grammar.
//!
//! A facts file is a flat list of declarations, one per line, in the shape
//! `keyword(arg1, arg2[, arg3])`. The original corpus uses Spanish keywords
//! (`es_un`, `instancia`, `atributo`); the English spellings are accepted as
//! aliases. Blank lines and `#` comments are skipped.
//!
//! Parsing is strict: any non-blank, non-comment line that does not match the
//! grammar (or carries the wrong argument count) fails the whole load with a
//! line-numbered diagnostic. The network core never sees malformed input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FactError;

static FACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(es_un|is_a|instancia|instance|atributo|attribute)\s*\((.+)\)\s*$").unwrap()
});

/// One validated declaration from a facts file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    /// `es_un(child, parent)`: child is a subclass of parent.
    IsA { child: String, parent: String },
    /// `instancia(instance, class)`: instance belongs to class.
    InstanceOf { instance: String, class: String },
    /// `atributo(entity, name, value)`: direct attribute assertion.
    Attribute {
        entity: String,
        name: String,
        value: String,
    },
}

/// Parse one line of a facts file.
///
/// Returns `Ok(None)` for blank and comment lines. `line_no` is 1-based and
/// only used for error reporting.
pub fn parse_fact(line: &str, line_no: usize) -> Result<Option<Fact>, FactError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let caps = FACT_RE.captures(line).ok_or_else(|| FactError::InvalidLine {
        line_no,
        content: line.to_string(),
    })?;
    let keyword = &caps[1];
    let args: Vec<&str> = caps[2].split(',').map(str::trim).collect();

    let expect = |n: usize| -> Result<(), FactError> {
        if args.len() == n {
            Ok(())
        } else {
            Err(FactError::WrongArity {
                keyword: keyword.to_string(),
                expected: n,
                got: args.len(),
                line_no,
                content: line.to_string(),
            })
        }
    };

    let fact = match keyword {
        "es_un" | "is_a" => {
            expect(2)?;
            Fact::IsA {
                child: args[0].to_string(),
                parent: args[1].to_string(),
            }
        }
        "instancia" | "instance" => {
            expect(2)?;
            Fact::InstanceOf {
                instance: args[0].to_string(),
                class: args[1].to_string(),
            }
        }
        _ => {
            expect(3)?;
            Fact::Attribute {
                entity: args[0].to_string(),
                name: args[1].to_string(),
                value: args[2].to_string(),
            }
        }
    };
    Ok(Some(fact))
}

/// Parse a whole facts text, failing on the first malformed line.
pub fn parse_facts(text: &str) -> Result<Vec<Fact>, FactError> {
    let mut facts = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(fact) = parse_fact(line, idx + 1)? {
            facts.push(fact);
        }
    }
    Ok(facts)
}
