use thiserror::Error;

/// One instruction of an `.svec` script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init(Vec<i64>),
    Fill(usize, i64),
    Push(i64),
    Pop,
    Insert(usize, i64),
    Erase(usize),
    Reserve(usize),
    Resize(usize),
    Clear,
    At(usize),
    Show,
    Dump,
    Len,
    Capacity,
    Empty,
}

/// A command together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

peg::parser!(pub grammar parser() for str {
    use super::Command;

    pub rule command() -> Command
        = _ c:instruction() _ { c }

    rule instruction() -> Command
        = "init" values:(__ v:integer() { v })* { Command::Init(values) }
        / "fill" __ n:size() __ v:integer() { Command::Fill(n, v) }
        / "push" __ v:integer() { Command::Push(v) }
        / "pop" { Command::Pop }
        / "insert" __ i:size() __ v:integer() { Command::Insert(i, v) }
        / "erase" __ i:size() { Command::Erase(i) }
        / "reserve" __ n:size() { Command::Reserve(n) }
        / "resize" __ n:size() { Command::Resize(n) }
        / "clear" { Command::Clear }
        / "at" __ i:size() { Command::At(i) }
        / "show" { Command::Show }
        / "dump" { Command::Dump }
        / "len" { Command::Len }
        / "capacity" { Command::Capacity }
        / "empty" { Command::Empty }

    rule integer() -> i64
        = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("64-bit integer")) }

    rule size() -> usize
        = n:$(['0'..='9']+) {? n.parse().or(Err("unsigned integer")) }

    rule __() = quiet!{[' ' | '\t']+}

    rule _() = quiet!{[' ' | '\t']*}
});

/// Parses a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<Statement>, ParseError> {
    let mut statements = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.split_once('#') {
            Some((code, _comment)) => code,
            None => raw,
        };
        if text.trim().is_empty() {
            continue;
        }
        let command = parser::command(text).map_err(|e| ParseError {
            line,
            message: e.to_string(),
        })?;
        statements.push(Statement { line, command });
    }
    Ok(statements)
}
