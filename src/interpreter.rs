use std::alloc::Layout;

use simple_vector::SimpleVector;
use thiserror::Error;
use tracing::{debug, info};

use crate::frontend::{Command, ParseError, Statement, parse_script};

/// Failures that stop a script. An out-of-range `at` is not one of them: it
/// is reported as an output line and the script carries on.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("line {line}: position {index} is invalid for length {len}")]
    InvalidPosition { line: usize, index: usize, len: usize },

    #[error("line {line}: {source}")]
    Container {
        line: usize,
        #[source]
        source: simple_vector::Error,
    },
}

/// Executes script statements against a single `SimpleVector<i64>`.
#[derive(Debug, Default)]
pub struct Session {
    vector: SimpleVector<i64>,
    output: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vector(&self) -> &SimpleVector<i64> {
        &self.vector
    }

    /// Lines produced so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    pub fn run(&mut self, statements: &[Statement]) -> Result<(), ScriptError> {
        for statement in statements {
            self.execute(statement)?;
        }
        info!(
            statements = statements.len(),
            len = self.vector.len(),
            capacity = self.vector.capacity(),
            "script finished"
        );
        Ok(())
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<(), ScriptError> {
        let line = statement.line;
        debug!(line, command = ?statement.command, "executing");

        match &statement.command {
            Command::Init(values) => self.vector = SimpleVector::from(values.as_slice()),
            Command::Fill(count, value) => {
                check_fill_size(*count)
                    .map_err(|source| ScriptError::Container { line, source })?;
                self.vector = SimpleVector::from_elem(*count, *value);
            }
            Command::Push(value) => self.vector.push_back(*value),
            Command::Pop => {
                if self.vector.pop_back().is_none() {
                    debug!(line, "pop on empty vector");
                }
            }
            Command::Insert(index, value) => {
                self.check_position(line, *index, self.vector.len())?;
                let pos = self.vector.cursor(*index);
                self.vector.insert(pos, *value);
            }
            Command::Erase(index) => {
                if self.vector.is_empty() {
                    return Err(ScriptError::InvalidPosition {
                        line,
                        index: *index,
                        len: 0,
                    });
                }
                self.check_position(line, *index, self.vector.len() - 1)?;
                let pos = self.vector.cursor(*index);
                self.vector.erase(pos);
            }
            Command::Reserve(capacity) => self.reserve_exact(line, *capacity)?,
            Command::Resize(len) => {
                self.reserve_exact(line, *len)?;
                self.vector.resize(*len);
            }
            Command::Clear => self.vector.clear(),
            Command::At(index) => {
                let rendered = match self.vector.at(*index) {
                    Ok(value) => value.to_string(),
                    Err(err) => format!("error: {err}"),
                };
                self.output.push(rendered);
            }
            Command::Show => self.output.push(self.vector.to_string()),
            Command::Dump => self.output.push(format!(
                "{:?} len={} capacity={}",
                self.vector,
                self.vector.len(),
                self.vector.capacity()
            )),
            Command::Len => self.output.push(self.vector.len().to_string()),
            Command::Capacity => self.output.push(self.vector.capacity().to_string()),
            Command::Empty => self.output.push(self.vector.is_empty().to_string()),
        }
        Ok(())
    }

    fn check_position(&self, line: usize, index: usize, last: usize) -> Result<(), ScriptError> {
        if index > last {
            return Err(ScriptError::InvalidPosition {
                line,
                index,
                len: self.vector.len(),
            });
        }
        Ok(())
    }

    /// `reserve` with the allocation failure reported instead of aborting.
    fn reserve_exact(&mut self, line: usize, capacity: usize) -> Result<(), ScriptError> {
        if capacity <= self.vector.capacity() {
            return Ok(());
        }
        let additional = capacity - self.vector.len();
        self.vector
            .try_reserve(additional)
            .map_err(|source| ScriptError::Container { line, source })
    }
}

/// Rejects element counts whose buffer size cannot be represented, which
/// `from_elem` would otherwise treat as fatal.
fn check_fill_size(count: usize) -> Result<(), simple_vector::Error> {
    Layout::array::<i64>(count)
        .map(drop)
        .map_err(|_| simple_vector::Error::CapacityOverflow)
}

/// Parses and runs `source`, returning the produced output lines.
pub fn run_source(source: &str) -> Result<Vec<String>, ScriptError> {
    let statements = parse_script(source)?;
    let mut session = Session::new();
    session.run(&statements)?;
    Ok(session.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_show_erase() {
        let output = run_source("push 1\npush 2\npush 3\nshow\nerase 1\nshow\nlen\n").unwrap();
        assert_eq!(output, ["1 2 3", "1 3", "2"]);
    }

    #[test]
    fn test_resize_scenario() {
        let output = run_source("init 5 5 5\nresize 5\nshow\nresize 2\nshow\ncapacity").unwrap();
        assert_eq!(output, ["5 5 5 0 0", "5 5", "5"]);
    }

    #[test]
    fn test_at_out_of_range_continues() {
        let output = run_source("init 4 8\nat 1\nat 2\nempty").unwrap();
        assert_eq!(
            output,
            ["8", "error: index 2 out of range for length 2", "false"]
        );
    }

    #[test]
    fn test_reserve_is_exact() {
        let output = run_source("push 1\nreserve 10\ncapacity\nreserve 3\ncapacity").unwrap();
        assert_eq!(output, ["10", "10"]);
    }

    #[test]
    fn test_fill_and_dump() {
        let output = run_source("fill 3 7\ndump\nclear\ndump").unwrap();
        assert_eq!(
            output,
            ["[7, 7, 7] len=3 capacity=3", "[] len=0 capacity=3"]
        );
    }

    #[test]
    fn test_fill_replaces_contents() {
        let output =
            run_source("push 1\npush 2\npush 3\nfill 2 -4\nshow\ncapacity\nfill 0 9\ndump")
                .unwrap();
        assert_eq!(output, ["-4 -4", "2", "[] len=0 capacity=0"]);
    }

    #[test]
    fn test_oversized_fill_is_reported() {
        let err = run_source(&format!("push 5\nfill {} 1", usize::MAX / 2)).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Container {
                line: 2,
                source: simple_vector::Error::CapacityOverflow
            }
        ));
    }

    #[test]
    fn test_invalid_insert_position() {
        let err = run_source("init 1 2\ninsert 3 9").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::InvalidPosition { line: 2, index: 3, len: 2 }
        ));
    }

    #[test]
    fn test_erase_on_empty() {
        let err = run_source("erase 0").unwrap_err();
        assert_eq!(err.to_string(), "line 1: position 0 is invalid for length 0");
    }

    #[test]
    fn test_oversized_reserve_is_reported() {
        let err = run_source(&format!("reserve {}", usize::MAX)).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Container {
                line: 1,
                source: simple_vector::Error::CapacityOverflow
            }
        ));
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = run_source("push 1\npush x").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(ParseError { line: 2, .. })));
    }

    #[test]
    fn test_session_state() {
        let mut session = Session::new();
        let statements = parse_script("push 4\npush 5\npop").unwrap();
        session.run(&statements).unwrap();
        assert_eq!(session.vector(), &[4]);
        assert!(session.output().is_empty());
    }
}
