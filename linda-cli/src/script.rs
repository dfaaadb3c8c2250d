//! Line-oriented script interpreter
//!
//! A script is a sequence of commands over a table of named tuples:
//!
//! ```text
//! # comments and blank lines are skipped
//! new t1 [ 1 "foo" ]
//! new any [ ?Integer ?String ]
//! write t1
//! tryTake t2 any
//! print t2
//! ```
//!
//! `read`/`take` block on the space exactly like the API calls they wrap,
//! so a script that waits for a tuple nobody writes never finishes.

use linda_core::{Linda, LindaError};
use linda_types::{parse_template, Template, TupleError};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: {name} was never created")]
    UnknownName { line: usize, name: String },

    #[error("line {line}: cannot interpret {text:?}")]
    Malformed { line: usize, text: String },

    #[error("line {line}: {source}")]
    Tuple { line: usize, source: TupleError },

    #[error("line {line}: {source}")]
    Contract { line: usize, source: LindaError },

    #[error("Failed to read script: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

/// Executes script commands against a space
///
/// Command output (`print`, `readAll`, `takeAll`) goes to `out`;
/// acknowledgements are logged.
pub struct Interpreter<'a, W: Write> {
    space: &'a dyn Linda,
    names: HashMap<String, Template>,
    out: W,
    echo: bool,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(space: &'a dyn Linda, out: W) -> Self {
        Self {
            space,
            names: HashMap::new(),
            out,
            echo: false,
        }
    }

    /// Log every command before executing it
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Run every line of `input`, stopping at the first error
    ///
    /// Returns the number of commands executed.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<usize> {
        let mut executed = 0;
        for (index, line) in input.lines().enumerate() {
            if self.execute(index + 1, &line?)? {
                executed += 1;
            }
        }
        self.out.flush()?;
        Ok(executed)
    }

    /// Execute one line; returns false for blank lines and comments
    pub fn execute(&mut self, line: usize, text: &str) -> Result<bool> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(false);
        }
        if self.echo {
            tracing::info!("> {}", trimmed);
        }

        let (command, rest) = split_word(trimmed);
        let malformed = || ScriptError::Malformed {
            line,
            text: trimmed.to_string(),
        };

        match command {
            "new" => {
                let (name, source) = split_word(rest);
                if name.is_empty() || source.is_empty() {
                    return Err(malformed());
                }
                let template = parse_template(source)
                    .map_err(|source| ScriptError::Tuple { line, source })?;
                tracing::info!("{} = {}", name, template);
                self.names.insert(name.to_string(), template);
            }
            "write" => {
                let [name] = args::<1>(rest).ok_or_else(malformed)?;
                let template = self.lookup(line, name)?;
                self.space
                    .write_template(template)
                    .map_err(|source| ScriptError::Contract { line, source })?;
                tracing::info!("wrote {}", template);
            }
            "read" | "take" | "tryRead" | "tryTake" => {
                let [dst, src] = args::<2>(rest).ok_or_else(malformed)?;
                let template = self.lookup(line, src)?;
                let result = match command {
                    "read" => Some(self.space.read(template)),
                    "take" => Some(self.space.take(template)),
                    "tryRead" => self.space.try_read(template),
                    _ => self.space.try_take(template),
                };
                match result {
                    Some(tuple) => {
                        tracing::info!("{} = {}", dst, tuple);
                        self.names.insert(dst.to_string(), tuple.into());
                    }
                    None => tracing::info!("{}: no tuple matches {}", command, src),
                }
            }
            "readAll" | "takeAll" => {
                let [src] = args::<1>(rest).ok_or_else(malformed)?;
                let template = self.lookup(line, src)?;
                let tuples = if command == "readAll" {
                    self.space.read_all(template)
                } else {
                    self.space.take_all(template)
                };
                for tuple in tuples {
                    writeln!(self.out, "{}", tuple)?;
                }
            }
            "print" => {
                let [name] = args::<1>(rest).ok_or_else(malformed)?;
                let template = self.lookup(line, name)?.to_string();
                writeln!(self.out, "{} = {}", name, template)?;
            }
            "debug" => {
                self.out.flush()?;
                self.space.debug(rest);
            }
            _ => return Err(malformed()),
        }
        Ok(true)
    }

    fn lookup(&self, line: usize, name: &str) -> Result<&Template> {
        self.names.get(name).ok_or_else(|| ScriptError::UnknownName {
            line,
            name: name.to_string(),
        })
    }
}

/// Split off the first whitespace-delimited word
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim_start()),
        None => (text, ""),
    }
}

/// Exactly `N` whitespace-separated arguments
fn args<const N: usize>(rest: &str) -> Option<[&str; N]> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    words.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use linda_core::SharedSpace;

    fn run(space: &SharedSpace, script: &str) -> (Result<usize>, String) {
        let mut out = Vec::new();
        let result = Interpreter::new(space, &mut out).run(script.as_bytes());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_write_then_take_by_template() {
        let space = SharedSpace::new();
        let (result, output) = run(
            &space,
            "new t [ 1 \"foo\" ]\n\
             new any [ ?Integer ?String ]\n\
             write t\n\
             take got any\n\
             print got\n",
        );
        assert_eq!(result.unwrap(), 5);
        assert_eq!(output, "got = [ 1 \"foo\" ]\n");
        assert_eq!(space.size(), 0);
    }

    #[test]
    fn test_try_miss_leaves_destination_untouched() {
        let space = SharedSpace::new();
        let (result, output) = run(
            &space,
            "new dst [ 0 ]\n\
             new any [ ?Integer ]\n\
             tryTake dst any\n\
             tryRead dst any\n\
             print dst\n",
        );
        result.unwrap();
        assert_eq!(output, "dst = [ 0 ]\n");
    }

    #[test]
    fn test_read_all_and_take_all_list_matches() {
        let space = SharedSpace::new();
        let (result, output) = run(
            &space,
            "new a [ 1 ]\n\
             new b [ 2 ]\n\
             new s [ \"x\" ]\n\
             new any [ ?Integer ]\n\
             write a\n\
             write b\n\
             write s\n\
             readAll any\n\
             takeAll any\n",
        );
        result.unwrap();
        assert_eq!(output, "[ 1 ]\n[ 2 ]\n[ 1 ]\n[ 2 ]\n");
        assert_eq!(space.size(), 1);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let space = SharedSpace::new();
        let (result, _) = run(&space, "# setup\n\n   \nnew a [ ]\nwrite a\n");
        assert_eq!(result.unwrap(), 2);
        assert_eq!(space.size(), 1);
    }

    #[test]
    fn test_unknown_name_reports_line() {
        let space = SharedSpace::new();
        let (result, _) = run(&space, "new a [ 1 ]\nwrite b\n");
        match result {
            Err(ScriptError::UnknownName { line, name }) => {
                assert_eq!(line, 2);
                assert_eq!(name, "b");
            }
            other => panic!("expected UnknownName, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_is_malformed() {
        let space = SharedSpace::new();
        let (result, _) = run(&space, "frobnicate x\n");
        assert!(matches!(
            result,
            Err(ScriptError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_wrong_argument_count_is_malformed() {
        let space = SharedSpace::new();
        let (result, _) = run(&space, "new a [ 1 ]\ntake a\n");
        assert!(matches!(
            result,
            Err(ScriptError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_bad_tuple_text_is_tuple_error() {
        let space = SharedSpace::new();
        let (result, _) = run(&space, "new a [ 1 \n");
        assert!(matches!(result, Err(ScriptError::Tuple { line: 1, .. })));
    }

    #[test]
    fn test_writing_a_template_is_a_contract_error() {
        let space = SharedSpace::new();
        let (result, _) = run(&space, "new any [ ?Integer ]\nwrite any\n");
        assert!(matches!(
            result,
            Err(ScriptError::Contract { line: 2, .. })
        ));
        assert_eq!(space.size(), 0);
    }

    #[test]
    fn test_printed_tuples_feed_back_into_new() {
        let space = SharedSpace::new();
        let (result, output) = run(
            &space,
            "new a [ \"bell\\u{7}\" '\\u{1b}' [ 1 ?Integer ] ]\nprint a\n",
        );
        result.unwrap();
        assert_eq!(output, "a = [ \"bell\\u{7}\" '\\u{1b}' [ 1 ?Integer ] ]\n");

        let printed = output.trim_start_matches("a = ").trim_end();
        let (again, echoed) = run(&space, &format!("new b {}\nprint b\n", printed));
        again.unwrap();
        assert_eq!(echoed, format!("b = {}\n", printed));
    }

    #[test]
    fn test_execute_rebinds_names() {
        let space = SharedSpace::new();
        let mut out = Vec::new();
        let mut interpreter = Interpreter::new(&space, &mut out);
        assert!(interpreter.execute(1, "new a [ 'c' true ]").unwrap());
        assert!(interpreter.execute(2, "new a [ \"s\" ]").unwrap());
        assert!(!interpreter.execute(3, "# comment").unwrap());
        assert!(interpreter.execute(4, "print a").unwrap());
        drop(interpreter);
        assert_eq!(String::from_utf8(out).unwrap(), "a = [ \"s\" ]\n");
    }
}
