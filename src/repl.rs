use crate::environment::Environment;
use crate::run_in;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const PROMPT: &str = ">> ";

/// Reads one line at a time from `input` and writes each result to `output`.
/// Bindings persist across lines.
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<()> {
    let env = Environment::new_shared();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;
        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            // EOF
            return Ok(());
        }
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        match run_in(line, &env) {
            Ok(evaluated) => {
                writeln!(output, "{}", evaluated)?;
            }
            Err(errors) => {
                writeln!(output, "parser errors:")?;
                for err in &errors.0 {
                    writeln!(output, "\t{}", err)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::repl::start;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        start(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_bindings_persist_across_lines() {
        let output = session("let a = 2;\nlet double = fn(x) { x * 2 };\ndouble(a)\n");
        assert_eq!(output, ">> 2\n>> fn(x) {\n(x * 2);\n}\n>> 4\n>> ");
    }

    #[test]
    fn test_reports_parse_errors_and_continues() {
        let output = session("let = 1\n\n1 + 1\n");
        assert_eq!(
            output,
            ">> parser errors:\n\texpected next token to be IDENT, got = instead\n\tno prefix parse function for = found\n>> >> 2\n>> "
        );
    }

    #[test]
    fn test_runtime_error() {
        assert_eq!(session("nope\n"), ">> ERROR: identifier not found: nope\n>> ");
    }
}
