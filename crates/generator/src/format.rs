//! Go source formatting through `gofmt`

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tf_schema_gen_common::{GeneratorError, Result};

/// Formatter looked up on `PATH` by default
pub const GOFMT: &str = "gofmt";

/// Pipe `source` through the formatter `program`
///
/// A formatter missing from `PATH` is not an error: the source is returned
/// as rendered and a warning is logged. A formatter that rejects the source
/// is an error.
pub fn format_go_source(program: &str, source: &str) -> Result<String> {
    let mut child = match Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(program, "Go formatter not found, writing sources unformatted");
            return Ok(source.to_string());
        }
        Err(e) => return Err(e.into()),
    };

    // gofmt reads all of stdin before writing, so stdin is closed first
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes())?;
    }
    let output = child.wait_with_output()?;

    if !output.status.success() {
        return Err(GeneratorError::Generation(format!(
            "{} failed: {}",
            program,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    String::from_utf8(output.stdout).map_err(|e| {
        GeneratorError::Generation(format!("{} produced invalid UTF-8: {}", program, e))
    })
}
