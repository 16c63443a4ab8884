//! Best-effort version string from a runtime's `--version` output
//!
//! `Python 3.12.4` yields `3.12.4`. Output without a recognizable version
//! yields its first line unchanged (trimmed) rather than an error.

use std::process::Command;

use regex::Regex;
use tracing::debug;

pub struct ToolVersionParser {
    /// First `X.Y` or `X.Y.Z` token
    version_re: Regex,
}

impl ToolVersionParser {
    pub fn new() -> Self {
        Self {
            version_re: Regex::new(r"\b(\d+\.\d+(?:\.\d+)?)").expect("version pattern is valid"),
        }
    }

    /// Extract the version from tool output, falling back to the first line.
    pub fn extract(&self, output: &str) -> String {
        if let Some(captures) = self.version_re.captures(output) {
            return captures[1].to_string();
        }

        let first_line = output.lines().next().unwrap_or_default().trim();
        debug!("No version found in tool output, using {:?}", first_line);
        first_line.to_string()
    }
}

impl Default for ToolVersionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// First `X.Y[.Z]` token in `output`, or its first line trimmed.
pub fn extract_version(output: &str) -> String {
    ToolVersionParser::new().extract(output)
}

/// Run `program args...` and extract a version from its stdout, or stderr
/// when stdout is empty (Python 2 prints `--version` to stderr).
pub fn detect_tool_version(program: &str, args: &[&str]) -> std::io::Result<String> {
    let output = Command::new(program).args(args).output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&output.stderr)
    } else {
        stdout
    };

    Ok(extract_version(&text))
}
