//! Env file codec: `KEY=VALUE` lines on disk <-> `RawConfig` in memory.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::ParseError;
use crate::state::env_store::RawConfig;

/// Read and parse the env file at `path`.
///
/// A missing file surfaces as `ParseError::EnvFile(dotenv::Error::Io(_))`
/// with kind `NotFound`; callers decide what that means.
pub fn read_env_file(path: &Path) -> Result<RawConfig, ParseError> {
    // Deprecated in dotenv 0.15 in favour of loading into the process
    // environment, which is exactly what must not happen here.
    #[allow(deprecated)]
    let lines = dotenv::from_path_iter(path)?;
    let entries = lines.collect::<Result<RawConfig, _>>()?;
    Ok(entries)
}

/// Replace the env file at `path` with `entries`.
///
/// The new content goes to a temp file in the same directory and is renamed
/// over `path`, so the file is either fully old or fully new.
pub fn write_env_file(path: &Path, entries: &RawConfig) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(render(entries).as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Render entries as sorted `KEY=VALUE` lines.
pub fn render(entries: &RawConfig) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(&render_value(value));
        out.push('\n');
    }
    out
}

/// Whether `key` survives a write/read cycle through the env file parser.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn render_value(value: &str) -> String {
    if value.parse::<i64>().is_ok() {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
