//! Launching the external log viewer.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use std::path::Path;
use std::process::Command;
use std::process::ExitStatus;

const PLACEHOLDER: &str = "{}";

/// Splits `template` into program and arguments, substituting `path` for every
/// `{}` token. The path is appended as the last argument when no token
/// contains a placeholder.
pub fn build_command(template: &str, path: &Path) -> Result<(String, Vec<String>)> {
    let path = path.display().to_string();
    let mut substituted = false;

    let mut parts: Vec<String> = template
        .split_whitespace()
        .map(|part| {
            if part.contains(PLACEHOLDER) {
                substituted = true;
                part.replace(PLACEHOLDER, &path)
            } else {
                part.to_owned()
            }
        })
        .collect();

    if parts.is_empty() {
        bail!("viewer command is empty\nHINT: Pass --viewer CMD or --no-view.");
    }
    if !substituted {
        parts.push(path);
    }

    let program = parts.remove(0);
    Ok((program, parts))
}

/// Runs the viewer on `path` and waits for it to exit.
pub fn launch(template: &str, path: &Path) -> Result<ExitStatus> {
    let (program, args) = build_command(template, path)?;
    log::info!("exec {program} {}", args.join(" "));

    Command::new(&program)
        .args(&args)
        .status()
        .with_context(|| format!("failed to start viewer '{program}'"))
}
