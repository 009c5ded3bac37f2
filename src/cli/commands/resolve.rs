//! resolve command - Resolve a path and print the result

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Resolve `path` and print it.
///
/// Errors carry the registry's message (missing path, namespace instead of
/// item, failed coercion or construction).
pub fn resolve(ctx: &Context, path: &str) -> Result<()> {
    let resolved = ctx.registry.resolve(path)?;
    output::debug(
        format!("'{}' resolved to {}", path, resolved.kind()),
        ctx.verbosity,
    );
    println!("{}", output::format_resolved(&resolved));
    Ok(())
}
