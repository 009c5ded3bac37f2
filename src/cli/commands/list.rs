//! list command - List registered paths with their type tags

use anyhow::{bail, Result};

use crate::cli::Context;
use crate::ui::output;

/// Print every item path at or below `prefix` next to its type tag.
///
/// Untyped items show `-`.
pub fn list(ctx: &Context, prefix: Option<&str>) -> Result<()> {
    if let Some(prefix) = prefix {
        if !ctx.registry.has(prefix) {
            bail!("Nothing registered at '{}'", prefix);
        }
    }

    let rows: Vec<(String, String)> = ctx
        .registry
        .entries()
        .into_iter()
        .filter(|(path, _)| prefix.map_or(true, |prefix| is_within(path, prefix)))
        .map(|(path, meta)| (path, meta.type_tag().unwrap_or("-").to_string()))
        .collect();

    if rows.is_empty() {
        output::warn("registry is empty", ctx.verbosity);
        return Ok(());
    }

    println!("{}", output::format_table(&rows));
    Ok(())
}

fn is_within(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_matches_whole_segments() {
        assert!(is_within("app.db.host", "app"));
        assert!(is_within("app.db.host", "app.db"));
        assert!(is_within("app", "app"));
        assert!(!is_within("application.name", "app"));
    }
}
