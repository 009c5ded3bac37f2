//! categories command - List known categories

use crate::cli::Context;
use crate::ui::output;

/// Print the category catalog sorted by name.
///
/// Shows the registry's catalog when categories are enforced, otherwise the
/// defaults merged with the configured ones.
pub fn categories(ctx: &Context) {
    let catalog = match ctx.registry.categories() {
        Some(catalog) => catalog.clone(),
        None => ctx.config.category_catalog(),
    };

    let rows: Vec<(&String, &String)> = catalog.all().iter().collect();
    println!("{}", output::format_table(&rows));
    output::debug(
        format!(
            "{} categories, enforced: {}",
            catalog.len(),
            ctx.registry.categories().is_some()
        ),
        ctx.verbosity,
    );
}
