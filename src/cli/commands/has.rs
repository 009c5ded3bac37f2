//! has command - Check whether a path exists

use crate::cli::Context;
use crate::ui::output;

/// Print `true` or `false` for `path` and return the answer.
///
/// Prints nothing in quiet mode; the exit status still reports the result.
pub fn has(ctx: &Context, path: &str) -> bool {
    let present = ctx.registry.has(path);
    output::print(present, ctx.verbosity);
    present
}
