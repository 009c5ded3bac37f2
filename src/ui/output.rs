//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Resolved
//! values are printed as pretty JSON; listings are aligned two-column tables.

use std::fmt::Display;

use serde_json::Value;

use crate::resolve::ResolvedValue;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Log filter matching this verbosity.
    pub fn log_level(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Error,
            Verbosity::Normal => log::LevelFilter::Warn,
            Verbosity::Debug => log::LevelFilter::Debug,
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Pretty JSON for a raw value.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Display form of a resolved value.
///
/// Data results print as JSON; constructed instances print their debug form.
pub fn format_resolved(resolved: &ResolvedValue) -> String {
    match resolved.to_json() {
        Some(value) => format_json(&value),
        None => match resolved.as_instance() {
            Some(instance) => format!("{:#?}", instance),
            None => format!("{:?}", resolved),
        },
    }
}

/// Format rows as two left-aligned columns.
pub fn format_table<A, B>(rows: &[(A, B)]) -> String
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let width = rows
        .iter()
        .map(|(left, _)| left.as_ref().chars().count())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(left, right)| {
            format!("{:<width$}  {}", left.as_ref(), right.as_ref(), width = width)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::Debug.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn resolved_scalars_as_json() {
        assert_eq!(format_resolved(&ResolvedValue::Int(42)), "42");
        assert_eq!(format_resolved(&ResolvedValue::Bool(false)), "false");
        assert_eq!(
            format_resolved(&ResolvedValue::String("db".into())),
            "\"db\""
        );
        assert_eq!(
            format_resolved(&ResolvedValue::Array(json!([1]))),
            "[\n  1\n]"
        );
    }

    #[test]
    fn table_alignment() {
        let rows = vec![("a.b", "int"), ("long.path", "-")];
        assert_eq!(format_table(&rows), "a.b        int\nlong.path  -");
        assert_eq!(format_table::<&str, &str>(&[]), "");
    }
}
