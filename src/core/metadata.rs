//! core::metadata
//!
//! Descriptors attached to every registered item.
//!
//! [`MetaOptions`] is what callers pass to `register`; every field is
//! optional. The registry turns it into an immutable [`MetaData`] once per
//! registration, filling the name with the full dotted path.

use serde::{Deserialize, Serialize};

/// Caller-supplied options for a registration.
///
/// # Example
///
/// ```
/// use svcreg::core::metadata::MetaOptions;
///
/// let options = MetaOptions::new()
///     .with_type("int")
///     .with_category("database")
///     .with_description("Connection pool size")
///     .with_tags(["pool", "tuning"]);
///
/// assert_eq!(options.type_tag.as_deref(), Some("int"));
/// assert_eq!(options.tags.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaOptions {
    /// Primitive keyword or constructible type identifier
    #[serde(rename = "type")]
    pub type_tag: Option<String>,

    /// Category name, validated against a category catalog when one is attached
    pub category: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Tags, duplicates are dropped when the metadata is built
    pub tags: Vec<String>,
}

impl MetaOptions {
    /// Options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for options carrying only a type tag.
    pub fn typed(type_tag: impl Into<String>) -> Self {
        Self::new().with_type(type_tag)
    }

    pub fn with_type(mut self, type_tag: impl Into<String>) -> Self {
        self.type_tag = Some(type_tag.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Immutable descriptor of a registered item.
///
/// Fields are private; there are no setters. A new registration always
/// builds a new `MetaData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaData {
    name: String,
    #[serde(rename = "type")]
    type_tag: Option<String>,
    category: Option<String>,
    description: Option<String>,
    tags: Vec<String>,
}

impl MetaData {
    /// Build metadata. Tags keep their first-seen order; repeats are dropped.
    pub fn new(
        name: impl Into<String>,
        type_tag: Option<String>,
        category: Option<String>,
        description: Option<String>,
        tags: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            name: name.into(),
            type_tag,
            category,
            description,
            tags: unique,
        }
    }

    /// Build metadata from registration options.
    pub fn from_options(name: impl Into<String>, options: MetaOptions) -> Self {
        Self::new(
            name,
            options.type_tag,
            options.category,
            options.description,
            options.tags,
        )
    }

    /// Metadata with only a name and type tag.
    pub fn typed(name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self::new(name, Some(type_tag.into()), None, None, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw type tag as registered; `None` means pass-through.
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
