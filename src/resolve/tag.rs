//! resolve::tag
//!
//! Type tag normalization.
//!
//! Tags are trimmed, then keywords are matched ASCII-lowercased, so
//! `"Int"`, `" integer "` and `"NUMBER"` all select integer coercion.
//! Anything that is not a known keyword names a constructible type, by its
//! trimmed identifier with case kept.

/// The dispatch group selected by a type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag<'a> {
    /// absent, `""`, `null`, `obj`, `object`
    PassThrough,
    /// `bool`, `boolean`
    Bool,
    /// `array`, `arr`, `list`
    Array,
    /// `int`, `integer`, `number`
    Int,
    /// `string`
    String,
    /// Any other tag; holds the trimmed identifier as written.
    Class(&'a str),
}

impl<'a> TypeTag<'a> {
    /// Classify a raw tag.
    ///
    /// # Example
    ///
    /// ```
    /// use svcreg::resolve::TypeTag;
    ///
    /// assert_eq!(TypeTag::parse(None), TypeTag::PassThrough);
    /// assert_eq!(TypeTag::parse(Some("Boolean")), TypeTag::Bool);
    /// assert_eq!(TypeTag::parse(Some(" list ")), TypeTag::Array);
    /// assert_eq!(TypeTag::parse(Some("User")), TypeTag::Class("User"));
    /// ```
    pub fn parse(tag: Option<&'a str>) -> Self {
        let Some(tag) = tag else {
            return TypeTag::PassThrough;
        };
        let trimmed = tag.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "" | "null" | "obj" | "object" => TypeTag::PassThrough,
            "bool" | "boolean" => TypeTag::Bool,
            "array" | "arr" | "list" => TypeTag::Array,
            "int" | "integer" | "number" => TypeTag::Int,
            "string" => TypeTag::String,
            _ => TypeTag::Class(trimmed),
        }
    }

    /// Canonical keyword for display, or the class identifier.
    pub fn name(&self) -> &'a str {
        match self {
            TypeTag::PassThrough => "object",
            TypeTag::Bool => "bool",
            TypeTag::Array => "array",
            TypeTag::Int => "int",
            TypeTag::String => "string",
            TypeTag::Class(name) => name,
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeTag::Class(_))
    }
}

impl std::fmt::Display for TypeTag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
