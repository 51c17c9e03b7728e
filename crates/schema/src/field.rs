//! Typed schema fields.

/// The structural type of a schema field.
///
/// This mirrors the type tags the provider's schema registry can emit. Only
/// some of them have a configuration-language reversal; the others are kept
/// as explicit variants so the generator has to reject them by name instead
/// of silently falling through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    String,
    Int,
    Float,
    /// A map; its element type is never reversed, so it is not retained.
    Map,
    /// A set whose elements are of the given kind.
    Set(Box<FieldKind>),
    /// A list of nested objects, each with its own named fields.
    ListOfObject(Vec<SchemaField>),
}

impl FieldKind {
    /// The upstream registry tag for this kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "TypeBool",
            FieldKind::String => "TypeString",
            FieldKind::Int => "TypeInt",
            FieldKind::Float => "TypeFloat",
            FieldKind::Map => "TypeMap",
            FieldKind::Set(_) => "TypeSet",
            FieldKind::ListOfObject(_) => "TypeList",
        }
    }

    /// Convenience constructor for `Set(String)`, the shape of `roles` and `shares`.
    pub fn string_set() -> Self {
        FieldKind::Set(Box::new(FieldKind::String))
    }
}

/// One field of a grant resource's schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub description: String,
    pub kind: FieldKind,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
