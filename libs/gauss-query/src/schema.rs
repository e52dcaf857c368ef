/// Primitive leaf kind of a scalar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

/// How a field is hydrated. Decided once, when the schema is built.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Timestamp,
    /// Ordered elements addressed through `key[index]` / `key[]`.
    Sequence(Box<FieldKind>),
    /// Nested record. Resolved lazily so a type may contain itself.
    Nested(fn() -> &'static Schema),
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Scalar(_) => "Scalar",
            FieldKind::Timestamp => "Timestamp",
            FieldKind::Sequence(_) => "Sequence",
            FieldKind::Nested(_) => "Record",
        }
    }
}

/// Declared metadata of one field, before resolution.
///
/// Built by `#[derive(QueryRecord)]` from `#[query(...)]` attributes, or by
/// hand for schemas that are not tied to a Rust struct.
#[derive(Debug, Clone, Default)]
pub struct FieldMeta {
    name: String,
    alias: Option<String>,
    default: Option<String>,
    validate: Vec<String>,
    format: Option<String>,
}

impl FieldMeta {
    pub const IGNORE: &str = "-";
    pub const REQUIRED: &str = "required";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Key to read instead of the field name. `"-"` ignores the field.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Literal used when the key is absent.
    pub fn default_value(mut self, raw: impl Into<String>) -> Self {
        self.default = Some(raw.into());
        self
    }

    /// Comma-separated validation rules, e.g. `"required"`.
    pub fn validate(mut self, rules: &str) -> Self {
        self.validate.extend(
            rules
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn required(self) -> Self {
        self.validate(Self::REQUIRED)
    }

    /// chrono format string for timestamp fields.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Resolve into a descriptor for a field of `kind`.
    pub fn resolve(self, kind: FieldKind) -> FieldDescriptor {
        let key = self.alias.unwrap_or_else(|| self.name.clone());
        FieldDescriptor {
            ignored: key == Self::IGNORE,
            required: self.validate.iter().any(|r| r == Self::REQUIRED),
            name: self.name,
            key,
            kind,
            time_format: self.format,
            default_raw: self.default,
        }
    }
}

/// Resolved field. Never mutated after resolution.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Declared field name (used in error messages).
    pub name: String,
    /// Effective lookup key.
    pub key: String,
    pub ignored: bool,
    pub kind: FieldKind,
    pub time_format: Option<String>,
    pub default_raw: Option<String>,
    pub required: bool,
}

impl FieldDescriptor {
    /// Full parameter key of this field inside the record at `prefix`.
    ///
    /// Top level: `key`. Nested: `prefix[key]`. Collection kinds use the
    /// result as the base of their `base[index]` match.
    pub fn lookup_key(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{prefix}[{}]", self.key),
            None => self.key.clone(),
        }
    }
}

/// Ordered field descriptors of one record type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_alias_over_name() {
        let field = FieldMeta::new("Value")
            .alias("value")
            .resolve(FieldKind::Scalar(ScalarKind::I64));
        assert_eq!(field.name, "Value");
        assert_eq!(field.key, "value");
        assert!(!field.ignored);
        assert!(!field.required);
    }

    #[test]
    fn resolve_dash_alias_ignores_field() {
        let field = FieldMeta::new("value")
            .alias("-")
            .required()
            .resolve(FieldKind::Scalar(ScalarKind::I64));
        assert!(field.ignored);
    }

    #[test]
    fn resolve_required_from_rule_list() {
        let field = FieldMeta::new("value")
            .validate("min, required")
            .resolve(FieldKind::Timestamp);
        assert!(field.required);

        let field = FieldMeta::new("value")
            .validate("requiredish")
            .resolve(FieldKind::Timestamp);
        assert!(!field.required);
    }

    #[test]
    fn lookup_key_nests_in_brackets() {
        let field = FieldMeta::new("name").resolve(FieldKind::Scalar(ScalarKind::String));
        assert_eq!(field.lookup_key(None), "name");
        assert_eq!(field.lookup_key(Some("outer[0]")), "outer[0][name]");
    }
}
