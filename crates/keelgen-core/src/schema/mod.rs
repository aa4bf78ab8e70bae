//! The Schema Model: every type and operation a client is generated from.
//!
//! [`build_model`] walks an [`crate::OpenApiContext`] once and produces a
//! [`SchemaModel`] whose contents are already named, sorted and checked for
//! collisions, so rendering it is a pure function of the document.

pub mod builder;

pub use builder::build_model;

// Internal imports (std, crate)
use std::collections::BTreeSet;
use std::fmt;

// External imports (alphabetized)
use serde::Serialize;

/// A Rust type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RustType {
    String,
    I32,
    I64,
    F32,
    F64,
    Bool,
    /// Free-form JSON
    Value,
    /// No content
    Empty,
    Named(String),
    Vec(Box<RustType>),
    Map(Box<RustType>),
    Option(Box<RustType>),
    Boxed(Box<RustType>),
}

impl RustType {
    /// Wrap in `Option` unless already optional.
    pub fn optional(self) -> Self {
        match self {
            RustType::Option(_) => self,
            other => RustType::Option(Box::new(other)),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            RustType::String
                | RustType::I32
                | RustType::I64
                | RustType::F32
                | RustType::F64
                | RustType::Bool
        )
    }

    /// Name of the type this one stores inline. `Vec`, maps and boxes hold
    /// their contents on the heap and break a containment cycle.
    pub fn inline_target(&self) -> Option<&str> {
        match self {
            RustType::Named(name) => Some(name.as_str()),
            RustType::Option(inner) => inner.inline_target(),
            _ => None,
        }
    }

    /// Box an inline reference to any of `names` so the type has a finite size.
    pub fn boxed_within(self, names: &BTreeSet<String>) -> Self {
        match self {
            RustType::Named(ref name) if names.contains(name) => RustType::Boxed(Box::new(self)),
            RustType::Option(inner) => RustType::Option(Box::new(inner.boxed_within(names))),
            other => other,
        }
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RustType::String => f.write_str("String"),
            RustType::I32 => f.write_str("i32"),
            RustType::I64 => f.write_str("i64"),
            RustType::F32 => f.write_str("f32"),
            RustType::F64 => f.write_str("f64"),
            RustType::Bool => f.write_str("bool"),
            RustType::Value => f.write_str("serde_json::Value"),
            RustType::Empty => f.write_str("keelgen_runtime::Empty"),
            RustType::Named(name) => f.write_str(name),
            RustType::Vec(inner) => write!(f, "Vec<{}>", inner),
            RustType::Map(inner) => write!(f, "std::collections::BTreeMap<String, {}>", inner),
            RustType::Option(inner) => write!(f, "Option<{}>", inner),
            RustType::Boxed(inner) => write!(f, "Box<{}>", inner),
        }
    }
}

/// Where a generated type is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Scope {
    /// `models.rs`
    Models,
    /// The module file of one tag
    Module(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub doc: Option<String>,
    pub kind: TypeKind,
    pub scope: Scope,
    /// JSON pointer of the schema node the type comes from
    pub origin: String,
}

#[derive(Debug, Clone, Serialize)]
pub enum TypeKind {
    Struct { fields: Vec<Field> },
    Enum { variants: Vec<EnumVariant> },
    Union { variants: Vec<UnionVariant> },
    Alias { target: RustType },
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub ident: String,
    /// Property name on the wire
    pub wire: String,
    /// Already wrapped in `Option` when the field may be absent or null
    pub ty: RustType,
    pub required: bool,
    pub doc: Option<String>,
}

impl Field {
    pub fn is_optional(&self) -> bool {
        matches!(self.ty, RustType::Option(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumVariant {
    pub ident: String,
    pub wire: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnionVariant {
    pub ident: String,
    pub ty: RustType,
}

/// A path or query parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Param {
    pub wire: String,
    pub ident: String,
    pub ty: RustType,
    pub required: bool,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// Status code key as written in the document (`200`, `4XX`, `default`)
    pub status: String,
    /// Name of the `{Op}{Status}` alias
    pub alias: String,
    pub ty: RustType,
    /// The body is plain text rather than JSON
    pub text: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Body {
    /// Name of the `{Op}Body` type
    pub alias: String,
    pub required: bool,
}

/// One HTTP operation, identified by method and path.
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    pub operation_id: String,
    pub fn_name: String,
    /// UpperCamelCase prefix of every type generated for the operation
    pub type_prefix: String,
    /// Uppercase HTTP method
    pub method: String,
    pub path: String,
    /// Module (file stem) the operation is grouped under
    pub module: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// In path template order
    pub path_params: Vec<Param>,
    /// In declaration order
    pub query_params: Vec<Param>,
    pub path_type: Option<String>,
    pub query_type: Option<String>,
    pub body: Option<Body>,
    /// Sorted by status code, `default` last
    pub responses: Vec<Response>,
    pub success_type: String,
    pub error_type: String,
    /// The success response is plain text
    pub text_response: bool,
    pub location: String,
}

impl Operation {
    /// GET and HEAD operations are cacheable reads.
    pub fn is_query(&self) -> bool {
        matches!(self.method.as_str(), "GET" | "HEAD" | "OPTIONS")
    }
}

/// Everything generated from one document.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaModel {
    pub title: Option<String>,
    pub version: Option<String>,
    pub default_base_url: Option<String>,
    /// Sorted by name
    pub types: Vec<TypeDef>,
    /// Sorted by module, then function name
    pub operations: Vec<Operation>,
}

impl SchemaModel {
    /// Module names, sorted and deduplicated.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.operations.iter().map(|op| op.module.as_str()).collect();
        modules.sort_unstable();
        modules.dedup();
        modules
    }

    pub fn types_in<'a>(&'a self, scope: &'a Scope) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.types.iter().filter(move |def| &def.scope == scope)
    }

    pub fn operations_in<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Operation> + 'a {
        self.operations.iter().filter(move |op| op.module == module)
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|def| def.name == name)
    }

    pub fn get_operation(&self, operation_id: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.operation_id == operation_id)
    }
}
