//! Template kinds supported by keelgen.
//!
//! # Examples
//!
//! ```
//! use keelgen_core::templates::TemplateKind;
//! use std::str::FromStr;
//!
//! let template = TemplateKind::from_str("rust_reqwest").unwrap();
//! assert_eq!(template, TemplateKind::RustReqwest);
//! assert_eq!(template.to_string(), "rust_reqwest");
//! assert_eq!(TemplateKind::default(), TemplateKind::RustReqwest);
//! ```
//!
//! The built-in kind renders from templates compiled into the binary. A
//! template directory, given explicitly or found by
//! [`TemplateDir::discover`](super::TemplateDir::discover), replaces them.

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

/// Supported template kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateKind {
    /// Async Rust client on top of keelgen-runtime and reqwest
    #[default]
    RustReqwest,
    /// Templates from a user-supplied directory
    Custom,
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rust_reqwest" => Ok(TemplateKind::RustReqwest),
            "custom" => Ok(TemplateKind::Custom),
            _ => Err(format!("Unknown template kind: {}", s)),
        }
    }
}

impl TemplateKind {
    /// Returns the template identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RustReqwest => "rust_reqwest",
            Self::Custom => "custom",
        }
    }

    /// Returns an iterator over all available template kinds
    pub fn all() -> impl Iterator<Item = Self> {
        use TemplateKind::*;
        [RustReqwest, Custom].iter().copied()
    }

    /// Whether templates for this kind ship with the crate
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::RustReqwest)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
