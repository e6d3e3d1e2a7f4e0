//! Static type model and the oracle interface the analysis queries.
//!
//! The matcher never inspects host type-checker internals. It sees a
//! [`TypeRef`] (a fully-qualified name plus generic arguments) and asks a
//! [`TypeOracle`] for supertypes and declared members when it needs to walk
//! a hierarchy.

use std::fmt;

/// A dotted, fully-qualified type or module name such as `asyncio.Task`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Creates a qualified name from its dotted form.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the dotted form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final segment, e.g. `Task` for `asyncio.Task`.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Returns a new name with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}.{segment}", self.0))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for QualifiedName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A statically resolved type: a qualified name plus generic arguments.
///
/// # Example
///
/// ```
/// use unawaited_syntax::TypeRef;
///
/// let task = TypeRef::generic("asyncio.Task", vec![TypeRef::named("app.Conn")]);
/// let args = task.instantiation_of("asyncio.Task").expect("instantiation");
/// assert_eq!(args.len(), 1);
/// assert_eq!(task.to_string(), "asyncio.Task[app.Conn]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    name: QualifiedName,
    arguments: Vec<TypeRef>,
}

impl TypeRef {
    /// Creates a non-generic type.
    #[must_use]
    pub fn named(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Creates a generic instantiation.
    #[must_use]
    pub fn generic(name: impl Into<QualifiedName>, arguments: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Returns the type's qualified name.
    #[must_use]
    pub const fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Returns the generic arguments, empty for non-generic types.
    #[must_use]
    pub fn arguments(&self) -> &[Self] {
        &self.arguments
    }

    /// Returns the type arguments when this type instantiates `template`.
    ///
    /// Matching is by exact fully-qualified name; a bare (unparameterised)
    /// reference to the template yields `None`.
    #[must_use]
    pub fn instantiation_of(&self, template: &str) -> Option<&[Self]> {
        (self.name.as_str() == template && !self.arguments.is_empty())
            .then_some(self.arguments.as_slice())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("[")?;
        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str("]")
    }
}

/// Static type queries supplied by the host.
///
/// Implementations must be pure: the same node always resolves to the same
/// type, and an expression the oracle cannot type yields `None` rather than
/// a guess.
pub trait TypeOracle {
    /// Resolves the static type of an expression node.
    fn resolve_type(&self, node: tree_sitter::Node<'_>) -> Option<TypeRef>;

    /// Returns the direct supertypes of a named type.
    fn supertypes(&self, name: &QualifiedName) -> Vec<QualifiedName>;

    /// Returns the member names a type declares directly.
    fn declared_members(&self, name: &QualifiedName) -> Vec<String>;
}
