//! Lightweight static type annotator for Python modules.
//!
//! [`PythonTypeOracle`] answers [`TypeOracle`] queries for a single parsed
//! module. It reads imports, class hierarchies, function signatures,
//! instance attributes, and annotated or inferable local bindings. It is
//! flow-insensitive and does not follow imports into other files; anything it
//! cannot type is reported as unresolved.

mod annotation;
mod index;
mod resolve;
mod stdlib;

use std::collections::BTreeSet;

use unawaited_core::{AnalysisConfig, DEFAULT_PENDING_TEMPLATES};

use self::index::ModuleIndex;
use self::stdlib::stdlib_type;
use crate::parser::ParseResult;
use crate::types::{QualifiedName, TypeOracle, TypeRef};

/// Module name used when none is supplied.
pub const DEFAULT_MODULE_NAME: &str = "__main__";

/// Type oracle backed by a single parsed Python module.
///
/// # Example
///
/// ```
/// use unawaited_syntax::{Parser, PythonTypeOracle, SupportedLanguage, TypeOracle};
///
/// let mut parser = Parser::new(SupportedLanguage::Python)?;
/// let parsed = parser.parse("import io\nbuf = io.StringIO()\n")?;
/// let oracle = PythonTypeOracle::new(&parsed);
/// let supers = oracle.supertypes(&"io.StringIO".into());
/// assert_eq!(supers.len(), 1);
/// # Ok::<(), unawaited_syntax::SyntaxError>(())
/// ```
#[derive(Debug)]
pub struct PythonTypeOracle<'src> {
    parsed: &'src ParseResult,
    index: ModuleIndex,
    awaitable_templates: Vec<String>,
}

impl<'src> PythonTypeOracle<'src> {
    /// Builds an oracle for `parsed`, qualifying local classes with
    /// [`DEFAULT_MODULE_NAME`].
    #[must_use]
    pub fn new(parsed: &'src ParseResult) -> Self {
        Self::for_module(parsed, DEFAULT_MODULE_NAME)
    }

    /// Builds an oracle for `parsed`, qualifying local classes with `module`.
    #[must_use]
    pub fn for_module(parsed: &'src ParseResult, module: &str) -> Self {
        Self {
            parsed,
            index: ModuleIndex::build(parsed, module),
            awaitable_templates: DEFAULT_PENDING_TEMPLATES
                .iter()
                .map(|template| (*template).to_owned())
                .collect(),
        }
    }

    /// Uses the pending templates from `config` when unwrapping `await`.
    #[must_use]
    pub fn with_config(mut self, config: &AnalysisConfig) -> Self {
        self.awaitable_templates = config.pending_templates().to_vec();
        self
    }

    /// Returns the module name local classes are qualified with.
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.index.module()
    }

    fn unwrap_pending(&self, ty: &TypeRef) -> Option<TypeRef> {
        self.awaitable_templates.iter().find_map(|template| {
            match ty.instantiation_of(template) {
                Some([result]) => Some(result.clone()),
                _ => None,
            }
        })
    }
}

impl TypeOracle for PythonTypeOracle<'_> {
    fn resolve_type(&self, node: tree_sitter::Node<'_>) -> Option<TypeRef> {
        self.resolve_expression(node, 0)
    }

    fn supertypes(&self, name: &QualifiedName) -> Vec<QualifiedName> {
        if let Some(class) = self.index.class(name) {
            return class.bases.clone();
        }
        stdlib_type(name.as_str())
            .map(|known| {
                known
                    .supertypes
                    .iter()
                    .map(|supertype| QualifiedName::new(*supertype))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn declared_members(&self, name: &QualifiedName) -> Vec<String> {
        if let Some(class) = self.index.class(name) {
            let members: BTreeSet<&String> = class.methods.keys().collect();
            return members.into_iter().cloned().collect();
        }
        stdlib_type(name.as_str())
            .map(|known| {
                known
                    .members
                    .iter()
                    .map(|member| (*member).to_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
