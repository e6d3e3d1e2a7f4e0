//! Type predicates deciding whether a binding acquires a pending computation
//! of a disposable resource.

use std::collections::{HashSet, VecDeque};

use unawaited_core::AnalysisConfig;
use unawaited_syntax::{QualifiedName, TypeOracle, TypeRef};

/// Members a type must declare to satisfy the context-manager protocol
/// structurally.
const PROTOCOL_MEMBERS: [&str; 2] = ["__enter__", "__exit__"];

/// Returns `true` when `ty` instantiates a pending-computation template with
/// exactly one type argument, and that argument is disposable.
///
/// Templates are matched by exact fully-qualified name.
#[must_use]
pub fn is_deferred_disposable(
    ty: &TypeRef,
    oracle: &dyn TypeOracle,
    config: &AnalysisConfig,
) -> bool {
    config
        .pending_templates()
        .iter()
        .any(|template| match ty.instantiation_of(template) {
            Some([result]) => is_disposable_capability(result, oracle, config),
            _ => false,
        })
}

/// Returns `true` when `ty`, or any type in its transitive supertype
/// closure, carries the disposal capability.
///
/// A type carries the capability when its name is a configured capability
/// or it declares both `__enter__` and `__exit__`. Each type is visited at
/// most once, so cyclic hierarchies terminate.
#[must_use]
pub fn is_disposable_capability(
    ty: &TypeRef,
    oracle: &dyn TypeOracle,
    config: &AnalysisConfig,
) -> bool {
    let mut visited: HashSet<QualifiedName> = HashSet::new();
    let mut queue = VecDeque::from([ty.name().clone()]);
    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        if config.is_disposal_capability(current.as_str()) || declares_protocol(oracle, &current)
        {
            return true;
        }
        queue.extend(oracle.supertypes(&current));
    }
    false
}

fn declares_protocol(oracle: &dyn TypeOracle, name: &QualifiedName) -> bool {
    let members = oracle.declared_members(name);
    PROTOCOL_MEMBERS
        .iter()
        .all(|required| members.iter().any(|member| member == required))
}
