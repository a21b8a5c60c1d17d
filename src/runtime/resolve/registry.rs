use std::collections::HashMap;

use crate::runtime::context::EvalContext;
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::{JsObjectType, ObjectType};
use crate::runtime::ds::value::JsValue;
use crate::runtime::resolve::builtins::install_builtin_resolvers;

/// Shape of a resolver object, derived from its object type. Built-in
/// handler sets are attached per shape; individual objects can override
/// them with self-attached handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverKind {
    Function,
    Store,
    Ordinary,
}

impl ResolverKind {
    pub fn of(o: &JsObjectType) -> ResolverKind {
        match &*(**o).borrow() {
            ObjectType::Function(_) => ResolverKind::Function,
            ObjectType::Store(_) => ResolverKind::Store,
            ObjectType::Ordinary(_) => ResolverKind::Ordinary,
        }
    }
}

/// Read handler: `(resolver, base) -> value`.
pub type GetHandlerFn =
    fn(ctx: &mut EvalContext, resolver: &JsObjectType, base: &JsValue) -> Result<JsValue, JsError>;

/// Write handler: `(resolver, base, value)`.
pub type SetHandlerFn = fn(
    ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
    value: JsValue,
) -> Result<(), JsError>;

/// Delete handler: `(resolver, base)`.
pub type DeleteHandlerFn =
    fn(ctx: &mut EvalContext, resolver: &JsObjectType, base: &JsValue) -> Result<(), JsError>;

/// Up to three handlers, one per access kind. A `None` slot means the
/// kind is not invocable through this set.
#[derive(Clone, Copy, Default)]
pub struct HandlerSet {
    pub on_get: Option<GetHandlerFn>,
    pub on_set: Option<SetHandlerFn>,
    pub on_delete: Option<DeleteHandlerFn>,
}

/// Per-engine table mapping resolver shapes to handler sets. Owned by the
/// evaluation context so independent engine instances never share state.
pub struct ResolverRegistry {
    handlers: HashMap<ResolverKind, HandlerSet>,
}

impl ResolverRegistry {
    /// An empty registry: nothing resolves shape-wide.
    pub fn new() -> Self {
        ResolverRegistry {
            handlers: HashMap::new(),
        }
    }

    /// A registry with the built-in callable and store extensions
    /// installed.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        install_builtin_resolvers(&mut registry);
        registry
    }

    /// Attaches handlers for a resolver shape, merging per field so
    /// independent libraries can contribute different access kinds.
    pub fn attach_handlers(&mut self, kind: ResolverKind, set: HandlerSet) {
        let entry = self.handlers.entry(kind).or_insert_with(HandlerSet::default);
        if set.on_get.is_some() {
            entry.on_get = set.on_get;
        }
        if set.on_set.is_some() {
            entry.on_set = set.on_set;
        }
        if set.on_delete.is_some() {
            entry.on_delete = set.on_delete;
        }
        log::trace!("attached resolver handlers for {:?}", kind);
    }

    pub fn handler_set(&self, kind: ResolverKind) -> Option<&HandlerSet> {
        self.handlers.get(&kind)
    }

    pub fn on_get(&self, kind: ResolverKind) -> Option<GetHandlerFn> {
        self.handlers.get(&kind).and_then(|set| set.on_get)
    }

    pub fn on_set(&self, kind: ResolverKind) -> Option<SetHandlerFn> {
        self.handlers.get(&kind).and_then(|set| set.on_set)
    }

    pub fn on_delete(&self, kind: ResolverKind) -> Option<DeleteHandlerFn> {
        self.handlers.get(&kind).and_then(|set| set.on_delete)
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_get(
        _ctx: &mut EvalContext,
        _resolver: &JsObjectType,
        _base: &JsValue,
    ) -> Result<JsValue, JsError> {
        Ok(JsValue::Undefined)
    }

    fn noop_set(
        _ctx: &mut EvalContext,
        _resolver: &JsObjectType,
        _base: &JsValue,
        _value: JsValue,
    ) -> Result<(), JsError> {
        Ok(())
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = ResolverRegistry::new();
        assert!(registry.on_get(ResolverKind::Function).is_none());
        assert!(registry.on_set(ResolverKind::Store).is_none());
        assert!(registry.on_delete(ResolverKind::Ordinary).is_none());
    }

    #[test]
    fn test_attach_merges_per_field() {
        let mut registry = ResolverRegistry::new();
        registry.attach_handlers(
            ResolverKind::Ordinary,
            HandlerSet {
                on_get: Some(noop_get),
                ..HandlerSet::default()
            },
        );
        registry.attach_handlers(
            ResolverKind::Ordinary,
            HandlerSet {
                on_set: Some(noop_set),
                ..HandlerSet::default()
            },
        );
        assert!(registry.on_get(ResolverKind::Ordinary).is_some());
        assert!(registry.on_set(ResolverKind::Ordinary).is_some());
        assert!(registry.on_delete(ResolverKind::Ordinary).is_none());
    }

    #[test]
    fn test_builtins_cover_callables_and_stores() {
        let registry = ResolverRegistry::with_builtins();
        assert!(registry.on_get(ResolverKind::Function).is_some());
        assert!(registry.on_set(ResolverKind::Function).is_none());
        assert!(registry.on_delete(ResolverKind::Function).is_none());
        assert!(registry.on_get(ResolverKind::Store).is_some());
        assert!(registry.on_set(ResolverKind::Store).is_some());
        assert!(registry.on_delete(ResolverKind::Store).is_some());
    }
}
