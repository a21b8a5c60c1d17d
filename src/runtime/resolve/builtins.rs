//! Built-in resolver extensions.
//!
//! Two archetypal resolver shapes work without bespoke handler authoring:
//! callables (method extraction via a bind adapter) and associative stores
//! (hidden per-instance state keyed by the base).

use crate::runtime::context::EvalContext;
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::function_object::bound_function_create;
use crate::runtime::ds::object::{JsObjectType, ObjectType};
use crate::runtime::ds::value::JsValue;
use crate::runtime::resolve::registry::{HandlerSet, ResolverKind, ResolverRegistry};

/// Installs the built-in handler sets. Called once per registry, at
/// construction.
pub fn install_builtin_resolvers(registry: &mut ResolverRegistry) {
    registry.attach_handlers(
        ResolverKind::Function,
        HandlerSet {
            on_get: Some(callable_on_get),
            // Writing or deleting through a plain callable is not a thing;
            // leaving these unattached makes the engine fault.
            on_set: None,
            on_delete: None,
        },
    );
    registry.attach_handlers(
        ResolverKind::Store,
        HandlerSet {
            on_get: Some(store_on_get),
            on_set: Some(store_on_set),
            on_delete: Some(store_on_delete),
        },
    );
    log::debug!("installed built-in resolver extensions");
}

/// Read through a callable: returns a new function with the base
/// permanently fixed as receiver. Nothing is invoked at read time.
fn callable_on_get(
    _ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
) -> Result<JsValue, JsError> {
    let bound = bound_function_create(resolver.clone(), base.clone(), Vec::new())?;
    Ok(JsValue::Object(bound))
}

fn store_on_get(
    _ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
) -> Result<JsValue, JsError> {
    let guard = (**resolver).borrow();
    match &*guard {
        ObjectType::Store(store) => Ok(store
            .get_store_base()
            .lookup(base)
            .unwrap_or(JsValue::Undefined)),
        _ => Err(JsError::TypeError(
            "resolver is not an associative store".to_string(),
        )),
    }
}

fn store_on_set(
    _ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
    value: JsValue,
) -> Result<(), JsError> {
    let mut guard = resolver.borrow_mut();
    match &mut *guard {
        ObjectType::Store(store) => store.get_store_base_mut().insert(base.clone(), value),
        _ => Err(JsError::TypeError(
            "resolver is not an associative store".to_string(),
        )),
    }
}

fn store_on_delete(
    _ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
) -> Result<(), JsError> {
    let mut guard = resolver.borrow_mut();
    match &mut *guard {
        ObjectType::Store(store) => {
            // The mapping's presence does not influence the reported
            // outcome; removal of an absent key is a no-op.
            store.get_store_base_mut().remove(base);
            Ok(())
        }
        _ => Err(JsError::TypeError(
            "resolver is not an associative store".to_string(),
        )),
    }
}
