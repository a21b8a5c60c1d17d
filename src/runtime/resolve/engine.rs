//! The resolution engine.
//!
//! One operation per access kind, each consuming a [`Reference`]. The
//! ordinary-vs-virtual decision was made when the Reference was built; the
//! engine only inspects the tag and routes the access: ordinary named-slot
//! machinery, the environment, or the resolver's handlers.
//!
//! Virtual dispatch order, shared by all three kinds: a handler the
//! resolver carries itself (a callable under the matching well-known
//! symbol), then the handler registered for the resolver's shape, then a
//! fault - the resolver is not invocable for that access kind.

use crate::runtime::context::EvalContext;
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::JsObjectType;
use crate::runtime::ds::object_property::PropertyKey;
use crate::runtime::ds::operations::object::{call, get_method, ordinary_get, ordinary_set};
use crate::runtime::ds::operations::type_conversion::to_object;
use crate::runtime::ds::reference::{Reference, ReferenceBase, ReferencedName};
use crate::runtime::ds::symbol::{
    SYMBOL_REFERENCE_DELETE, SYMBOL_REFERENCE_GET, SYMBOL_REFERENCE_SET,
};
use crate::runtime::ds::value::JsValue;
use crate::runtime::resolve::registry::ResolverKind;

/// Reads the value a reference describes.
pub fn get_value(ctx: &mut EvalContext, r: &Reference) -> Result<JsValue, JsError> {
    match (r.base(), r.referenced_name()) {
        (ReferenceBase::Unresolvable, name) => Err(JsError::ReferenceError(format!(
            "'{}' is not defined",
            name_for_message(name)
        ))),
        (ReferenceBase::Value(base), ReferencedName::Resolver(resolver)) => {
            let resolver = resolver.clone();
            let base = base.clone();
            virtual_get(ctx, &resolver, &base)
        }
        (ReferenceBase::Value(base), ReferencedName::Key(key)) => {
            let o = to_object(base)?;
            let key = key.clone();
            let receiver = r.get_this_value();
            ordinary_get(ctx, &o, &key, &receiver)
        }
        (ReferenceBase::Environment, ReferencedName::Key(PropertyKey::Str(name))) => {
            let name = name.clone();
            ctx.get_binding(&name)
        }
        (ReferenceBase::Environment, name) => Err(JsError::ReferenceError(format!(
            "'{}' does not name a binding",
            name_for_message(name)
        ))),
    }
}

/// Performs the write a reference describes.
pub fn put_value(ctx: &mut EvalContext, r: &Reference, value: JsValue) -> Result<(), JsError> {
    match (r.base(), r.referenced_name()) {
        (ReferenceBase::Unresolvable, name) => {
            if r.is_strict() {
                return Err(JsError::ReferenceError(format!(
                    "'{}' is not defined",
                    name_for_message(name)
                )));
            }
            match name {
                ReferencedName::Key(PropertyKey::Str(n)) => {
                    let n = n.clone();
                    ctx.create_global_binding(&n, value)
                }
                other => Err(JsError::ReferenceError(format!(
                    "'{}' does not name a binding",
                    name_for_message(other)
                ))),
            }
        }
        (ReferenceBase::Value(base), ReferencedName::Resolver(resolver)) => {
            let resolver = resolver.clone();
            let base = base.clone();
            virtual_set(ctx, &resolver, &base, value)
        }
        (ReferenceBase::Value(base), ReferencedName::Key(key)) => {
            let o = to_object(base)?;
            let key = key.clone();
            let receiver = r.get_this_value();
            let succeeded = ordinary_set(ctx, &o, key.clone(), value, &receiver)?;
            if !succeeded && r.is_strict() {
                Err(JsError::TypeError(format!(
                    "cannot assign to property '{}'",
                    key
                )))
            } else {
                Ok(())
            }
        }
        (ReferenceBase::Environment, ReferencedName::Key(PropertyKey::Str(name))) => {
            let name = name.clone();
            ctx.set_binding(&name, value)
        }
        (ReferenceBase::Environment, name) => Err(JsError::ReferenceError(format!(
            "'{}' does not name a binding",
            name_for_message(name)
        ))),
    }
}

/// Performs the removal a reference describes, reporting the outcome.
pub fn delete_value(ctx: &mut EvalContext, r: &Reference) -> Result<bool, JsError> {
    match (r.base(), r.referenced_name()) {
        (ReferenceBase::Unresolvable, _) => Ok(true),
        (ReferenceBase::Value(base), ReferencedName::Resolver(resolver)) => {
            let resolver = resolver.clone();
            let base = base.clone();
            virtual_delete(ctx, &resolver, &base)?;
            // The handler's internal outcome is never surfaced; a virtual
            // delete that returns reports success.
            Ok(true)
        }
        (ReferenceBase::Value(base), ReferencedName::Key(key)) => {
            if r.is_super_reference() {
                return Err(JsError::ReferenceError(
                    "cannot delete a super property".to_string(),
                ));
            }
            let o = to_object(base)?;
            let succeeded = o.borrow_mut().as_js_object_mut().delete(key);
            if !succeeded && r.is_strict() {
                Err(JsError::TypeError(format!(
                    "cannot delete property '{}'",
                    key
                )))
            } else {
                Ok(succeeded)
            }
        }
        (ReferenceBase::Environment, ReferencedName::Key(PropertyKey::Str(name))) => {
            let name = name.clone();
            ctx.delete_binding(&name)
        }
        (ReferenceBase::Environment, name) => Err(JsError::ReferenceError(format!(
            "'{}' does not name a binding",
            name_for_message(name)
        ))),
    }
}

fn name_for_message(name: &ReferencedName) -> String {
    match name {
        ReferencedName::Key(key) => key.to_string(),
        ReferencedName::Resolver(o) => (**o).borrow().as_js_object().to_string(),
    }
}

fn virtual_get(
    ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
) -> Result<JsValue, JsError> {
    let resolver_value = JsValue::Object(resolver.clone());
    let own = get_method(
        ctx,
        &resolver_value,
        &PropertyKey::Sym(SYMBOL_REFERENCE_GET.clone()),
    )?;
    if !matches!(own, JsValue::Undefined) {
        return call(ctx, &own, &resolver_value, vec![base.clone()]);
    }
    if let Some(handler) = ctx.registry().on_get(ResolverKind::of(resolver)) {
        return handler(ctx, resolver, base);
    }
    Err(JsError::TypeError(format!(
        "{} has no read handler",
        resolver_value
    )))
}

fn virtual_set(
    ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
    value: JsValue,
) -> Result<(), JsError> {
    let resolver_value = JsValue::Object(resolver.clone());
    let own = get_method(
        ctx,
        &resolver_value,
        &PropertyKey::Sym(SYMBOL_REFERENCE_SET.clone()),
    )?;
    if !matches!(own, JsValue::Undefined) {
        // The resolver owns write-failure semantics; a call that returns
        // is a successful write whatever it returned.
        call(ctx, &own, &resolver_value, vec![base.clone(), value])?;
        return Ok(());
    }
    if let Some(handler) = ctx.registry().on_set(ResolverKind::of(resolver)) {
        return handler(ctx, resolver, base, value);
    }
    Err(JsError::TypeError(format!(
        "{} has no write handler",
        resolver_value
    )))
}

fn virtual_delete(
    ctx: &mut EvalContext,
    resolver: &JsObjectType,
    base: &JsValue,
) -> Result<(), JsError> {
    let resolver_value = JsValue::Object(resolver.clone());
    let own = get_method(
        ctx,
        &resolver_value,
        &PropertyKey::Sym(SYMBOL_REFERENCE_DELETE.clone()),
    )?;
    if !matches!(own, JsValue::Undefined) {
        call(ctx, &own, &resolver_value, vec![base.clone()])?;
        return Ok(());
    }
    if let Some(handler) = ctx.registry().on_delete(ResolverKind::of(resolver)) {
        return handler(ctx, resolver, base);
    }
    Err(JsError::TypeError(format!(
        "{} has no delete handler",
        resolver_value
    )))
}
