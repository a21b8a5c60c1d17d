//! Ordinary property access walkers.
//!
//! These are free functions rather than `JsObject` methods so that each
//! step of a prototype walk or receiver write takes its own short-lived
//! borrow of the object cell.

use crate::runtime::context::EvalContext;
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::{JsObjectType, ObjectType};
use crate::runtime::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runtime::ds::operations::type_conversion::to_object;
use crate::runtime::ds::value::JsValue;

/// `[[Get]]` with the object itself as receiver.
pub fn get(ctx: &mut EvalContext, o: &JsObjectType, p: &PropertyKey) -> Result<JsValue, JsError> {
    ordinary_get(ctx, o, p, &JsValue::Object(o.clone()))
}

/// `[[Get]]` on an arbitrary value: the value is coerced to an object but
/// stays the receiver, so accessors observe the primitive.
pub fn get_v(ctx: &mut EvalContext, v: &JsValue, p: &PropertyKey) -> Result<JsValue, JsError> {
    let o = to_object(v)?;
    ordinary_get(ctx, &o, p, v)
}

pub fn ordinary_get(
    ctx: &mut EvalContext,
    o: &JsObjectType,
    p: &PropertyKey,
    receiver: &JsValue,
) -> Result<JsValue, JsError> {
    let own = (**o).borrow().as_js_object().get_own_property(p).cloned();
    match own {
        None => {
            let proto = (**o).borrow().as_js_object().get_prototype_of();
            match proto {
                None => Ok(JsValue::Undefined),
                Some(parent) => ordinary_get(ctx, &parent, p, receiver),
            }
        }
        Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
        Some(PropertyDescriptor::Accessor { get: None, .. }) => Ok(JsValue::Undefined),
        Some(PropertyDescriptor::Accessor {
            get: Some(getter), ..
        }) => call(ctx, &JsValue::Object(getter), receiver, Vec::new()),
    }
}

/// `[[Set]]` with the object itself as receiver; faults on failure when
/// `throw` is set.
pub fn set(
    ctx: &mut EvalContext,
    o: &JsObjectType,
    p: PropertyKey,
    value: JsValue,
    throw: bool,
) -> Result<bool, JsError> {
    let receiver = JsValue::Object(o.clone());
    let key = p.clone();
    let ok = ordinary_set(ctx, o, p, value, &receiver)?;
    if !ok && throw {
        return Err(JsError::TypeError(format!(
            "cannot assign to property '{}'",
            key
        )));
    }
    Ok(ok)
}

enum OwnSlot {
    Missing,
    Data { writable: bool },
    AccessorWithSet(JsObjectType),
    AccessorNoSet,
}

fn own_slot(o: &JsObjectType, p: &PropertyKey) -> OwnSlot {
    match (**o).borrow().as_js_object().get_own_property(p) {
        None => OwnSlot::Missing,
        Some(PropertyDescriptor::Data { writable, .. }) => OwnSlot::Data {
            writable: *writable,
        },
        Some(PropertyDescriptor::Accessor { set: Some(s), .. }) => {
            OwnSlot::AccessorWithSet(s.clone())
        }
        Some(PropertyDescriptor::Accessor { set: None, .. }) => OwnSlot::AccessorNoSet,
    }
}

pub fn ordinary_set(
    ctx: &mut EvalContext,
    o: &JsObjectType,
    p: PropertyKey,
    value: JsValue,
    receiver: &JsValue,
) -> Result<bool, JsError> {
    match own_slot(o, &p) {
        OwnSlot::Missing => {
            let proto = (**o).borrow().as_js_object().get_prototype_of();
            match proto {
                Some(parent) => ordinary_set(ctx, &parent, p, value, receiver),
                // No slot anywhere on the chain: behaves as a writable
                // data slot and lands on the receiver.
                None => write_to_receiver(p, value, receiver),
            }
        }
        OwnSlot::Data { writable: false } => Ok(false),
        OwnSlot::Data { writable: true } => write_to_receiver(p, value, receiver),
        OwnSlot::AccessorNoSet => Ok(false),
        OwnSlot::AccessorWithSet(setter) => {
            call(ctx, &JsValue::Object(setter), receiver, vec![value])?;
            Ok(true)
        }
    }
}

fn write_to_receiver(p: PropertyKey, value: JsValue, receiver: &JsValue) -> Result<bool, JsError> {
    let r = match receiver {
        JsValue::Object(r) => r,
        // Primitive receiver: the write has nowhere durable to land.
        _ => return Ok(false),
    };
    match own_slot(r, &p) {
        OwnSlot::Data { writable: true } => {
            Ok(r.borrow_mut().as_js_object_mut().update_own_data_property(&p, value))
        }
        OwnSlot::Data { writable: false }
        | OwnSlot::AccessorWithSet(_)
        | OwnSlot::AccessorNoSet => Ok(false),
        OwnSlot::Missing => Ok(r
            .borrow_mut()
            .as_js_object_mut()
            .define_own_property(p, PropertyDescriptor::new_data(value))),
    }
}

/// Looks up `p` on `v` expecting a callable; absent is `Undefined`, a
/// present non-callable faults.
pub fn get_method(
    ctx: &mut EvalContext,
    v: &JsValue,
    p: &PropertyKey,
) -> Result<JsValue, JsError> {
    let f = get_v(ctx, v, p)?;
    match &f {
        JsValue::Undefined | JsValue::Null => Ok(JsValue::Undefined),
        JsValue::Object(o) => {
            if (**o).borrow().is_callable() {
                Ok(f)
            } else {
                Err(JsError::TypeError(format!("'{}' is not a function", p)))
            }
        }
        _ => Err(JsError::TypeError(format!("'{}' is not a function", p))),
    }
}

pub fn call(
    ctx: &mut EvalContext,
    f: &JsValue,
    this: &JsValue,
    args: Vec<JsValue>,
) -> Result<JsValue, JsError> {
    match f {
        JsValue::Object(o) => {
            let target = (**o).borrow();
            match &*target {
                ObjectType::Function(func) => func.call(ctx, this, args),
                _ => Err(JsError::TypeError(format!("{} is not a function", f))),
            }
        }
        _ => Err(JsError::TypeError(format!("{} is not a function", f))),
    }
}

pub fn has_own_property(o: &JsObjectType, p: &PropertyKey) -> bool {
    (**o).borrow().as_js_object().get_own_property(p).is_some()
}

pub fn has_property(o: &JsObjectType, p: &PropertyKey) -> bool {
    (**o).borrow().as_js_object().has_property(p)
}

pub fn create_data_property(o: &JsObjectType, p: PropertyKey, value: JsValue) -> bool {
    o.borrow_mut()
        .as_js_object_mut()
        .define_own_property(p, PropertyDescriptor::new_data(value))
}

pub fn define_property_or_throw(
    o: &JsObjectType,
    p: PropertyKey,
    descriptor: PropertyDescriptor,
) -> Result<(), JsError> {
    let key = p.clone();
    if o.borrow_mut().as_js_object_mut().define_own_property(p, descriptor) {
        Ok(())
    } else {
        Err(JsError::TypeError(format!(
            "cannot define property '{}'",
            key
        )))
    }
}
