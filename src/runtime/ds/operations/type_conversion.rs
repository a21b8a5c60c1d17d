use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::{primitive_wrapper_create, JsObjectType, ObjectType};
use crate::runtime::ds::value::JsValue;

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Symbol(_) => TYPE_STR_SYMBOL,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => match *(**o).borrow() {
            ObjectType::Ordinary(_) => TYPE_STR_OBJECT,
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
            ObjectType::Store(_) => TYPE_STR_OBJECT,
        },
    }
}

/// Coerces a value to an object handle. Primitives are boxed into a fresh
/// wrapper; `undefined` and `null` have no object form and fault.
pub fn to_object(v: &JsValue) -> Result<JsObjectType, JsError> {
    match v {
        JsValue::Undefined | JsValue::Null => Err(JsError::TypeError(format!(
            "{} cannot be converted to an object",
            get_type(v)
        ))),
        JsValue::Object(o) => Ok(o.clone()),
        other => Ok(primitive_wrapper_create(other.clone())),
    }
}
