use std::rc::Rc;

use crate::runtime::ds::object::JsObjectType;
use crate::runtime::ds::value::{JsNumberType, JsValue};

fn number_as_f64(n: &JsNumberType) -> f64 {
    match n {
        JsNumberType::Integer(i) => *i as f64,
        JsNumberType::Float(f) => *f,
        JsNumberType::NaN => f64::NAN,
        JsNumberType::PositiveInfinity => f64::INFINITY,
        JsNumberType::NegativeInfinity => f64::NEG_INFINITY,
    }
}

/// Identity comparison: `NaN` is the same value as `NaN`, objects compare
/// by pointer. This is the key identity used by associative stores.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) => true,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Symbol(x), JsValue::Symbol(y)) => x == y,
        (JsValue::Number(JsNumberType::NaN), JsValue::Number(JsNumberType::NaN)) => true,
        (JsValue::Number(x), JsValue::Number(y)) => number_as_f64(x) == number_as_f64(y),
        (JsValue::Object(x), JsValue::Object(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// The `===` comparison: like [`same_value`] except `NaN` equals nothing,
/// itself included.
pub fn strict_equality(a: &JsValue, b: &JsValue) -> bool {
    match (a, b) {
        (JsValue::Number(JsNumberType::NaN), _) | (_, JsValue::Number(JsNumberType::NaN)) => false,
        _ => same_value(a, b),
    }
}

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}
