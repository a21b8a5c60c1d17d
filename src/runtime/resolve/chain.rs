//! The chaining operator front-end.
//!
//! The evaluation rule for `base :: resolver`: both operands are already
//! evaluated by the caller; this rule only builds the virtual Reference.
//! It never dispatches - whichever construct consumes the Reference hands
//! it to the engine as a read, a write target, or a removal operand.

use crate::runtime::ds::error::JsError;
use crate::runtime::ds::operations::type_conversion::get_type;
use crate::runtime::ds::reference::Reference;
use crate::runtime::ds::value::JsValue;

pub fn construct_virtual_reference(
    base: &JsValue,
    resolver: &JsValue,
    strict: bool,
) -> Result<Reference, JsError> {
    match base {
        JsValue::Undefined | JsValue::Null => Err(JsError::TypeError(format!(
            "{} cannot be the target of a bound member access",
            get_type(base)
        ))),
        _ => match resolver {
            JsValue::Object(o) => Ok(Reference::virtual_property(
                base.clone(),
                o.clone(),
                strict,
            )),
            other => Err(JsError::TypeError(format!(
                "a {} cannot supply reference handlers",
                get_type(other)
            ))),
        },
    }
}
