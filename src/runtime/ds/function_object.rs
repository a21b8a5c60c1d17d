use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::context::EvalContext;
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::{JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runtime::ds::value::JsValue;

/// Signature of a compiled-in function body.
pub type NativeFn =
    fn(ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> Result<JsValue, JsError>;

/// A function body - either a direct function pointer (zero overhead) or a
/// boxed closure carrying captured state. The engine is single-threaded,
/// so closures need not be `Send + Sync`.
pub enum NativeCallable {
    Static(NativeFn),
    Boxed(Box<dyn Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JsError>>),
}

impl NativeCallable {
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JsError> {
        match self {
            NativeCallable::Static(f) => f(ctx, this, args),
            NativeCallable::Boxed(f) => f(ctx, this, args),
        }
    }
}

pub struct FunctionObjectBase {
    pub name: String,
    object_base: ObjectBase,
}

impl FunctionObjectBase {
    pub fn new(name: String) -> Self {
        FunctionObjectBase {
            name,
            object_base: ObjectBase::new(),
        }
    }

    pub fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    pub fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }
}

pub trait JsFunctionObject: JsObject {
    fn get_function_object_base(&self) -> &FunctionObjectBase;

    fn get_function_object_base_mut(&mut self) -> &mut FunctionObjectBase;

    fn as_js_function_object(&self) -> &dyn JsFunctionObject;

    fn as_js_function_object_mut(&mut self) -> &mut dyn JsFunctionObject;

    fn call(
        &self,
        ctx: &mut EvalContext,
        this: &JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JsError>;
}

pub struct NativeFunctionObject {
    function_base: FunctionObjectBase,
    callable: NativeCallable,
}

impl NativeFunctionObject {
    pub fn new(name: &str, f: NativeFn) -> Self {
        NativeFunctionObject {
            function_base: FunctionObjectBase::new(name.to_string()),
            callable: NativeCallable::Static(f),
        }
    }

    pub fn from_closure<F>(name: &str, f: F) -> Self
    where
        F: Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JsError> + 'static,
    {
        NativeFunctionObject {
            function_base: FunctionObjectBase::new(name.to_string()),
            callable: NativeCallable::Boxed(Box::new(f)),
        }
    }
}

impl JsObject for NativeFunctionObject {
    fn get_object_base(&self) -> &ObjectBase {
        self.function_base.get_object_base()
    }

    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        self.function_base.get_object_base_mut()
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn to_string(&self) -> String {
        format!(
            "function {}() {{ [native code] }}",
            self.function_base.name
        )
    }
}

impl JsFunctionObject for NativeFunctionObject {
    fn get_function_object_base(&self) -> &FunctionObjectBase {
        &self.function_base
    }

    fn get_function_object_base_mut(&mut self) -> &mut FunctionObjectBase {
        &mut self.function_base
    }

    fn as_js_function_object(&self) -> &dyn JsFunctionObject {
        self
    }

    fn as_js_function_object_mut(&mut self) -> &mut dyn JsFunctionObject {
        self
    }

    fn call(
        &self,
        ctx: &mut EvalContext,
        this: &JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JsError> {
        self.callable.call(ctx, this.clone(), args)
    }
}

pub fn native_function_create(name: &str, f: NativeFn) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Function(Box::new(
        NativeFunctionObject::new(name, f),
    ))))
}

pub fn closure_function_create<F>(name: &str, f: F) -> JsObjectType
where
    F: Fn(&mut EvalContext, JsValue, Vec<JsValue>) -> Result<JsValue, JsError> + 'static,
{
    Rc::new(RefCell::new(ObjectType::Function(Box::new(
        NativeFunctionObject::from_closure(name, f),
    ))))
}

/// The bind adapter. Wraps a target callable with a permanently fixed
/// receiver and prepended arguments; the receiver a later caller supplies
/// is ignored.
pub struct BoundFunctionObject {
    bound_target_function: JsObjectType,
    bound_this: JsValue,
    bound_arguments: Vec<JsValue>,
    function_base: FunctionObjectBase,
}

impl JsObject for BoundFunctionObject {
    fn get_object_base(&self) -> &ObjectBase {
        self.function_base.get_object_base()
    }

    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        self.function_base.get_object_base_mut()
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn to_string(&self) -> String {
        format!(
            "function {}() {{ [native code] }}",
            self.function_base.name
        )
    }
}

impl JsFunctionObject for BoundFunctionObject {
    fn get_function_object_base(&self) -> &FunctionObjectBase {
        &self.function_base
    }

    fn get_function_object_base_mut(&mut self) -> &mut FunctionObjectBase {
        &mut self.function_base
    }

    fn as_js_function_object(&self) -> &dyn JsFunctionObject {
        self
    }

    fn as_js_function_object_mut(&mut self) -> &mut dyn JsFunctionObject {
        self
    }

    fn call(
        &self,
        ctx: &mut EvalContext,
        _this: &JsValue,
        args: Vec<JsValue>,
    ) -> Result<JsValue, JsError> {
        let mut input_args = args;
        let mut new_args = self.bound_arguments.clone();
        new_args.append(&mut input_args);
        let target = (*self.bound_target_function).borrow();
        match &*target {
            ObjectType::Function(f) => f.call(ctx, &self.bound_this, new_args),
            _ => Err(JsError::TypeError(
                "bound target is not a function".to_string(),
            )),
        }
    }
}

pub fn bound_function_create(
    target: JsObjectType,
    bound_this: JsValue,
    bound_arguments: Vec<JsValue>,
) -> Result<JsObjectType, JsError> {
    let name = {
        let t = (*target).borrow();
        match &*t {
            ObjectType::Function(f) => {
                format!("bound {}", f.get_function_object_base().name)
            }
            _ => {
                return Err(JsError::TypeError(format!(
                    "{} is not a function",
                    t.as_js_object().to_string()
                )))
            }
        }
    };
    Ok(Rc::new(RefCell::new(ObjectType::Function(Box::new(
        BoundFunctionObject {
            bound_target_function: target,
            bound_this,
            bound_arguments,
            function_base: FunctionObjectBase::new(name),
        },
    )))))
}
