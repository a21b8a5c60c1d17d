use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::ds::function_object::JsFunctionObject;
use crate::runtime::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runtime::ds::store_object::JsStoreObject;
use crate::runtime::ds::value::JsValue;

pub type JsObjectType = Rc<RefCell<ObjectType>>;

/// Discriminates the built-in object shapes. The resolver registry keys
/// its built-in handler sets off this discriminant.
pub enum ObjectType {
    Ordinary(Box<dyn JsObject>),
    Function(Box<dyn JsFunctionObject>),
    Store(Box<dyn JsStoreObject>),
}

impl ObjectType {
    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function(_))
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o.as_super_trait(),
            ObjectType::Function(o) => o.as_super_trait(),
            ObjectType::Store(o) => o.as_super_trait(),
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o.as_super_trait_mut(),
            ObjectType::Function(o) => o.as_super_trait_mut(),
            ObjectType::Store(o) => o.as_super_trait_mut(),
        }
    }
}

pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    is_extensible: bool,
    prototype: Option<JsObjectType>,
}

impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            is_extensible: true,
            prototype: None,
        }
    }

    pub fn with_prototype(prototype: Option<JsObjectType>) -> Self {
        ObjectBase {
            properties: HashMap::new(),
            is_extensible: true,
            prototype,
        }
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordinary named-slot behavior. The `[[Get]]`/`[[Set]]` walkers live in
/// `operations::object` so they can take short-lived borrows while
/// following prototype chains and receivers.
pub trait JsObject {
    fn get_object_base(&self) -> &ObjectBase;

    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn as_super_trait(&self) -> &dyn JsObject;

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject;

    fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.get_object_base().prototype.clone()
    }

    fn is_extensible(&self) -> bool {
        self.get_object_base().is_extensible
    }

    fn prevent_extensions(&mut self) -> bool {
        self.get_object_base_mut().is_extensible = false;
        true
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.get_object_base().properties.get(property)
    }

    fn define_own_property(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) -> bool {
        ordinary_define_own_property(self, property, descriptor)
    }

    fn has_property(&self, property: &PropertyKey) -> bool {
        if self.get_object_base().properties.contains_key(property) {
            true
        } else {
            match &self.get_object_base().prototype {
                None => false,
                Some(o) => (**o).borrow().as_js_object().has_property(property),
            }
        }
    }

    /// Writes `value` into an existing own data slot. Reports `false` when
    /// the slot is absent, non-writable, or an accessor.
    fn update_own_data_property(&mut self, property: &PropertyKey, value: JsValue) -> bool {
        match self.get_object_base_mut().properties.get_mut(property) {
            Some(PropertyDescriptor::Data {
                value: slot,
                writable: true,
                ..
            }) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    fn delete(&mut self, property: &PropertyKey) -> bool {
        match self.get_own_property(property) {
            None => true,
            Some(pd) => {
                if pd.is_configurable() {
                    self.get_object_base_mut().properties.remove(property);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn to_string(&self) -> String {
        "object".to_string()
    }
}

pub fn ordinary_define_own_property<J: JsObject + ?Sized>(
    o: &mut J,
    property: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    match o.get_own_property(&property) {
        None => {
            if o.is_extensible() {
                o.get_object_base_mut().properties.insert(property, descriptor);
                true
            } else {
                false
            }
        }
        Some(current) => {
            // A non-configurable slot only accepts a data-to-data value
            // update while it is still writable.
            let allowed = current.is_configurable()
                || (current.is_data_descriptor()
                    && current.is_writable()
                    && descriptor.is_data_descriptor()
                    && !descriptor.is_configurable()
                    && descriptor.is_enumerable() == current.is_enumerable());
            if allowed {
                o.get_object_base_mut().properties.insert(property, descriptor);
            }
            allowed
        }
    }
}

pub struct CoreObject {
    base: ObjectBase,
}

impl CoreObject {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        CoreObject {
            base: ObjectBase::with_prototype(prototype),
        }
    }
}

impl JsObject for CoreObject {
    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }
}

pub fn object_create(prototype: Option<JsObjectType>) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(Box::new(CoreObject::new(
        prototype,
    )))))
}

/// Box for a primitive base value. Property-style access on booleans,
/// strings and numbers goes through one of these; the wrapper is built at
/// access time and discarded with the access.
pub struct PrimitiveWrapperObject {
    base: ObjectBase,
    primitive_data: JsValue,
}

impl PrimitiveWrapperObject {
    pub fn new(primitive_data: JsValue) -> Self {
        PrimitiveWrapperObject {
            base: ObjectBase::new(),
            primitive_data,
        }
    }

    pub fn primitive_data(&self) -> &JsValue {
        &self.primitive_data
    }
}

impl JsObject for PrimitiveWrapperObject {
    fn get_object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.base
    }

    fn as_super_trait(&self) -> &dyn JsObject {
        self
    }

    fn as_super_trait_mut(&mut self) -> &mut dyn JsObject {
        self
    }

    fn to_string(&self) -> String {
        format!("{}", self.primitive_data)
    }
}

pub fn primitive_wrapper_create(primitive_data: JsValue) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Ordinary(Box::new(
        PrimitiveWrapperObject::new(primitive_data),
    ))))
}
