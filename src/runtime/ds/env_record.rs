use std::collections::HashMap;

use crate::runtime::context::EvalContext;
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::JsObjectType;
use crate::runtime::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runtime::ds::operations::object::{
    define_property_or_throw, get, has_property, set,
};
use crate::runtime::ds::value::JsValue;

/// The binding collaborator for non-property references: lookup,
/// assignment and removal of named bindings.
pub trait EnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool;
    fn create_mutable_binding(&mut self, name: String, can_delete: bool) -> Result<(), JsError>;
    fn create_immutable_binding(&mut self, name: String) -> Result<(), JsError>;
    fn initialize_binding(
        &mut self,
        ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<bool, JsError>;
    fn set_mutable_binding(
        &mut self,
        ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<(), JsError>;
    fn get_binding_value(&self, ctx: &mut EvalContext, name: &str) -> Result<JsValue, JsError>;
    fn delete_binding(&mut self, name: &str) -> Result<bool, JsError>;
}

pub enum EnvironmentRecordType {
    Declarative(DeclarativeEnvironmentRecord),
    Object(ObjectEnvironmentRecord),
    Global(GlobalEnvironmentRecord),
}

impl EnvironmentRecordType {
    pub fn as_env_record(&self) -> &dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Object(d) => d,
            EnvironmentRecordType::Global(d) => d,
        }
    }

    pub fn as_env_record_mut(&mut self) -> &mut dyn EnvironmentRecord {
        match self {
            EnvironmentRecordType::Declarative(d) => d,
            EnvironmentRecordType::Object(d) => d,
            EnvironmentRecordType::Global(d) => d,
        }
    }
}

#[derive(PartialEq)]
pub enum BindingFlag {
    NoDelete,
    IsImmutable,
}

pub struct DeclarativeEnvironmentRecord {
    bindings: HashMap<String, Option<JsValue>>,
    binding_flags: HashMap<String, Vec<BindingFlag>>,
}

impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        DeclarativeEnvironmentRecord {
            bindings: HashMap::new(),
            binding_flags: HashMap::new(),
        }
    }
}

impl Default for DeclarativeEnvironmentRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentRecord for DeclarativeEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    fn create_mutable_binding(&mut self, name: String, can_delete: bool) -> Result<(), JsError> {
        if !self.has_binding(&name) {
            self.bindings.insert(name.clone(), None);
            if can_delete {
                self.binding_flags.insert(name, vec![]);
            } else {
                self.binding_flags.insert(name, vec![BindingFlag::NoDelete]);
            }
        }
        Ok(())
    }

    fn create_immutable_binding(&mut self, name: String) -> Result<(), JsError> {
        if !self.has_binding(&name) {
            self.bindings.insert(name.clone(), None);
            self.binding_flags
                .insert(name, vec![BindingFlag::IsImmutable]);
        }
        Ok(())
    }

    fn initialize_binding(
        &mut self,
        _ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<bool, JsError> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            if slot.is_none() {
                *slot = Some(value);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn set_mutable_binding(
        &mut self,
        _ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<(), JsError> {
        match self.bindings.get(&name) {
            None => Err(JsError::ReferenceError(format!(
                "'{}' is not defined",
                name
            ))),
            Some(None) => Err(JsError::ReferenceError(format!(
                "'{}' is not initialized",
                name
            ))),
            Some(Some(_)) => {
                let immutable = self
                    .binding_flags
                    .get(&name)
                    .map(|flags| flags.contains(&BindingFlag::IsImmutable))
                    .unwrap_or(false);
                if immutable {
                    Err(JsError::TypeError(format!("'{}' is set and immutable", name)))
                } else {
                    self.bindings.insert(name, Some(value));
                    Ok(())
                }
            }
        }
    }

    fn get_binding_value(&self, _ctx: &mut EvalContext, name: &str) -> Result<JsValue, JsError> {
        match self.bindings.get(name) {
            None => Err(JsError::ReferenceError(format!(
                "'{}' is not defined",
                name
            ))),
            Some(None) => Err(JsError::ReferenceError(format!(
                "'{}' is not initialized",
                name
            ))),
            Some(Some(v)) => Ok(v.clone()),
        }
    }

    fn delete_binding(&mut self, name: &str) -> Result<bool, JsError> {
        Ok(if let Some(flags) = self.binding_flags.get(name) {
            if flags.contains(&BindingFlag::NoDelete) {
                false
            } else {
                self.bindings.remove(name);
                self.binding_flags.remove(name);
                true
            }
        } else {
            false
        })
    }
}

/// Bindings backed by the properties of an object.
pub struct ObjectEnvironmentRecord {
    binding_object: JsObjectType,
}

impl ObjectEnvironmentRecord {
    pub fn new(o: JsObjectType) -> Self {
        ObjectEnvironmentRecord { binding_object: o }
    }

    pub fn binding_object(&self) -> &JsObjectType {
        &self.binding_object
    }
}

impl EnvironmentRecord for ObjectEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        has_property(&self.binding_object, &PropertyKey::str(name))
    }

    fn create_mutable_binding(&mut self, name: String, can_delete: bool) -> Result<(), JsError> {
        define_property_or_throw(
            &self.binding_object,
            PropertyKey::Str(name),
            PropertyDescriptor::Data {
                value: JsValue::Undefined,
                writable: true,
                enumerable: true,
                configurable: can_delete,
            },
        )
    }

    fn create_immutable_binding(&mut self, _name: String) -> Result<(), JsError> {
        Err(JsError::TypeError(
            "object environment records do not hold immutable bindings".to_string(),
        ))
    }

    fn initialize_binding(
        &mut self,
        ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<bool, JsError> {
        self.set_mutable_binding(ctx, name, value)?;
        Ok(true)
    }

    fn set_mutable_binding(
        &mut self,
        ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<(), JsError> {
        set(ctx, &self.binding_object, PropertyKey::Str(name), value, false)?;
        Ok(())
    }

    fn get_binding_value(&self, ctx: &mut EvalContext, name: &str) -> Result<JsValue, JsError> {
        let p = PropertyKey::str(name);
        if has_property(&self.binding_object, &p) {
            get(ctx, &self.binding_object, &p)
        } else {
            Err(JsError::ReferenceError(format!(
                "'{}' is not defined",
                name
            )))
        }
    }

    fn delete_binding(&mut self, name: &str) -> Result<bool, JsError> {
        Ok(self
            .binding_object
            .borrow_mut()
            .as_js_object_mut()
            .delete(&PropertyKey::str(name)))
    }
}

/// The global scope: a declarative record for lexical declarations layered
/// over an object record whose binding object is the global object.
pub struct GlobalEnvironmentRecord {
    declarative_record: DeclarativeEnvironmentRecord,
    object_record: ObjectEnvironmentRecord,
}

impl GlobalEnvironmentRecord {
    pub fn new(global_object: JsObjectType) -> Self {
        GlobalEnvironmentRecord {
            declarative_record: DeclarativeEnvironmentRecord::new(),
            object_record: ObjectEnvironmentRecord::new(global_object),
        }
    }

    pub fn get_this_binding(&self) -> JsObjectType {
        self.object_record.binding_object().clone()
    }
}

impl EnvironmentRecord for GlobalEnvironmentRecord {
    fn has_binding(&self, name: &str) -> bool {
        self.declarative_record.has_binding(name) || self.object_record.has_binding(name)
    }

    fn create_mutable_binding(&mut self, name: String, can_delete: bool) -> Result<(), JsError> {
        if self.declarative_record.has_binding(&name) {
            return Err(JsError::TypeError(format!(
                "'{}' has already been declared",
                name
            )));
        }
        self.declarative_record.create_mutable_binding(name, can_delete)
    }

    fn create_immutable_binding(&mut self, name: String) -> Result<(), JsError> {
        if self.declarative_record.has_binding(&name) {
            return Err(JsError::TypeError(format!(
                "'{}' has already been declared",
                name
            )));
        }
        self.declarative_record.create_immutable_binding(name)
    }

    fn initialize_binding(
        &mut self,
        ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<bool, JsError> {
        if self.declarative_record.has_binding(&name) {
            self.declarative_record.initialize_binding(ctx, name, value)
        } else {
            self.object_record.initialize_binding(ctx, name, value)
        }
    }

    fn set_mutable_binding(
        &mut self,
        ctx: &mut EvalContext,
        name: String,
        value: JsValue,
    ) -> Result<(), JsError> {
        if self.declarative_record.has_binding(&name) {
            self.declarative_record.set_mutable_binding(ctx, name, value)
        } else {
            self.object_record.set_mutable_binding(ctx, name, value)
        }
    }

    fn get_binding_value(&self, ctx: &mut EvalContext, name: &str) -> Result<JsValue, JsError> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.get_binding_value(ctx, name)
        } else {
            self.object_record.get_binding_value(ctx, name)
        }
    }

    fn delete_binding(&mut self, name: &str) -> Result<bool, JsError> {
        if self.declarative_record.has_binding(name) {
            self.declarative_record.delete_binding(name)
        } else {
            self.object_record.delete_binding(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarative_binding_lifecycle() {
        let mut ctx = EvalContext::new();
        let mut rec = DeclarativeEnvironmentRecord::new();
        rec.create_mutable_binding("x".to_string(), true).unwrap();
        assert!(rec.has_binding("x"));

        assert!(rec
            .get_binding_value(&mut ctx, "x")
            .unwrap_err()
            .is_reference_error());

        rec.initialize_binding(&mut ctx, "x".to_string(), JsValue::Boolean(true))
            .unwrap();
        assert_eq!(
            rec.get_binding_value(&mut ctx, "x").unwrap(),
            JsValue::Boolean(true)
        );

        rec.set_mutable_binding(&mut ctx, "x".to_string(), JsValue::Boolean(false))
            .unwrap();
        assert_eq!(
            rec.get_binding_value(&mut ctx, "x").unwrap(),
            JsValue::Boolean(false)
        );

        assert!(rec.delete_binding("x").unwrap());
        assert!(!rec.has_binding("x"));
    }

    #[test]
    fn test_declarative_immutable_binding_rejects_writes() {
        let mut ctx = EvalContext::new();
        let mut rec = DeclarativeEnvironmentRecord::new();
        rec.create_immutable_binding("k".to_string()).unwrap();
        rec.initialize_binding(&mut ctx, "k".to_string(), JsValue::Null)
            .unwrap();

        let err = rec
            .set_mutable_binding(&mut ctx, "k".to_string(), JsValue::Undefined)
            .unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_declarative_no_delete_flag_sticks() {
        let mut ctx = EvalContext::new();
        let mut rec = DeclarativeEnvironmentRecord::new();
        rec.create_mutable_binding("pinned".to_string(), false).unwrap();
        rec.initialize_binding(&mut ctx, "pinned".to_string(), JsValue::Null)
            .unwrap();
        assert!(!rec.delete_binding("pinned").unwrap());
        assert!(rec.has_binding("pinned"));
    }
}
