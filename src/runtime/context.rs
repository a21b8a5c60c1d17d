use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::ds::env_record::{EnvironmentRecordType, GlobalEnvironmentRecord};
use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::{object_create, JsObjectType};
use crate::runtime::ds::object_property::PropertyKey;
use crate::runtime::ds::operations::object::set;
use crate::runtime::ds::reference::Reference;
use crate::runtime::ds::value::JsValue;
use crate::runtime::resolve::registry::ResolverRegistry;

/// Evaluation context: the global object, the global environment record,
/// the resolver registry, and the ambient strictness flag copied into
/// every reference built through this context.
pub struct EvalContext {
    global_object: JsObjectType,
    global_env: Rc<RefCell<EnvironmentRecordType>>,
    registry: ResolverRegistry,
    pub strict: bool,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::with_registry(ResolverRegistry::with_builtins())
    }

    /// A context over a caller-supplied registry. Registries are
    /// per-context, so engine instances stay independent.
    pub fn with_registry(registry: ResolverRegistry) -> Self {
        let global_object = object_create(None);
        let global_env = Rc::new(RefCell::new(EnvironmentRecordType::Global(
            GlobalEnvironmentRecord::new(global_object.clone()),
        )));
        EvalContext {
            global_object,
            global_env,
            registry,
            strict: false,
        }
    }

    pub fn global_object(&self) -> &JsObjectType {
        &self.global_object
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ResolverRegistry {
        &mut self.registry
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.global_env.borrow().as_env_record().has_binding(name)
    }

    /// Builds the reference an identifier evaluates to: an environment
    /// reference when the name is bound, otherwise unresolvable. The
    /// ambient strictness flag is captured into the reference.
    pub fn resolve_binding(&self, name: &str) -> Reference {
        if self.has_binding(name) {
            Reference::environment(name, self.strict)
        } else {
            Reference::unresolvable(name, self.strict)
        }
    }

    pub fn get_binding(&mut self, name: &str) -> Result<JsValue, JsError> {
        let env = self.global_env.clone();
        let env = env.borrow();
        env.as_env_record().get_binding_value(self, name)
    }

    pub fn set_binding(&mut self, name: &str, value: JsValue) -> Result<(), JsError> {
        let env = self.global_env.clone();
        let mut env = env.borrow_mut();
        env.as_env_record_mut()
            .set_mutable_binding(self, name.to_string(), value)
    }

    /// Declares and initializes a lexical binding in the global scope.
    /// Lexical bindings shadow same-named global object properties and are
    /// not deletable.
    pub fn declare_lexical_binding(&mut self, name: &str, value: JsValue) -> Result<(), JsError> {
        let env = self.global_env.clone();
        let mut env = env.borrow_mut();
        let record = env.as_env_record_mut();
        record.create_mutable_binding(name.to_string(), false)?;
        record.initialize_binding(self, name.to_string(), value)?;
        Ok(())
    }

    /// The non-strict fallback for writing an unresolvable reference: a
    /// plain, non-faulting `[[Set]]` on the global object.
    pub fn create_global_binding(&mut self, name: &str, value: JsValue) -> Result<(), JsError> {
        let global = self.global_object.clone();
        set(self, &global, PropertyKey::str(name), value, false)?;
        Ok(())
    }

    pub fn delete_binding(&mut self, name: &str) -> Result<bool, JsError> {
        let env = self.global_env.clone();
        let mut env = env.borrow_mut();
        env.as_env_record_mut().delete_binding(name)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}
