use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::runtime::ds::error::JsError;
use crate::runtime::ds::object::{JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runtime::ds::operations::test_and_comparison::same_value;
use crate::runtime::ds::operations::type_conversion::get_type;
use crate::runtime::ds::value::JsValue;

/// Key discipline of an associative store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Any value can key an entry; the entry keeps the key alive.
    Strong,
    /// Only objects can key an entry, held weakly; an entry whose key has
    /// been collected is unobservable.
    Weak,
}

enum StoreKey {
    Strong(JsValue),
    Weak(Weak<RefCell<ObjectType>>),
}

impl StoreKey {
    fn matches(&self, key: &JsValue) -> bool {
        match self {
            StoreKey::Strong(k) => same_value(k, key),
            StoreKey::Weak(w) => match (w.upgrade(), key) {
                (Some(held), JsValue::Object(o)) => Rc::ptr_eq(&held, o),
                _ => false,
            },
        }
    }

    fn is_dead(&self) -> bool {
        match self {
            StoreKey::Strong(_) => false,
            StoreKey::Weak(w) => w.upgrade().is_none(),
        }
    }
}

struct StoreEntry {
    key: StoreKey,
    value: JsValue,
}

/// Internal table of a key/value store object. Keys compare by
/// `same_value` identity, so `NaN` keys behave and object keys compare by
/// pointer.
pub struct StoreObjectBase {
    kind: StoreKind,
    entries: Vec<StoreEntry>,
}

impl StoreObjectBase {
    pub fn new(kind: StoreKind) -> Self {
        StoreObjectBase {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn lookup(&self, key: &JsValue) -> Option<JsValue> {
        self.entries
            .iter()
            .find(|e| e.key.matches(key))
            .map(|e| e.value.clone())
    }

    pub fn contains(&self, key: &JsValue) -> bool {
        self.entries.iter().any(|e| e.key.matches(key))
    }

    pub fn insert(&mut self, key: JsValue, value: JsValue) -> Result<(), JsError> {
        self.prune();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key.matches(&key)) {
            entry.value = value;
            return Ok(());
        }
        let key = match self.kind {
            StoreKind::Strong => StoreKey::Strong(key),
            StoreKind::Weak => match &key {
                JsValue::Object(o) => StoreKey::Weak(Rc::downgrade(o)),
                other => {
                    return Err(JsError::TypeError(format!(
                        "{} cannot be used as a weak store key",
                        get_type(other)
                    )))
                }
            },
        };
        self.entries.push(StoreEntry { key, value });
        Ok(())
    }

    pub fn remove(&mut self, key: &JsValue) -> bool {
        self.prune();
        let before = self.entries.len();
        self.entries.retain(|e| !e.key.matches(key));
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.key.is_dead()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&mut self) {
        self.entries.retain(|e| !e.key.is_dead());
    }
}

pub trait JsStoreObject: JsObject {
    fn get_store_base(&self) -> &StoreObjectBase;

    fn get_store_base_mut(&mut self) -> &mut StoreObjectBase;

    fn as_js_store_object(&self) -> &dyn JsStoreObject;

    fn as_js_store_object_mut(&mut self) -> &mut dyn JsStoreObject;
}

pub struct CoreStoreObject {
    base: ObjectBase,
    store_base: StoreObjectBase,
}

impl CoreStoreObject {
    pub fn new(kind: StoreKind) -> Self {
        CoreStoreObject {
            base: ObjectBase::new(),
            store_base: StoreObjectBase::new(kind),
        }
    }
}

impl JsStoreObject for CoreStoreObject {
    fn get_store_base(&self) -> &StoreObjectBase {
        &self.store_base
    }

    fn get_store_base_mut(&mut self) -> &mut StoreObjectBase {
        &mut self.store_base
    }

    fn as_js_store_object(&self) -> &dyn JsStoreObject {
        self
    }

    fn as_js_store_object_mut(&mut self) -> &mut dyn JsStoreObject {
        self
    }
}

impl JsObject for CoreStoreObject {
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
        match self.store_base.kind {
            StoreKind::Strong => "[object Store]".to_string(),
            StoreKind::Weak => "[object WeakStore]".to_string(),
        }
    }
}

pub fn store_create(kind: StoreKind) -> JsObjectType {
    Rc::new(RefCell::new(ObjectType::Store(Box::new(
        CoreStoreObject::new(kind),
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ds::object::object_create;
    use crate::runtime::ds::value::JsNumberType;

    #[test]
    fn test_strong_insert_lookup_overwrite() {
        let mut store = StoreObjectBase::new(StoreKind::Strong);
        let key = JsValue::Object(object_create(None));
        store
            .insert(key.clone(), JsValue::String("a".to_string()))
            .unwrap();
        assert_eq!(store.lookup(&key), Some(JsValue::String("a".to_string())));

        store
            .insert(key.clone(), JsValue::String("b".to_string()))
            .unwrap();
        assert_eq!(store.lookup(&key), Some(JsValue::String("b".to_string())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_strong_remove_is_idempotent() {
        let mut store = StoreObjectBase::new(StoreKind::Strong);
        let key = JsValue::Object(object_create(None));
        store.insert(key.clone(), JsValue::Boolean(true)).unwrap();
        assert!(store.remove(&key));
        assert!(!store.remove(&key));
        assert_eq!(store.lookup(&key), None);
    }

    #[test]
    fn test_nan_can_key_a_strong_store() {
        let mut store = StoreObjectBase::new(StoreKind::Strong);
        let nan = JsValue::Number(JsNumberType::NaN);
        store.insert(nan.clone(), JsValue::Boolean(true)).unwrap();
        assert_eq!(store.lookup(&nan), Some(JsValue::Boolean(true)));
    }

    #[test]
    fn test_weak_store_rejects_primitive_keys() {
        let mut store = StoreObjectBase::new(StoreKind::Weak);
        let result = store.insert(
            JsValue::String("k".to_string()),
            JsValue::Boolean(true),
        );
        assert!(result.unwrap_err().is_type_error());
    }

    #[test]
    fn test_weak_entry_dies_with_its_key() {
        let mut store = StoreObjectBase::new(StoreKind::Weak);
        let key = JsValue::Object(object_create(None));
        store.insert(key.clone(), JsValue::Boolean(true)).unwrap();
        assert!(store.contains(&key));
        assert_eq!(store.len(), 1);

        drop(key);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }
}
