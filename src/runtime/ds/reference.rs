use std::fmt;

use crate::runtime::ds::object::JsObjectType;
use crate::runtime::ds::object_property::PropertyKey;
use crate::runtime::ds::value::JsValue;

/// What a reference's base resolved to.
#[derive(Clone)]
pub enum ReferenceBase {
    /// A value the access is performed against (property-style access).
    Value(JsValue),
    /// A binding in the environment.
    Environment,
    /// A free identifier with no binding.
    Unresolvable,
}

/// The accessed name. The variant alone decides dispatch: a `Key` goes
/// through ordinary named-slot access, a `Resolver` object redirects the
/// whole access to its handlers.
#[derive(Clone)]
pub enum ReferencedName {
    Key(PropertyKey),
    Resolver(JsObjectType),
}

/// An unresolved description of one pending read/write/delete access.
///
/// Constructed fresh by each evaluation of a member-access expression,
/// classified once at construction, consumed by exactly one engine
/// operation, then discarded. Immutable: all fields are read-only after
/// construction.
#[derive(Clone)]
pub struct Reference {
    base: ReferenceBase,
    referenced_name: ReferencedName,
    this_value: Option<JsValue>,
    strict: bool,
}

impl fmt::Debug for ReferenceBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceBase::Value(v) => write!(f, "ReferenceBase::Value({:?})", v),
            ReferenceBase::Environment => write!(f, "ReferenceBase::Environment"),
            ReferenceBase::Unresolvable => write!(f, "ReferenceBase::Unresolvable"),
        }
    }
}

impl fmt::Debug for ReferencedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferencedName::Key(k) => write!(f, "ReferencedName::Key({:?})", k),
            ReferencedName::Resolver(_) => write!(f, "ReferencedName::Resolver(...)"),
        }
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("base", &self.base)
            .field("referenced_name", &self.referenced_name)
            .field("this_value", &self.this_value)
            .field("strict", &self.strict)
            .finish()
    }
}

impl Reference {
    /// An ordinary property reference: `base.name` / `base[key]`.
    pub fn property(base: JsValue, key: PropertyKey, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Value(base),
            referenced_name: ReferencedName::Key(key),
            this_value: None,
            strict,
        }
    }

    /// A super-style property reference: the lookup starts at `base` but
    /// code triggered by the access runs with `this_value` as receiver.
    pub fn super_property(
        base: JsValue,
        key: PropertyKey,
        this_value: JsValue,
        strict: bool,
    ) -> Self {
        Reference {
            base: ReferenceBase::Value(base),
            referenced_name: ReferencedName::Key(key),
            this_value: Some(this_value),
            strict,
        }
    }

    /// A virtual reference: the accessed name is a resolver object and the
    /// access will be redirected to its handlers.
    pub fn virtual_property(base: JsValue, resolver: JsObjectType, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Value(base),
            referenced_name: ReferencedName::Resolver(resolver),
            this_value: None,
            strict,
        }
    }

    /// A reference to an environment binding.
    pub fn environment(name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Environment,
            referenced_name: ReferencedName::Key(PropertyKey::str(name)),
            this_value: None,
            strict,
        }
    }

    /// A free identifier that resolved to no binding.
    pub fn unresolvable(name: &str, strict: bool) -> Self {
        Reference {
            base: ReferenceBase::Unresolvable,
            referenced_name: ReferencedName::Key(PropertyKey::str(name)),
            this_value: None,
            strict,
        }
    }

    pub fn base(&self) -> &ReferenceBase {
        &self.base
    }

    pub fn referenced_name(&self) -> &ReferencedName {
        &self.referenced_name
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.referenced_name, ReferencedName::Resolver(_))
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self.base, ReferenceBase::Unresolvable)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_property_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Value(_))
    }

    pub fn has_primitive_base(&self) -> bool {
        matches!(
            self.base,
            ReferenceBase::Value(JsValue::Boolean(_))
                | ReferenceBase::Value(JsValue::String(_))
                | ReferenceBase::Value(JsValue::Number(_))
                | ReferenceBase::Value(JsValue::Symbol(_))
        )
    }

    pub fn is_super_reference(&self) -> bool {
        self.this_value.is_some()
    }

    /// The receiver for code the access triggers: the super `this` if one
    /// was captured, otherwise the base itself.
    pub fn get_this_value(&self) -> JsValue {
        if let Some(this) = &self.this_value {
            this.clone()
        } else if let ReferenceBase::Value(base) = &self.base {
            base.clone()
        } else {
            JsValue::Undefined
        }
    }
}
