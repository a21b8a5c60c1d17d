//! Ordinary and environment reference behavior.
//!
//! References over ordinary named slots must be observably identical to
//! direct property access, and environment references must round-trip
//! through the binding collaborator, strict-mode edges included.

extern crate bindref;

use bindref::runtime::context::EvalContext;
use bindref::runtime::ds::function_object::native_function_create;
use bindref::runtime::ds::object::{object_create, JsObjectType};
use bindref::runtime::ds::object_property::{PropertyDescriptor, PropertyKey};
use bindref::runtime::ds::operations::object::{
    create_data_property, define_property_or_throw, get, has_own_property, set,
};
use bindref::runtime::ds::reference::Reference;
use bindref::runtime::ds::value::{JsNumberType, JsValue};
use bindref::runtime::resolve::engine::{delete_value, get_value, put_value};

fn int(i: i64) -> JsValue {
    JsValue::Number(JsNumberType::Integer(i))
}

fn object_with(props: &[(&str, JsValue)]) -> JsObjectType {
    let o = object_create(None);
    for (name, value) in props {
        assert!(create_data_property(
            &o,
            PropertyKey::str(name),
            value.clone()
        ));
    }
    o
}

#[test]
fn test_read_matches_direct_get() {
    let mut ctx = EvalContext::new();
    let o = object_with(&[("x", int(1))]);
    let base = JsValue::Object(o.clone());

    let r = Reference::property(base, PropertyKey::str("x"), false);
    assert_eq!(
        get_value(&mut ctx, &r).unwrap(),
        get(&mut ctx, &o, &PropertyKey::str("x")).unwrap()
    );
}

#[test]
fn test_read_of_missing_slot_is_undefined() {
    let mut ctx = EvalContext::new();
    let base = JsValue::Object(object_create(None));
    let r = Reference::property(base, PropertyKey::str("missing"), false);
    assert_eq!(get_value(&mut ctx, &r).unwrap(), JsValue::Undefined);
}

#[test]
fn test_read_follows_prototype_chain() {
    let mut ctx = EvalContext::new();
    let parent = object_with(&[("inherited", int(2))]);
    let child = object_create(Some(parent));

    let r = Reference::property(
        JsValue::Object(child),
        PropertyKey::str("inherited"),
        false,
    );
    assert_eq!(get_value(&mut ctx, &r).unwrap(), int(2));
}

#[test]
fn test_accessor_read_runs_getter_with_base_as_receiver() {
    fn return_this(
        _ctx: &mut EvalContext,
        this: JsValue,
        _args: Vec<JsValue>,
    ) -> Result<JsValue, bindref::runtime::ds::error::JsError> {
        Ok(this)
    }

    let mut ctx = EvalContext::new();
    let o = object_create(None);
    define_property_or_throw(
        &o,
        PropertyKey::str("me"),
        PropertyDescriptor::Accessor {
            get: Some(native_function_create("return_this", return_this)),
            set: None,
            enumerable: true,
            configurable: true,
        },
    )
    .unwrap();

    let base = JsValue::Object(o);
    let r = Reference::property(base.clone(), PropertyKey::str("me"), false);
    assert_eq!(get_value(&mut ctx, &r).unwrap(), base);
}

#[test]
fn test_write_creates_then_overwrites() {
    let mut ctx = EvalContext::new();
    let o = object_create(None);
    let base = JsValue::Object(o.clone());

    let r = Reference::property(base.clone(), PropertyKey::str("n"), false);
    put_value(&mut ctx, &r, int(1)).unwrap();
    assert_eq!(get(&mut ctx, &o, &PropertyKey::str("n")).unwrap(), int(1));

    let r = Reference::property(base, PropertyKey::str("n"), false);
    put_value(&mut ctx, &r, int(2)).unwrap();
    assert_eq!(get(&mut ctx, &o, &PropertyKey::str("n")).unwrap(), int(2));
}

#[test]
fn test_write_matches_direct_set() {
    let mut ctx = EvalContext::new();
    let via_ref = object_create(None);
    let via_set = object_create(None);

    let r = Reference::property(
        JsValue::Object(via_ref.clone()),
        PropertyKey::str("k"),
        false,
    );
    put_value(&mut ctx, &r, int(7)).unwrap();
    set(&mut ctx, &via_set, PropertyKey::str("k"), int(7), false).unwrap();

    assert_eq!(
        get(&mut ctx, &via_ref, &PropertyKey::str("k")).unwrap(),
        get(&mut ctx, &via_set, &PropertyKey::str("k")).unwrap()
    );
}

#[test]
fn test_failed_write_is_silent_unless_strict() {
    let mut ctx = EvalContext::new();
    let o = object_create(None);
    define_property_or_throw(
        &o,
        PropertyKey::str("frozen"),
        PropertyDescriptor::Data {
            value: int(1),
            writable: false,
            enumerable: true,
            configurable: false,
        },
    )
    .unwrap();
    let base = JsValue::Object(o.clone());

    let sloppy = Reference::property(base.clone(), PropertyKey::str("frozen"), false);
    put_value(&mut ctx, &sloppy, int(9)).unwrap();
    assert_eq!(get(&mut ctx, &o, &PropertyKey::str("frozen")).unwrap(), int(1));

    let strict = Reference::property(base, PropertyKey::str("frozen"), true);
    let err = put_value(&mut ctx, &strict, int(9)).unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_write_lands_on_receiver_not_prototype() {
    let mut ctx = EvalContext::new();
    let parent = object_with(&[("shared", int(1))]);
    let child = object_create(Some(parent.clone()));

    let r = Reference::property(
        JsValue::Object(child.clone()),
        PropertyKey::str("shared"),
        false,
    );
    put_value(&mut ctx, &r, int(5)).unwrap();

    assert!(has_own_property(&child, &PropertyKey::str("shared")));
    assert_eq!(get(&mut ctx, &child, &PropertyKey::str("shared")).unwrap(), int(5));
    assert_eq!(get(&mut ctx, &parent, &PropertyKey::str("shared")).unwrap(), int(1));
}

#[test]
fn test_delete_reports_outcome() {
    let mut ctx = EvalContext::new();
    let o = object_with(&[("gone", int(1))]);
    let base = JsValue::Object(o.clone());

    let r = Reference::property(base.clone(), PropertyKey::str("gone"), false);
    assert_eq!(delete_value(&mut ctx, &r).unwrap(), true);
    assert!(!has_own_property(&o, &PropertyKey::str("gone")));

    // Deleting a slot that is not there succeeds trivially.
    let r = Reference::property(base, PropertyKey::str("gone"), false);
    assert_eq!(delete_value(&mut ctx, &r).unwrap(), true);
}

#[test]
fn test_delete_of_pinned_slot_fails_quietly_or_faults() {
    let mut ctx = EvalContext::new();
    let o = object_create(None);
    define_property_or_throw(
        &o,
        PropertyKey::str("pinned"),
        PropertyDescriptor::Data {
            value: int(1),
            writable: true,
            enumerable: true,
            configurable: false,
        },
    )
    .unwrap();
    let base = JsValue::Object(o);

    let sloppy = Reference::property(base.clone(), PropertyKey::str("pinned"), false);
    assert_eq!(delete_value(&mut ctx, &sloppy).unwrap(), false);

    let strict = Reference::property(base, PropertyKey::str("pinned"), true);
    assert!(delete_value(&mut ctx, &strict).unwrap_err().is_type_error());
}

#[test]
fn test_primitive_bases_are_boxed_not_rejected() {
    let mut ctx = EvalContext::new();

    let on_string = Reference::property(
        JsValue::String("abc".to_string()),
        PropertyKey::str("anything"),
        false,
    );
    assert_eq!(get_value(&mut ctx, &on_string).unwrap(), JsValue::Undefined);

    let on_number = Reference::property(int(5), PropertyKey::str("anything"), false);
    assert_eq!(get_value(&mut ctx, &on_number).unwrap(), JsValue::Undefined);
}

#[test]
fn test_delete_of_super_reference_faults() {
    let mut ctx = EvalContext::new();
    let home = object_with(&[("m", int(1))]);
    let this = JsValue::Object(object_create(None));

    let r = Reference::super_property(
        JsValue::Object(home),
        PropertyKey::str("m"),
        this,
        false,
    );
    assert!(delete_value(&mut ctx, &r).unwrap_err().is_reference_error());
}

#[test]
fn test_environment_reference_round_trip() {
    let mut ctx = EvalContext::new();
    ctx.create_global_binding("counter", int(1)).unwrap();

    let r = ctx.resolve_binding("counter");
    assert_eq!(get_value(&mut ctx, &r).unwrap(), int(1));

    let r = ctx.resolve_binding("counter");
    put_value(&mut ctx, &r, int(2)).unwrap();
    assert_eq!(ctx.get_binding("counter").unwrap(), int(2));

    let r = ctx.resolve_binding("counter");
    assert_eq!(delete_value(&mut ctx, &r).unwrap(), true);
    assert!(!ctx.has_binding("counter"));
}

#[test]
fn test_unresolvable_read_faults() {
    let mut ctx = EvalContext::new();
    let r = ctx.resolve_binding("nowhere");
    assert!(r.is_unresolvable());
    assert!(get_value(&mut ctx, &r).unwrap_err().is_reference_error());
}

#[test]
fn test_unresolvable_write_creates_global_binding_when_sloppy() {
    let mut ctx = EvalContext::new();
    let r = ctx.resolve_binding("fresh");
    put_value(&mut ctx, &r, int(42)).unwrap();

    assert!(ctx.has_binding("fresh"));
    assert_eq!(ctx.get_binding("fresh").unwrap(), int(42));
}

#[test]
fn test_unresolvable_write_faults_when_strict() {
    let mut ctx = EvalContext::new();
    ctx.strict = true;
    let r = ctx.resolve_binding("fresh");
    assert!(r.is_strict());
    assert!(put_value(&mut ctx, &r, int(42))
        .unwrap_err()
        .is_reference_error());
    assert!(!ctx.has_binding("fresh"));
}

#[test]
fn test_unresolvable_delete_reports_true() {
    let mut ctx = EvalContext::new();
    let r = ctx.resolve_binding("nowhere");
    assert_eq!(delete_value(&mut ctx, &r).unwrap(), true);
}

#[test]
fn test_lexical_binding_shadows_global_property_and_resists_delete() {
    let mut ctx = EvalContext::new();
    ctx.declare_lexical_binding("version", int(1)).unwrap();
    create_data_property(ctx.global_object(), PropertyKey::str("version"), int(2));

    let r = ctx.resolve_binding("version");
    assert_eq!(get_value(&mut ctx, &r).unwrap(), int(1));

    let r = ctx.resolve_binding("version");
    assert_eq!(delete_value(&mut ctx, &r).unwrap(), false);
    assert!(ctx.has_binding("version"));
}
