//! # bindref - Virtual Reference Resolution Engine
//!
//! A runtime-internal protocol that decouples "read/write/remove a named
//! slot on a value" from the identity of the value itself. A left-to-right
//! chaining construct (`x :: r`) pairs a target value with a *resolver*
//! object; the resolver, not the target, supplies the behavior of the
//! access. This is how unrelated parties compose fluent call chains and
//! keep hidden per-instance state in associative stores without ever
//! touching the target's own surface API.
//!
//! ## Quick Start
//!
//! ### Hidden state through a store resolver
//!
//! ```
//! use bindref::runtime::context::EvalContext;
//! use bindref::runtime::ds::object::object_create;
//! use bindref::runtime::ds::store_object::{store_create, StoreKind};
//! use bindref::runtime::ds::value::JsValue;
//! use bindref::runtime::resolve::chain::construct_virtual_reference;
//! use bindref::runtime::resolve::engine::{delete_value, get_value, put_value};
//!
//! let mut ctx = EvalContext::new();
//! let target = JsValue::Object(object_create(None));
//! let secret = JsValue::Object(store_create(StoreKind::Strong));
//!
//! // target :: secret = "hidden"
//! let r = construct_virtual_reference(&target, &secret, false).unwrap();
//! put_value(&mut ctx, &r, JsValue::String("hidden".to_string())).unwrap();
//!
//! // target :: secret
//! let r = construct_virtual_reference(&target, &secret, false).unwrap();
//! assert_eq!(
//!     get_value(&mut ctx, &r).unwrap(),
//!     JsValue::String("hidden".to_string())
//! );
//!
//! // delete target :: secret
//! let r = construct_virtual_reference(&target, &secret, false).unwrap();
//! assert_eq!(delete_value(&mut ctx, &r).unwrap(), true);
//! ```
//!
//! ### Method extraction through a callable resolver
//!
//! ```
//! use bindref::runtime::context::EvalContext;
//! use bindref::runtime::ds::function_object::native_function_create;
//! use bindref::runtime::ds::object::object_create;
//! use bindref::runtime::ds::operations::object::call;
//! use bindref::runtime::ds::value::JsValue;
//! use bindref::runtime::resolve::chain::construct_virtual_reference;
//! use bindref::runtime::resolve::engine::get_value;
//!
//! let mut ctx = EvalContext::new();
//! let receiver = JsValue::Object(object_create(None));
//! fn identity_this(
//!     _ctx: &mut EvalContext,
//!     this: JsValue,
//!     _args: Vec<JsValue>,
//! ) -> Result<JsValue, bindref::runtime::ds::error::JsError> {
//!     Ok(this)
//! }
//! let f = JsValue::Object(native_function_create("self", identity_this));
//!
//! // bound = receiver :: f
//! let r = construct_virtual_reference(&receiver, &f, false).unwrap();
//! let bound = get_value(&mut ctx, &r).unwrap();
//!
//! // The receiver is fixed permanently; later callers cannot rebind it.
//! let got = call(&mut ctx, &bound, &JsValue::Undefined, Vec::new()).unwrap();
//! assert_eq!(got, receiver);
//! ```
//!
//! ## Architecture
//!
//! - **[`runtime::ds`]** - Data structures (values, objects, stores,
//!   environment records, references)
//! - **[`runtime::resolve`]** - The resolution engine, resolver registry,
//!   built-in resolver extensions, and the chaining front-end
//! - **[`runtime::context`]** - Evaluation context owning the registry and
//!   the global environment
//!
//! A `Reference` is constructed fresh for every access, classified exactly
//! once (ordinary key vs. resolver object), and consumed by exactly one of
//! `get_value`, `put_value` or `delete_value` in
//! [`runtime::resolve::engine`].

#[macro_use]
extern crate lazy_static;

pub mod runtime;
