//! Integration tests for the default invocation strategy
//!
//! The default strategy routes field access through conventionally named
//! public accessor methods, while direct descriptor access uses the
//! bound field handles — two independent paths that these tests exercise
//! against each other.

use std::any::Any;
use std::sync::Arc;

use mirra_engine::{MetaCache, MetaError, Reflector, SourceRegistry};
use mirra_sdk::{
    Describe, FieldDecl, HandleError, MethodDecl, Modifiers, ObjRef, Signature, TypeDecl, TypeKey,
    Value, Visibility,
};

struct User {
    age: i64,
    secret: String,
}

impl Describe for User {
    fn describe() -> TypeDecl {
        TypeDecl::new(TypeKey::of::<User>())
            .with_field(
                FieldDecl::new("age", TypeKey::of::<i64>())
                    .with_getter(|obj: &dyn Any| {
                        let user = obj
                            .downcast_ref::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        Ok(Value::Int(user.age))
                    })
                    .with_setter(|obj: &mut dyn Any, value: Value| {
                        let user = obj
                            .downcast_mut::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        user.age = value.as_int().ok_or_else(|| HandleError::argument(0, "i64"))?;
                        Ok(())
                    }),
            )
            .with_field(
                FieldDecl::new("secret", TypeKey::of::<String>())
                    .with_modifiers(Modifiers::new().with_visibility(Visibility::Private))
                    .with_getter(|obj: &dyn Any| {
                        let user = obj
                            .downcast_ref::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        Ok(Value::str(user.secret.clone()))
                    })
                    .with_setter(|obj: &mut dyn Any, value: Value| {
                        let user = obj
                            .downcast_mut::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        user.secret = value
                            .as_str()
                            .ok_or_else(|| HandleError::argument(0, "String"))?
                            .to_string();
                        Ok(())
                    }),
            )
            .with_method(
                MethodDecl::new("getAge", Signature::empty()).with_handler(
                    |obj: &mut dyn Any, _args: &[Value]| {
                        let user = obj
                            .downcast_ref::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        Ok(Value::Int(user.age))
                    },
                ),
            )
            .with_method(
                MethodDecl::new("setAge", Signature::new(vec![TypeKey::of::<i64>()]))
                    .with_handler(|obj: &mut dyn Any, args: &[Value]| {
                        let user = obj
                            .downcast_mut::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        user.age = args
                            .first()
                            .and_then(Value::as_int)
                            .ok_or_else(|| HandleError::argument(0, "i64"))?;
                        Ok(Value::Null)
                    }),
            )
            .with_method(
                MethodDecl::new("getSecret", Signature::empty())
                    .with_modifiers(Modifiers::new().with_visibility(Visibility::Private))
                    .with_handler(|obj: &mut dyn Any, _args: &[Value]| {
                        let user = obj
                            .downcast_ref::<User>()
                            .ok_or_else(|| HandleError::receiver("User"))?;
                        Ok(Value::str(user.secret.clone()))
                    }),
            )
            .with_method(
                MethodDecl::new("setSecret", Signature::new(vec![TypeKey::of::<String>()]))
                    .with_modifiers(Modifiers::new().with_visibility(Visibility::Private))
                    .with_handler(|_obj: &mut dyn Any, _args: &[Value]| Ok(Value::Null)),
            )
            .with_method(
                MethodDecl::new("rank", Signature::new(vec![TypeKey::of::<i64>()]))
                    .with_handler(|_obj: &mut dyn Any, _args: &[Value]| Ok(Value::str("int"))),
            )
            .with_method(
                MethodDecl::new("rank", Signature::new(vec![TypeKey::of::<String>()]))
                    .with_handler(|_obj: &mut dyn Any, _args: &[Value]| Ok(Value::str("string"))),
            )
            .with_method(
                MethodDecl::new("explode", Signature::empty()).with_handler(
                    |_obj: &mut dyn Any, _args: &[Value]| Err(HandleError::raised("boom")),
                ),
            )
    }
}

fn reflector() -> Reflector {
    let registry = Arc::new(SourceRegistry::new());
    registry.register::<User>();
    Reflector::new(Arc::new(MetaCache::new(registry)))
}

fn sample_user() -> ObjRef {
    ObjRef::new(User {
        age: 41,
        secret: "hunter2".to_string(),
    })
}

#[test]
fn test_get_field_matches_direct_getter_call() {
    let reflector = reflector();
    let user = sample_user();

    let via_strategy = reflector.get_field(&user, "age").unwrap();
    let via_method = reflector
        .invoke(&user, "getAge", &Signature::empty(), &[])
        .unwrap();
    assert_eq!(via_strategy, Value::Int(41));
    assert_eq!(via_strategy, via_method);
}

#[test]
fn test_set_field_matches_direct_setter_call() {
    let reflector = reflector();
    let user = sample_user();

    reflector.set_field(&user, "age", Value::Int(30)).unwrap();
    assert_eq!(reflector.get_field(&user, "age").unwrap(), Value::Int(30));

    reflector
        .invoke_auto(&user, "setAge", &[Value::Int(65)])
        .unwrap();
    assert_eq!(reflector.get_field(&user, "age").unwrap(), Value::Int(65));
}

#[test]
fn test_non_public_accessor_is_denied_but_direct_field_access_works() {
    let reflector = reflector();
    let user = sample_user();
    let key = TypeKey::of::<User>();

    // The strategy refuses the private accessor pair.
    assert!(matches!(
        reflector.get_field(&user, "secret"),
        Err(MetaError::AccessDenied { .. })
    ));
    assert!(matches!(
        reflector.set_field(&user, "secret", Value::str("swordfish")),
        Err(MetaError::AccessDenied { .. })
    ));

    // The field descriptor's own handles are independent of that policy.
    let field = reflector.cache().get_field(&key, "secret").unwrap();
    assert!(field.is_private());

    let read = user.with(|any| field.get(any)).unwrap();
    assert_eq!(read, Value::str("hunter2"));

    user.with_mut(|any| field.set(any, Value::str("swordfish")))
        .unwrap();
    let read = user.with(|any| field.get(any)).unwrap();
    assert_eq!(read, Value::str("swordfish"));
}

#[test]
fn test_overload_resolution_is_exact() {
    let reflector = reflector();
    let user = sample_user();

    let int_overload = reflector
        .invoke(
            &user,
            "rank",
            &Signature::new(vec![TypeKey::of::<i64>()]),
            &[Value::Int(1)],
        )
        .unwrap();
    assert_eq!(int_overload, Value::str("int"));

    let string_overload = reflector
        .invoke(
            &user,
            "rank",
            &Signature::new(vec![TypeKey::of::<String>()]),
            &[Value::str("a")],
        )
        .unwrap();
    assert_eq!(string_overload, Value::str("string"));

    // A widened signature resolves nothing.
    assert!(matches!(
        reflector.invoke(
            &user,
            "rank",
            &Signature::new(vec![TypeKey::of::<i32>()]),
            &[Value::Int(1)],
        ),
        Err(MetaError::MemberNotFound { .. })
    ));
}

#[test]
fn test_argument_count_mismatch() {
    let reflector = reflector();
    let user = sample_user();

    assert!(matches!(
        reflector.invoke(&user, "getAge", &Signature::empty(), &[Value::Int(9)]),
        Err(MetaError::ArgumentMismatch { .. })
    ));
}

#[test]
fn test_fault_from_invoked_code_carries_cause() {
    let reflector = reflector();
    let user = sample_user();

    match reflector
        .invoke(&user, "explode", &Signature::empty(), &[])
        .unwrap_err()
    {
        MetaError::Invocation { cause, .. } => {
            assert_eq!(cause, HandleError::raised("boom"));
        }
        other => panic!("expected invocation failure, got {other:?}"),
    }
}

#[test]
fn test_missing_accessor_is_member_not_found() {
    let reflector = reflector();
    let user = sample_user();

    // No getNickname()/setNickname(..) declared.
    assert!(matches!(
        reflector.get_field(&user, "nickname"),
        Err(MetaError::MemberNotFound { .. })
    ));
    assert!(matches!(
        reflector.set_field(&user, "nickname", Value::str("ace")),
        Err(MetaError::MemberNotFound { .. })
    ));
}
