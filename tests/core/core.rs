use constant::{
    Builtin, Capability, ConstantError, ConstantType, CustomRep, Foreign, Function, SetoidLevel,
    StandardClasses, TYPE_IDENT, TypeClasses, TypeIdent, TypeRep, Value, type_ident,
};
use rayon::prelude::*;
use std::sync::Arc;

fn sqrt() -> Function {
    Function::new("sqrt", |x| {
        Value::from(x.as_number().unwrap_or(f64::NAN).sqrt())
    })
}

fn useless() -> Value {
    let rep = TypeRep::custom(CustomRep::named("Useless", "function Useless() {}"));
    Value::from(Foreign::new(rep, "Useless"))
}

#[test]
fn show_renders_rep_and_payload() {
    let c = ConstantType::standard(Builtin::Array).construct(vec!["foo", "bar", "baz"]);
    assert_eq!(c.show(), r#"Constant (Array) (["foo", "bar", "baz"])"#);
    assert_eq!(c.to_string(), c.show());
}

#[test]
fn show_nests_constant_representatives() {
    let number = ConstantType::standard(Builtin::Number);
    let constant_number = ConstantType::standard(number.clone());
    let outer = ConstantType::standard(constant_number.clone());

    let c = outer.construct(constant_number.construct(number.construct(-0.0)));
    assert_eq!(
        c.show(),
        "Constant (Constant (Constant (Number))) \
         (Constant (Constant (Number)) \
         (Constant (Number) \
         (-0)))"
    );
}

#[test]
fn show_falls_back_to_parsed_source_for_unnamed_reps() {
    let foo = TypeRep::custom(CustomRep::anonymous(
        "function Foo(value) { return {constructor: Foo}; }",
    ));
    let c = ConstantType::standard(foo.clone()).construct(Foreign::new(foo, r#"Foo ("foo")"#));
    assert_eq!(c.show(), r#"Constant (Foo) (Foo ("foo"))"#);

    let source = "value => ({constructor: Bar})";
    let bar = TypeRep::custom(CustomRep::anonymous(source));
    let c = ConstantType::standard(bar.clone()).construct(Foreign::new(bar, r#"Bar ("bar")"#));
    assert_eq!(c.show(), format!(r#"Constant ({}) (Bar ("bar"))"#, source));
}

#[test]
fn concat_combines_payloads() {
    let array = ConstantType::standard(Builtin::Array);
    let joined = array
        .construct(vec![1, 2, 3])
        .concat(&array.construct(vec![4, 5, 6]))
        .expect("arrays are semigroups");
    assert_eq!(joined.value(), &Value::from(vec![1, 2, 3, 4, 5, 6]));
    assert!(joined.constructor().ptr_eq(&array));
}

#[test]
fn ap_combines_with_operands_swapped() {
    let string = ConstantType::standard(Builtin::String);
    let x = string.construct("abc");
    let f = string.construct("def");
    let applied = x.ap(&f).expect("strings are semigroups");
    assert_eq!(applied.value(), &Value::from("defabc"));
    assert_eq!(
        applied.value(),
        f.concat(&x).expect("strings are semigroups").value()
    );
}

#[test]
fn of_wraps_the_empty_element() {
    let array = ConstantType::standard(Builtin::Array);
    let c = array.of(42).expect("Array is a monoid");
    assert_eq!(c.value(), &Value::Array(vec![]));
    assert_eq!(c.show(), "Constant (Array) ([])");

    let string = ConstantType::standard(Builtin::String);
    assert_eq!(
        string.of(42).expect("String is a monoid").show(),
        r#"Constant (String) ("")"#
    );

    assert!(ConstantType::standard(Builtin::Number).of(42).is_none());
    assert!(ConstantType::standard(number_constant()).of(42).is_none());
}

fn number_constant() -> ConstantType {
    ConstantType::standard(Builtin::Number)
}

#[test]
fn map_never_applies_its_function() {
    let c = number_constant().construct(64);
    let mut called = false;
    let mapped = c.map(|x| {
        called = true;
        x.clone()
    });
    assert!(!called);
    assert!(mapped.ptr_eq(&c));
    assert_eq!(mapped.value(), &Value::from(64));
    assert_eq!(c.map(|x| sqrt().call(x)).value(), &Value::from(64));
}

#[test]
fn bimap_rederives_the_representative() {
    let c = ConstantType::standard(Builtin::String).construct("abc");
    let mut second_called = false;
    let mapped = c.bimap(
        |s| Value::from(s.length().unwrap_or(0) as i64),
        |x| {
            second_called = true;
            sqrt().call(x)
        },
    );
    assert!(!second_called);
    assert_eq!(mapped.value(), &Value::from(3));
    assert_eq!(mapped.type_rep(), &TypeRep::Builtin(Builtin::Number));
    assert_eq!(mapped.show(), "Constant (Number) (3)");
    assert!(mapped.has(Capability::Ord));
    assert!(!mapped.has(Capability::Semigroup));
    assert!(!mapped.constructor().has_of());
}

#[test]
fn bimap_into_a_constant_nests_the_representative() {
    let inner = number_constant().construct(1);
    let c = ConstantType::standard(Builtin::String).construct("x");
    let mapped = c.bimap(|_| Value::from(inner.clone()), |x| x.clone());
    assert_eq!(mapped.show(), "Constant (Constant (Number)) (Constant (Number) (1))");
}

#[test]
fn reduce_returns_the_seed() {
    let c = number_constant().construct(42);
    let total = c.reduce(
        |acc: f64, x: &Value| acc + x.as_number().unwrap_or(0.0),
        100.0,
    );
    assert_eq!(total, 100.0);
    let words = c.reduce(
        |mut acc: Vec<String>, _| {
            acc.push("never".to_string());
            acc
        },
        Vec::new(),
    );
    assert!(words.is_empty());
}

#[test]
fn traverse_lifts_without_calling_the_function() {
    let c = number_constant().construct(64);
    let mut calls = 0;
    let lifted = c
        .traverse(&TypeRep::Builtin(Builtin::Array), |x| {
            calls += 1;
            sqrt().call(x)
        })
        .expect("Array is an applicative");
    assert_eq!(calls, 0);
    assert_eq!(constant::core::show::show(&lifted), "[Constant (Number) (64)]");

    let identity = c
        .traverse(&TypeRep::Builtin(Builtin::Identity), |x| x.clone())
        .expect("Identity is an applicative");
    assert_eq!(
        constant::core::show::show(&identity),
        "Identity (Constant (Number) (64))"
    );
}

#[test]
fn traverse_into_a_non_applicative_fails() {
    let c = number_constant().construct(64);
    let err = c
        .traverse(&TypeRep::Builtin(Builtin::Number), |x| x.clone())
        .expect_err("Number is not an applicative");
    assert!(matches!(
        err,
        ConstantError::NotSupported {
            class: "Applicative",
            ..
        }
    ));
}

#[test]
fn equals_is_structural() {
    let array = ConstantType::standard(Builtin::Array);
    let a = array.construct(vec![1, 2, 3]);
    assert_eq!(a.equals(&array.construct(vec![1, 2, 3])), Some(true));
    assert_eq!(a.equals(&array.construct(vec![3, 2, 1])), Some(false));
}

#[test]
fn lte_filters_like_an_ord() {
    let number = number_constant();
    let one = number.construct(1);
    let kept: Vec<Value> = [0, 1, 2]
        .into_iter()
        .map(|n| number.construct(n))
        .filter(|c| c.lte(&one) == Some(true))
        .map(|c| c.value().clone())
        .collect();
    assert_eq!(kept, vec![Value::from(0), Value::from(1)]);
}

#[test]
fn capabilities_follow_the_payload() {
    let useless = ConstantType::standard(Builtin::Object).construct(useless());
    assert_eq!(useless.probe().setoid, SetoidLevel::NotSetoid);
    assert!(useless.equals(&useless).is_none());
    assert!(useless.lte(&useless).is_none());
    assert!(useless.concat(&useless).is_none());
    assert!(useless.ap(&useless).is_none());
    assert_eq!(
        useless.capabilities(),
        vec![
            Capability::Functor,
            Capability::Bifunctor,
            Capability::Foldable,
            Capability::Traversable,
        ]
    );

    let regexp = ConstantType::standard(Builtin::RegExp).construct(Value::regexp("(?:)", ""));
    assert!(regexp.has(Capability::Setoid));
    assert!(!regexp.has(Capability::Ord));
    assert_eq!(regexp.equals(&regexp), Some(true));
    assert!(regexp.lte(&regexp).is_none());

    let number = number_constant().construct(0);
    assert!(number.has(Capability::Ord));
    assert!(!number.has(Capability::Semigroup));
    assert!(!number.has(Capability::Apply));
    assert!(!number.has(Capability::Applicative));

    let array = ConstantType::standard(Builtin::Array).construct(Vec::<Value>::new());
    assert!(array.has(Capability::Semigroup));
    assert!(array.has(Capability::Apply));
    assert!(array.has(Capability::Applicative));
}

#[test]
fn nested_constants_inherit_capabilities() {
    let array = ConstantType::standard(Builtin::Array);
    let outer = ConstantType::standard(array.clone());
    let c = outer.construct(array.construct(vec![1]));
    assert!(c.has(Capability::Ord));
    assert!(c.has(Capability::Semigroup));
    // Constant (Array) has no empty element of its own.
    assert!(!c.has(Capability::Applicative));

    let joined = c.concat(&outer.construct(array.construct(vec![2]))).expect("semigroup");
    assert_eq!(
        joined.show(),
        "Constant (Constant (Array)) (Constant (Array) ([1, 2]))"
    );
}

#[test]
fn type_identifier_is_shared_by_every_rep() {
    let a = number_constant().construct(0);
    let b = ConstantType::standard(Builtin::Array).construct(vec![1]);
    assert_eq!(a.type_ident(), TYPE_IDENT);
    assert_eq!(type_ident(&Value::from(b)), TYPE_IDENT);
    assert_eq!(
        TypeIdent::parse(a.type_ident()),
        Some(TypeIdent {
            namespace: Some("constant".to_string()),
            name: "Constant".to_string(),
            version: 1,
        })
    );
}

#[test]
fn custom_classes_are_injected() {
    // Treats every value as a Setoid comparing display strings.
    struct ShowEq;
    impl TypeClasses for ShowEq {
        fn is_setoid(&self, _: &Value) -> bool {
            true
        }
        fn is_ord(&self, _: &Value) -> bool {
            false
        }
        fn is_semigroup(&self, _: &Value) -> bool {
            false
        }
        fn equals(&self, a: &Value, b: &Value) -> bool {
            self.show(a) == self.show(b)
        }
        fn lte(&self, _: &Value, _: &Value) -> bool {
            false
        }
        fn concat(&self, a: &Value, _: &Value) -> Value {
            a.clone()
        }
        fn empty(&self, rep: &TypeRep) -> Result<Value, ConstantError> {
            Err(ConstantError::NotSupported {
                class: "Monoid",
                rep: rep.to_string(),
            })
        }
        fn of(&self, rep: &TypeRep, _: Value) -> Result<Value, ConstantError> {
            Err(ConstantError::NotSupported {
                class: "Applicative",
                rep: rep.to_string(),
            })
        }
    }

    let ct = ConstantType::new(Builtin::Function, Arc::new(ShowEq));
    let a = ct.construct(sqrt());
    let b = ct.construct(sqrt());
    assert_eq!(a.probe().setoid, SetoidLevel::Setoid);
    assert_eq!(a.equals(&b), Some(true));
    assert!(!ct.has_of());

    let standard = ConstantType::standard(Builtin::Function).construct(sqrt());
    assert!(standard.equals(&standard).is_none());
    assert!(!StandardClasses.is_setoid(standard.value()));
}

#[test]
fn instances_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<constant::Constant>();
    assert_send_sync::<ConstantType>();

    let array = ConstantType::standard(Builtin::Array);
    let shared = array.construct(vec!["a", "b"]);
    let shows: Vec<String> = (0..256)
        .into_par_iter()
        .map(|_| {
            let other = array.construct(vec!["a", "b"]);
            assert_eq!(shared.equals(&other), Some(true));
            shared.show()
        })
        .collect();
    assert!(shows.iter().all(|s| s == r#"Constant (Array) (["a", "b"])"#));
}
