use std::cell::Cell;
use std::rc::Rc;

use sheaf_collection::{
    error, Collection, CollectionCore, IdentityObjectMap, KeyValueMap, LazySequence, ObjectRef,
    Scalar, Value,
};

#[test]
fn test_sequence_protocol() -> error::Result<()> {
    let mut c = Collection::from_values(vec![Value::from("a"), Value::from("b")]);

    let seq = c.as_sequence_mut().expect("sequence variant");
    seq.append(Value::from("c"));
    assert_eq!(seq.count(), 3);

    // keys are always exactly [0, count)
    let keys: Vec<Value> = c.pairs().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![Value::from(0), Value::from(1), Value::from(2)]);

    assert_eq!(c.require(&Value::from(2))?, Value::from("c"));
    assert!(c.require(&Value::from(3)).is_err());
    Ok(())
}

#[test]
fn test_map_protocol() -> error::Result<()> {
    let mut map = KeyValueMap::default();
    map.set(Scalar::from("firstname"), Value::from("John"));
    map.set(Scalar::from("lastname"), Value::from("Doe"));
    map.set(Scalar::from("age"), Value::from(25));
    map.set(Scalar::from(10), Value::from(2));

    assert_eq!(map.count(), 4);
    assert_eq!(
        Collection::Map(map.clone()).encode(),
        r#"{"firstname":"John","lastname":"Doe","age":25,"10":2}"#
    );

    // order preserved across mutation, last write wins
    map.set(Scalar::from("firstname"), Value::from("Joan"));
    map.remove(&Scalar::from("lastname"));
    let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["firstname", "age", "10"]);
    assert_eq!(map.require(&Scalar::from("firstname"))?, &Value::from("Joan"));
    Ok(())
}

#[test]
fn test_identity_map_protocol() -> error::Result<()> {
    let john = ObjectRef::new(Value::from("John"));
    let twin = ObjectRef::new(Value::from("John"));

    let mut map = IdentityObjectMap::default();
    map.set(john.clone(), Value::from(1));
    map.set(twin.clone(), Value::from(2));

    // structural equality does not merge identities
    assert_eq!(map.count(), 2);
    assert_eq!(map.require(&Value::Object(john))?, &Value::from(1));

    // a scalar key is a type violation
    assert_eq!(
        map.get(&Value::from("John")),
        Err(error::Error::InvalidKeyType { expected: "object" })
    );
    Ok(())
}

#[test]
fn test_fixed_array_protocol() -> error::Result<()> {
    let mut c = Collection::fixed(3);
    {
        let fixed = c.as_fixed_mut().expect("fixed variant");
        fixed.set(0, Value::from("x"))?;
        assert!(fixed.set(3, Value::from("y")).is_err());
    }
    assert_eq!(c.count(), 3);
    assert_eq!(c.get(&Value::from(1))?, Some(Value::null()));
    assert!(c.get(&Value::from(7)).is_err());
    Ok(())
}

#[test]
fn test_lazy_sequence_restartability() {
    let invocations = Rc::new(Cell::new(0));
    let seen = invocations.clone();
    let lazy = Collection::lazy(move || {
        seen.set(seen.get() + 1);
        Box::new((0..4).map(|i| (Value::from(i), Value::from(i * i))))
    });

    // count, materialize and a manual traversal each redrive production
    assert_eq!(lazy.count(), 4);
    assert_eq!(lazy.pairs().len(), 4);
    let mut traversal = lazy.as_lazy().unwrap().iterate();
    assert_eq!(traversal.next(), Some((Value::from(0), Value::from(0))));
    assert_eq!(invocations.get(), 3);
}

#[test]
fn test_lazy_sequence_is_never_cached() {
    let backing = Rc::new(Cell::new(3usize));
    let shared = backing.clone();
    let lazy = Collection::lazy(move || {
        let n = shared.get();
        Box::new((0..n).map(|i| (Value::from(i), Value::from(i))))
    });

    assert_eq!(lazy.count(), 3);
    backing.set(6);
    // count reflects live production at call time
    assert_eq!(lazy.count(), 6);
}

#[test]
fn test_functional_operations_do_not_mutate_their_source() {
    let source = Collection::from_values((0..6).map(Value::from).collect());
    let snapshot = source.clone();

    let _ = source.slice(1, Some(3));
    let _ = source.filter(|v, _| !v.is_null());
    let _ = source.chunk(2).pairs();
    let _ = source.split(3);
    let _ = source.values();

    assert_eq!(source, snapshot);
}

#[test]
fn test_collection_round_trips_through_json() -> error::Result<()> {
    let nested = Collection::from_entries(vec![
        (Scalar::from("name"), Value::from("John")),
        (
            Scalar::from("scores"),
            Value::Collection(Collection::from_values(vec![
                Value::from(1),
                Value::from(2.5),
            ])),
        ),
    ]);
    let text = nested.encode();
    let decoded = Collection::decode(&text)?;
    assert_eq!(decoded.encode(), text);

    // a lazy sequence encodes through the record layout
    let lazy = Collection::Lazy(LazySequence::from_values(vec![Value::from("a")]));
    assert_eq!(lazy.encode(), r#"[{"key":0,"value":"a"}]"#);
    Ok(())
}

#[test]
fn test_decode_rejects_non_collection_payloads() {
    assert!(Collection::decode("3.14").is_err());
    assert!(Collection::decode("true").is_err());
    assert!(KeyValueMap::decode(r#"["not","a","map"]"#).is_err());
}
