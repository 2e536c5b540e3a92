//! The JSON bridge.
//!
//! Every collection has a JSON-compatible form: an index-sequence is an
//! array of values, a key-value map an object in insertion order, and the
//! identity-object map and lazy sequence an array of `{"key": …,
//! "value": …}` records in iteration order. Object references encode as
//! their payload; decoding an identity form allocates fresh identities
//! around the decoded payloads. A lazy sequence has no decoded form,
//! since a production routine cannot be read back out of data.

use json::object::Object;
use json::JsonValue;

use sheaf_value::Scalar;

use crate::collection::variant::{FixedCapacityArray, IdentityObjectMap, IndexSequence, KeyValueMap};
use crate::collection::{Collection, CollectionCore};
use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::value::Value;

impl Collection {
    /// The JSON-compatible form of the collection.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Collection::Sequence(inner) => {
                JsonValue::Array(inner.values().iter().map(value_to_json).collect())
            }
            Collection::Fixed(inner) => {
                JsonValue::Array(inner.slots().iter().map(value_to_json).collect())
            }
            Collection::Map(inner) => {
                let mut object = Object::new();
                for (key, value) in inner.entries() {
                    object.insert(&key.to_string(), value_to_json(value));
                }
                JsonValue::Object(object)
            }
            Collection::ObjectMap(_) | Collection::Lazy(_) => JsonValue::Array(
                self.pairs()
                    .iter()
                    .map(|(key, value)| {
                        let mut record = Object::new();
                        record.insert("key", value_to_json(key));
                        record.insert("value", value_to_json(value));
                        JsonValue::Object(record)
                    })
                    .collect(),
            ),
        }
    }

    /// The JSON text of [`Collection::to_json`].
    pub fn encode(&self) -> String {
        self.to_json().dump()
    }

    /// Decode a payload by its shape: an array becomes an index-sequence,
    /// an object a key-value map. Anything else at the top level is not an
    /// ordered collection and is rejected.
    pub fn decode(text: &str) -> Result<Collection> {
        match parse(text)? {
            JsonValue::Array(items) => Ok(Collection::from_values(
                items.iter().map(json_to_value).collect(),
            )),
            JsonValue::Object(object) => Ok(Collection::Map(map_from_object(&object))),
            _ => Err(Error::MalformedInput(
                "top-level payload is not an ordered collection".to_string(),
            )),
        }
    }
}

impl IndexSequence {
    /// Decode the record layout of an index-sequence: an array of values.
    pub fn decode(text: &str) -> Result<IndexSequence> {
        match parse(text)? {
            JsonValue::Array(items) => {
                Ok(IndexSequence::new(items.iter().map(json_to_value).collect()))
            }
            _ => Err(Error::MalformedInput(
                "index-sequence payload must be an array".to_string(),
            )),
        }
    }
}

impl FixedCapacityArray {
    /// Decode the record layout of a fixed-capacity array: an array of
    /// slot values, nulls standing for empty slots. The decoded size is
    /// the array length.
    pub fn decode(text: &str) -> Result<FixedCapacityArray> {
        match parse(text)? {
            JsonValue::Array(items) => Ok(FixedCapacityArray::from_values(
                items.iter().map(json_to_value).collect(),
            )),
            _ => Err(Error::MalformedInput(
                "fixed-capacity payload must be an array".to_string(),
            )),
        }
    }
}

impl KeyValueMap {
    /// Decode the flat key→value layout of a map: a single object.
    pub fn decode(text: &str) -> Result<KeyValueMap> {
        match parse(text)? {
            JsonValue::Object(object) => Ok(map_from_object(&object)),
            _ => Err(Error::MalformedInput(
                "key-value payload must be an object".to_string(),
            )),
        }
    }
}

impl IdentityObjectMap {
    /// Decode the record layout of an identity map: an array of
    /// `{"key": …, "value": …}` records. Every decoded key gets a fresh
    /// identity.
    pub fn decode(text: &str) -> Result<IdentityObjectMap> {
        let records = match parse(text)? {
            JsonValue::Array(records) => records,
            _ => {
                return Err(Error::MalformedInput(
                    "identity-map payload must be an array of records".to_string(),
                ))
            }
        };

        let mut entries = Vec::with_capacity(records.len());
        for record in &records {
            let (key, value) = record_entry(record)?;
            entries.push((ObjectRef::new(key), value));
        }
        Ok(IdentityObjectMap::new(entries))
    }
}

fn parse(text: &str) -> Result<JsonValue> {
    json::parse(text).map_err(|e| Error::MalformedInput(e.to_string()))
}

fn record_entry(record: &JsonValue) -> Result<(Value, Value)> {
    let object = match record {
        JsonValue::Object(object) => object,
        _ => {
            return Err(Error::MalformedInput(
                "identity-map record must be an object".to_string(),
            ))
        }
    };
    if object.len() != 2 {
        return Err(Error::MalformedInput(
            "identity-map record must hold exactly a key and a value".to_string(),
        ));
    }
    match (object.get("key"), object.get("value")) {
        (Some(key), Some(value)) => Ok((json_to_value(key), json_to_value(value))),
        _ => Err(Error::MalformedInput(
            "identity-map record is missing its key or value".to_string(),
        )),
    }
}

fn map_from_object(object: &Object) -> KeyValueMap {
    object
        .iter()
        .map(|(key, value)| (Scalar::from(key), json_to_value(value)))
        .collect()
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Scalar(scalar) => scalar_to_json(scalar),
        Value::Collection(collection) => collection.to_json(),
        // identity lives only in memory; the payload is what persists
        Value::Object(object) => value_to_json(object.payload()),
    }
}

fn scalar_to_json(scalar: &Scalar) -> JsonValue {
    match scalar {
        Scalar::Null => JsonValue::Null,
        Scalar::Boolean(b) => JsonValue::from(*b),
        Scalar::Integer(i) => JsonValue::from(*i),
        Scalar::Float(f) => JsonValue::from(f.into_inner()),
        Scalar::String(s) => JsonValue::from(s.as_ref()),
    }
}

fn json_to_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::null(),
        JsonValue::Boolean(b) => Value::from(*b),
        JsonValue::Number(n) => {
            let f: f64 = (*n).into();
            // integral numbers read back as integers
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Value::from(f as i64)
            } else {
                Value::from(f)
            }
        }
        JsonValue::Short(s) => Value::from(s.as_str()),
        JsonValue::String(s) => Value::from(s.as_str()),
        JsonValue::Array(items) => Value::Collection(Collection::from_values(
            items.iter().map(json_to_value).collect(),
        )),
        JsonValue::Object(object) => Value::Collection(Collection::Map(map_from_object(object))),
    }
}
