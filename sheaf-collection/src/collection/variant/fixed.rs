use crate::collection::traits::{BoxedPairIter, CollectionCore};
use crate::error::{Error, Result};
use crate::value::Value;

/// The fixed-capacity eager collection.
///
/// Integer keys `[0, size)` are fixed at construction and the storage is
/// never resized; an empty slot holds the null sentinel. Access outside
/// the bounds is an error, unlike the clamped slicing operations.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCapacityArray {
    slots: Vec<Value>,
}

impl FixedCapacityArray {
    /// A fresh array of `size` sentinel slots.
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![Value::null(); size],
        }
    }

    /// An array sized and filled by the given values.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { slots: values }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Value] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Value> {
        self.slots
    }

    pub fn get(&self, index: i64) -> Result<&Value> {
        self.check(index)?;
        Ok(&self.slots[index as usize])
    }

    pub fn set(&mut self, index: i64, value: Value) -> Result<()> {
        self.check(index)?;
        self.slots[index as usize] = value;
        Ok(())
    }

    /// Reset a slot to the sentinel, returning the previous value.
    pub fn reset(&mut self, index: i64) -> Result<Value> {
        self.check(index)?;
        Ok(std::mem::replace(
            &mut self.slots[index as usize],
            Value::null(),
        ))
    }

    pub fn contains_index(&self, index: i64) -> bool {
        index >= 0 && (index as usize) < self.slots.len()
    }

    fn check(&self, index: i64) -> Result<()> {
        if self.contains_index(index) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index,
                size: self.slots.len(),
            })
        }
    }
}

impl CollectionCore for FixedCapacityArray {
    fn count(&self) -> usize {
        self.slots.len()
    }

    fn iter(&self) -> BoxedPairIter<'_> {
        Box::new(
            self.slots
                .iter()
                .enumerate()
                .map(|(i, v)| (Value::from(i), v.clone())),
        )
    }
}
