use sheaf_value::{Comparator, Scalar};

use crate::collection::Collection;
use crate::value::Value;

/// One column comparison: `row[key] <comparator> value`.
///
/// A row without the column (or with a non-scalar in it) reads as the null
/// scalar, so absence participates in comparison like any other value.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    key: Scalar,
    comparator: Comparator,
    value: Scalar,
}

impl Condition {
    pub fn new(
        key: impl Into<Scalar>,
        comparator: Comparator,
        value: impl Into<Scalar>,
    ) -> Self {
        Self {
            key: key.into(),
            comparator,
            value: value.into(),
        }
    }

    fn matches(&self, row: &Value) -> bool {
        let column = row
            .as_collection()
            .and_then(|c| c.get(&Value::Scalar(self.key.clone())).ok().flatten());
        let column = match column {
            Some(Value::Scalar(s)) => s,
            _ => Scalar::Null,
        };
        self.comparator.evaluate(&column, &self.value)
    }
}

/// A boolean matrix query: one leading AND-chain of conditions plus any
/// number of chained OR-groups, each itself a full AND-chain evaluated
/// independently.
///
/// `and` extends the chain under construction; `or` opens the next one.
/// An empty chain is a vacuous conjunction and matches every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    chains: Vec<Vec<Condition>>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    pub fn new() -> Self {
        Self {
            chains: vec![Vec::new()],
        }
    }

    /// Add a condition to the chain under construction.
    pub fn and(
        mut self,
        key: impl Into<Scalar>,
        comparator: Comparator,
        value: impl Into<Scalar>,
    ) -> Self {
        let condition = Condition::new(key, comparator, value);
        if let Some(chain) = self.chains.last_mut() {
            chain.push(condition);
        }
        self
    }

    /// Close the chain under construction and open an OR-group; the
    /// following `and` calls fill the new chain.
    pub fn or(mut self) -> Self {
        self.chains.push(Vec::new());
        self
    }

    /// Whether any AND-chain matches the row in full.
    pub fn matches(&self, row: &Value) -> bool {
        self.chains
            .iter()
            .any(|chain| chain.iter().all(|condition| condition.matches(row)))
    }
}

impl Collection {
    /// The rows matching any of the query's AND-chains, in source order.
    /// Map sources keep their row keys; the matching is a single pass, so
    /// a row matching several chains appears once.
    pub fn select(&self, query: &Query) -> Collection {
        self.filter(|row, _| query.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::collection::CollectionCore;

    fn row(entries: &[(&str, Value)]) -> Value {
        Value::Collection(Collection::from_entries(
            entries
                .iter()
                .map(|(k, v)| (Scalar::from(*k), v.clone()))
                .collect(),
        ))
    }

    fn people() -> Collection {
        Collection::from_values(vec![
            row(&[("name", Value::from("John")), ("age", Value::from(25)), ("city", Value::from("Oslo"))]),
            row(&[("name", Value::from("Jane")), ("age", Value::from(31)), ("city", Value::from("Bergen"))]),
            row(&[("name", Value::from("Rich")), ("age", Value::from(17)), ("city", Value::from("Oslo"))]),
            row(&[("name", Value::from("Ann")), ("age", Value::from(40)), ("city", Value::from("Bergen"))]),
        ])
    }

    fn names(c: &Collection) -> Vec<Value> {
        c.pairs()
            .into_iter()
            .map(|(_, r)| {
                r.as_collection()
                    .and_then(|c| c.get(&Value::from("name")).ok().flatten())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_and_chain_requires_every_condition() {
        let q = Query::new()
            .and("city", Comparator::Eq, "Oslo")
            .and("age", Comparator::Ge, 18);
        assert_eq!(names(&people().select(&q)), vec![Value::from("John")]);
    }

    #[test]
    fn test_or_groups_union_in_source_order() {
        let q = Query::new()
            .and("city", Comparator::Eq, "Oslo")
            .or()
            .and("age", Comparator::Gt, 35);
        assert_eq!(
            names(&people().select(&q)),
            vec![Value::from("John"), Value::from("Rich"), Value::from("Ann")]
        );
    }

    #[test]
    fn test_each_or_group_is_its_own_and_chain() {
        let q = Query::new()
            .and("city", Comparator::Eq, "Bergen")
            .and("age", Comparator::Lt, 35)
            .or()
            .and("city", Comparator::Eq, "Oslo")
            .and("age", Comparator::Lt, 20);
        assert_eq!(
            names(&people().select(&q)),
            vec![Value::from("Jane"), Value::from("Rich")]
        );
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let q = Query::new();
        assert_eq!(people().select(&q).count(), 4);
    }

    #[test]
    fn test_missing_column_reads_as_null() {
        let q = Query::new().and("height", Comparator::Eq, Scalar::Null);
        assert_eq!(people().select(&q).count(), 4);
        let q = Query::new().and("height", Comparator::Gt, 0);
        assert_eq!(people().select(&q).count(), 0);
    }

    #[test]
    fn test_strict_and_loose_comparators() {
        let matrix = Collection::from_values(vec![
            row(&[("n", Value::from(1))]),
            row(&[("n", Value::from(1.0))]),
        ]);
        let loose = Query::new().and("n", Comparator::Eq, 1);
        assert_eq!(matrix.select(&loose).count(), 2);
        let strict = Query::new().and("n", Comparator::StrictEq, 1);
        assert_eq!(matrix.select(&strict).count(), 1);
    }

    #[test]
    fn test_select_preserves_map_row_keys() {
        let matrix = Collection::from_entries(vec![
            (Scalar::from("john"), row(&[("age", Value::from(25))])),
            (Scalar::from("rich"), row(&[("age", Value::from(17))])),
        ]);
        let q = Query::new().and("age", Comparator::Ge, 18);
        let selected = matrix.select(&q);
        let keys: Vec<Value> = selected.pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Value::from("john")]);
    }
}
