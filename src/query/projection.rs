// Projection
// Reduce matching records to a caller-chosen subset of fields

use super::filter::CountryFilter;
use crate::storage::table::CountryTable;
use crate::storage::{Country, Field, FieldValue};
use indexmap::IndexMap;
use serde::Serialize;

/// A reduced record: the requested fields, in the order they were requested
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Projection {
    values: IndexMap<Field, FieldValue>,
}

impl Projection {
    /// Project one record onto `fields`
    /// A field named twice appears once, at its first position.
    pub fn of(country: &Country, fields: &[Field]) -> Self {
        let values = fields
            .iter()
            .map(|&field| (field, country.field(field)))
            .collect();
        Self { values }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    /// Fields in projection order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    /// Values in projection order
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CountryTable {
    /// Apply `filter`, then keep only `fields` of each surviving record
    pub fn by_fields(&self, filter: &CountryFilter, fields: &[Field]) -> Vec<Projection> {
        self.by_multiple_filters(filter)
            .into_iter()
            .map(|country| Projection::of(country, fields))
            .collect()
    }
}
