//! Collection responses that may arrive bare or paginated
//!
//! The task manager API has returned both `[...]` and
//! `{data: [...], total, page, limit, totalPages}` for the same endpoint.
//! [`Listing`] names both shapes explicitly so consumers never sniff JSON,
//! and [`Listing::from_value`] reports anything else as
//! [`TaskDashError::MalformedShape`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::{Result, TaskDashError};

/// Paginated envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub total_pages: u64,
}

/// Either a bare list or a paginated envelope of `T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Items(Vec<T>),
    Paged(Page<T>),
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Items(items)
    }
}

impl<T> From<Page<T>> for Listing<T> {
    fn from(page: Page<T>) -> Self {
        Self::Paged(page)
    }
}

impl<T> Listing<T> {
    /// Records carried by the response, whichever shape it had
    pub fn items(&self) -> &[T] {
        match self {
            Self::Items(items) => items,
            Self::Paged(page) => &page.data,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Items(items) => items,
            Self::Paged(page) => page.data,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Size of the whole collection: the envelope `total` when paginated
    /// (never less than the records in hand), otherwise the item count.
    pub fn total(&self) -> u64 {
        match self {
            Self::Items(items) => items.len() as u64,
            Self::Paged(page) => page.total.max(page.data.len() as u64),
        }
    }

    pub const fn is_paginated(&self) -> bool {
        matches!(self, Self::Paged(_))
    }
}

impl<T: DeserializeOwned> Listing<T> {
    /// Normalizes a raw JSON payload.
    ///
    /// - `null` → empty bare list
    /// - array → bare list
    /// - object whose `data` is an array → envelope (`total`, `page`, `limit`,
    ///   `totalPages` default to 0 when absent or non-numeric)
    /// - anything else → [`TaskDashError::MalformedShape`]
    ///
    /// `null` elements are skipped. An element that fails to decode as `T` is
    /// logged and dropped; the rest of the listing survives. Envelope
    /// counters are kept as sent, so `total` still describes the collection.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Array(elements) => Ok(Self::Items(decode_elements(elements))),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(elements)) => {
                    let data = decode_elements(elements);
                    let number = |key: &str| map.get(key).and_then(Value::as_u64).unwrap_or(0);
                    Ok(Self::Paged(Page {
                        data,
                        total: number("total"),
                        page: number("page"),
                        limit: number("limit"),
                        total_pages: number("totalPages"),
                    }))
                }
                Some(other) => Err(TaskDashError::MalformedShape(format!(
                    "envelope `data` must be an array, found {}",
                    json_kind(other)
                ))),
                None => Err(TaskDashError::MalformedShape(
                    "expected an array or a `data` envelope, found object without `data`"
                        .to_string(),
                )),
            },
            other => Err(TaskDashError::MalformedShape(format!(
                "expected an array or an object with a `data` array, found {}",
                json_kind(other)
            ))),
        }
    }
}

fn decode_elements<T: DeserializeOwned>(elements: &[Value]) -> Vec<T> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, element)| !element.is_null())
        .filter_map(|(index, element)| match T::deserialize(element) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, kind = json_kind(element), error = %e, "Dropping undecodable record");
                None
            }
        })
        .collect()
}

/// Short JSON type name for error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_is_an_empty_bare_list() {
        let listing = Listing::<u32>::from_value(&Value::Null).unwrap();
        assert!(listing.is_empty());
        assert!(!listing.is_paginated());
    }

    #[test]
    fn bare_array_skips_null_elements() {
        let listing = Listing::<u32>::from_value(&json!([1, null, 3])).unwrap();
        assert_eq!(listing.items(), &[1, 3]);
        assert_eq!(listing.total(), 2);
    }

    #[test]
    fn envelope_keeps_pagination_fields() {
        let listing = Listing::<u32>::from_value(&json!({
            "data": [1, 2],
            "total": 40,
            "page": 1,
            "limit": 2,
            "totalPages": 20
        }))
        .unwrap();

        assert!(listing.is_paginated());
        assert_eq!(listing.total(), 40);
        match listing {
            Listing::Paged(page) => {
                assert_eq!(page.limit, 2);
                assert_eq!(page.total_pages, 20);
            }
            Listing::Items(_) => panic!("expected envelope"),
        }
    }

    #[test]
    fn envelope_total_never_undercounts() {
        let listing = Listing::<u32>::from_value(&json!({ "data": [1, 2, 3] })).unwrap();
        assert_eq!(listing.total(), 3);
    }

    #[test]
    fn rejects_shapes_outside_the_union() {
        for value in [json!({}), json!({ "data": 5 }), json!("projects"), json!(12), json!(true)] {
            let err = Listing::<u32>::from_value(&value).unwrap_err();
            assert!(matches!(err, TaskDashError::MalformedShape(_)), "{value} -> {err:?}");
        }
    }

    #[test]
    fn undecodable_elements_are_dropped() {
        let listing = Listing::<u32>::from_value(&json!([1, "two", 3])).unwrap();
        assert_eq!(listing.items(), &[1, 3]);

        let page = Listing::<u32>::from_value(&json!({ "data": [{}, 5], "total": 9 })).unwrap();
        assert_eq!(page.items(), &[5]);
        assert_eq!(page.total(), 9);
    }
}
