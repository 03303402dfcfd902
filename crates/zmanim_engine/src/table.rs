//! Ordered rule tables.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::definition::{ComputeFn, ZmanDefinition};
use crate::error::EngineError;

const STANDARD_TABLE_JSON: &str = include_str!("../data/standard_table.json");

/// One row of a rule table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEntry {
    Definition(ZmanDefinition),
    /// A row that could not be read. It still occupies its slot and
    /// evaluates to an invalid result.
    Malformed { id: String, reason: String },
}

impl TableEntry {
    pub fn id(&self) -> &str {
        match self {
            Self::Definition(d) => &d.id,
            Self::Malformed { id, .. } => id,
        }
    }

    pub fn definition(&self) -> Option<&ZmanDefinition> {
        match self {
            Self::Definition(d) => Some(d),
            Self::Malformed { .. } => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl From<ZmanDefinition> for TableEntry {
    fn from(d: ZmanDefinition) -> Self {
        Self::Definition(d)
    }
}

/// Zman table rows in display order, ids unique.
#[derive(Debug, Clone, PartialEq)]
pub struct ZmanTable {
    entries: Vec<TableEntry>,
}

impl ZmanTable {
    /// Build from definitions, rejecting duplicate ids.
    pub fn new(definitions: Vec<ZmanDefinition>) -> Result<Self, EngineError> {
        Self::from_entries(definitions.into_iter().map(TableEntry::from).collect())
    }

    /// Build from entries, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<TableEntry>) -> Result<Self, EngineError> {
        let mut seen = BTreeSet::new();
        for e in &entries {
            if !seen.insert(e.id()) {
                return Err(EngineError::DuplicateId(e.id().to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of definitions.
    ///
    /// An unknown `compute.fn` or a repeated id fails the whole table. Any
    /// other defect in a row degrades that row to [`TableEntry::Malformed`];
    /// a row without a string `id` is named `#<index>`.
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let rows: Vec<Value> = serde_json::from_str(s)?;
        let mut entries = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let entry = parse_row(index, row)?;
            if let TableEntry::Malformed { id, reason } = &entry {
                warn!(index, %id, %reason, "malformed zman definition");
            }
            entries.push(entry);
        }
        debug!(count = entries.len(), "parsed zman table");
        Self::from_entries(entries)
    }

    /// The built-in table.
    pub fn standard() -> Result<Self, EngineError> {
        Self::from_json_str(STANDARD_TABLE_JSON)
    }

    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Well-formed definitions in table order.
    pub fn definitions(&self) -> impl Iterator<Item = &ZmanDefinition> {
        self.entries.iter().filter_map(TableEntry::definition)
    }

    pub fn get(&self, id: &str) -> Option<&ZmanDefinition> {
        self.definitions().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rows that failed to parse.
    pub fn malformed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_malformed()).count()
    }
}

impl<'a> IntoIterator for &'a ZmanTable {
    type Item = &'a TableEntry;
    type IntoIter = std::slice::Iter<'a, TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn parse_row(index: usize, row: Value) -> Result<TableEntry, EngineError> {
    let Some(id) = row.get("id").and_then(Value::as_str).map(str::to_string) else {
        return Ok(TableEntry::Malformed {
            id: format!("#{index}"),
            reason: "missing string `id`".into(),
        });
    };
    let Some(function) = row
        .get("compute")
        .and_then(|c| c.get("fn"))
        .and_then(Value::as_str)
    else {
        return Ok(TableEntry::Malformed {
            id,
            reason: "missing string `compute.fn`".into(),
        });
    };
    if !ComputeFn::is_known(function) {
        return Err(EngineError::UnknownComputeFunction {
            id,
            function: function.to_string(),
        });
    }
    Ok(match serde_json::from_value::<ZmanDefinition>(row) {
        Ok(d) => TableEntry::Definition(d),
        Err(e) => TableEntry::Malformed {
            id,
            reason: e.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_loads() {
        let t = ZmanTable::standard().unwrap();
        assert_eq!(t.len(), 25);
        assert_eq!(t.malformed_count(), 0);
        assert_eq!(t.entries()[0].id(), "alotHashachar");
        assert!(t.get("tzetMelakha").is_some());
        for d in t.definitions() {
            assert!(d.labels.contains_key("en"), "{}", d.id);
            assert!(d.labels.contains_key("he"), "{}", d.id);
        }
    }

    #[test]
    fn unknown_function_named() {
        let r = ZmanTable::from_json_str(
            r#"[{ "id": "x", "compute": { "fn": "moonrise" }, "labels": {} }]"#,
        );
        match r {
            Err(EngineError::UnknownComputeFunction { id, function }) => {
                assert_eq!(id, "x");
                assert_eq!(function, "moonrise");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_id() {
        let r = ZmanTable::from_json_str(
            r#"[{ "id": "x", "compute": { "fn": "sunrise" }, "labels": {} },
                { "id": "x", "compute": { "fn": "sunset" }, "labels": {} }]"#,
        );
        assert!(matches!(r, Err(EngineError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn missing_fields_degrade_the_row() {
        let t = ZmanTable::from_json_str(
            r#"[{ "compute": { "fn": "sunrise" }, "labels": {} },
                { "id": "a", "labels": {} },
                { "id": 7, "compute": { "fn": "sunset" }, "labels": {} },
                { "id": "b", "compute": { "fn": "sunset" }, "labels": {} }]"#,
        )
        .unwrap();
        let ids: Vec<_> = t.iter().map(TableEntry::id).collect();
        assert_eq!(ids, ["#0", "a", "#2", "b"]);
        assert_eq!(t.malformed_count(), 3);
        assert!(t.get("b").is_some());
        assert!(t.get("a").is_none());
    }

    #[test]
    fn bad_field_degrades_only_its_row() {
        let mut rows: Vec<Value> = serde_json::from_str(STANDARD_TABLE_JSON).unwrap();
        rows[3]["rounding"] = Value::from("sideways");
        let t = ZmanTable::from_json_str(&Value::Array(rows).to_string()).unwrap();
        assert_eq!(t.len(), 25);
        assert_eq!(t.definitions().count(), 24);
        match &t.entries()[3] {
            TableEntry::Malformed { id, reason } => {
                assert_eq!(id, "sunrise");
                assert!(reason.contains("sideways"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn top_level_must_be_an_array() {
        assert!(matches!(
            ZmanTable::from_json_str(r#"{ "id": "a" }"#),
            Err(EngineError::Json(_))
        ));
    }
}
