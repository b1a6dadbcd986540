//! JSON node tables.
//!
//! Two layouts are accepted:
//!
//! - **records**: `[{"node_id": "a", "x": 0.0, "y": 0.0, "z": 0.0}, ...]`
//! - **columns**: `{"node_id": {"0": "a", ...}, "x": {"0": 0.0, ...}, ...}`,
//!   the layout data-frame libraries write by default. Rows are ordered
//!   by their numeric index key.
//!
//! Numeric node ids are accepted and converted to strings. Extra fields
//! are ignored. Output is always the records layout.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use spiralsort::Node;

use crate::FormatError;

/// A node id as it may appear in JSON input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeId {
    Text(String),
    Number(serde_json::Number),
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        match id {
            NodeId::Text(text) => text,
            NodeId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Record {
    node_id: NodeId,
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Deserialize)]
struct Columns {
    node_id: BTreeMap<String, NodeId>,
    x: BTreeMap<String, f64>,
    y: BTreeMap<String, f64>,
    z: BTreeMap<String, f64>,
}

impl Columns {
    fn into_nodes(self) -> Result<Vec<Node>, FormatError> {
        let Self {
            node_id,
            mut x,
            mut y,
            mut z,
        } = self;
        let mut rows: Vec<(String, NodeId)> = node_id.into_iter().collect();
        rows.sort_by_cached_key(|(row, _)| {
            (row.parse::<u64>().unwrap_or(u64::MAX), row.clone())
        });

        let mut nodes = Vec::with_capacity(rows.len());
        for (row, id) in rows {
            let px = take_value(&mut x, "x", &row)?;
            let py = take_value(&mut y, "y", &row)?;
            let pz = take_value(&mut z, "z", &row)?;
            nodes.push(Node::new(id, px, py, pz));
        }

        // Rows left over in a coordinate column have no id.
        if let Some(row) = [&x, &y, &z]
            .into_iter()
            .find_map(|column| column.keys().next())
        {
            return Err(FormatError::MissingValue {
                column: "node_id",
                row: row.clone(),
            });
        }
        Ok(nodes)
    }
}

fn take_value(
    column: &mut BTreeMap<String, f64>,
    name: &'static str,
    row: &str,
) -> Result<f64, FormatError> {
    column.remove(row).ok_or_else(|| FormatError::MissingValue {
        column: name,
        row: row.to_string(),
    })
}

/// Parse a JSON node table in either the records or the columns layout.
///
/// # Errors
///
/// Returns [`FormatError::Json`] for malformed JSON or a field of the
/// wrong type, [`FormatError::MissingColumn`] if a column is absent, and
/// [`FormatError::MissingValue`] if the columns layout has a row missing
/// from some column.
pub fn parse_json(input: &str) -> Result<Vec<Node>, FormatError> {
    let value: Value = serde_json::from_str(input)?;
    if let Value::Object(map) = &value
        && let Some(&missing) = ["node_id", "x", "y", "z"]
            .iter()
            .find(|column| !map.contains_key(**column))
    {
        return Err(FormatError::MissingColumn(missing));
    }

    match value {
        Value::Array(_) => {
            let records: Vec<Record> = serde_json::from_value(value)?;
            Ok(records
                .into_iter()
                .map(|r| Node::new(r.node_id, r.x, r.y, r.z))
                .collect())
        }
        Value::Object(_) => serde_json::from_value::<Columns>(value)?.into_nodes(),
        _ => Err(FormatError::Json(serde::de::Error::custom(
            "expected an array of records or an object of columns",
        ))),
    }
}

/// Serialize nodes as a pretty-printed JSON array of records.
///
/// # Errors
///
/// Returns [`FormatError::Json`] if serialization fails.
pub fn to_json(nodes: &[Node]) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(nodes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_records() {
        let input = r#"[
            {"node_id": "a", "x": 1, "y": 2.5, "z": -3, "extra": true},
            {"node_id": 7, "x": 0.0, "y": 0.0, "z": 0.0}
        ]"#;
        let nodes = parse_json(input).unwrap();
        assert_eq!(
            nodes,
            vec![Node::new("a", 1.0, 2.5, -3.0), Node::new("7", 0.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn parses_columns_in_numeric_row_order() {
        let input = r#"{
            "node_id": {"10": "c", "2": "b", "0": "a"},
            "x": {"0": 0.0, "2": 2.0, "10": 10.0},
            "y": {"0": 0.0, "2": 0.0, "10": 0.0},
            "z": {"0": 0.0, "2": 0.0, "10": 0.0},
            "weight": {"0": 1, "2": 1, "10": 1}
        }"#;
        let nodes = parse_json(input).unwrap();
        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(nodes[2], Node::new("c", 10.0, 0.0, 0.0));
    }

    #[test]
    fn columns_missing_column() {
        let input = r#"{"node_id": {"0": "a"}, "x": {"0": 0}, "y": {"0": 0}}"#;
        assert!(matches!(parse_json(input), Err(FormatError::MissingColumn("z"))));
    }

    #[test]
    fn columns_missing_row_value() {
        let input = r#"{
            "node_id": {"0": "a", "1": "b"},
            "x": {"0": 0, "1": 1},
            "y": {"0": 0},
            "z": {"0": 0, "1": 1}
        }"#;
        assert!(matches!(
            parse_json(input),
            Err(FormatError::MissingValue { column: "y", row }) if row == "1"
        ));
    }

    #[test]
    fn columns_extra_row_value() {
        let input = r#"{
            "node_id": {"0": "a"},
            "x": {"0": 0, "1": 1},
            "y": {"0": 0},
            "z": {"0": 0}
        }"#;
        assert!(matches!(
            parse_json(input),
            Err(FormatError::MissingValue { column: "node_id", .. })
        ));
    }

    #[test]
    fn records_missing_field_is_json_error() {
        let input = r#"[{"node_id": "a", "x": 0, "y": 0}]"#;
        assert!(matches!(parse_json(input), Err(FormatError::Json(_))));
    }

    #[test]
    fn scalar_input_is_rejected() {
        assert!(matches!(parse_json("42"), Err(FormatError::Json(_))));
        assert!(matches!(parse_json("not json"), Err(FormatError::Json(_))));
    }

    #[test]
    fn writes_records_that_parse_back() {
        let nodes = vec![Node::new("a", 0.1, -2.0, 1e-9), Node::new("b", 3.0, 4.0, 5.0)];
        let json = to_json(&nodes).unwrap();
        assert!(json.contains("\"node_id\": \"a\""));
        assert_eq!(parse_json(&json).unwrap(), nodes);
    }

    #[test]
    fn empty_array_is_empty_cloud() {
        assert!(parse_json("[]").unwrap().is_empty());
    }
}
