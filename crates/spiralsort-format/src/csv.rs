//! CSV node tables.
//!
//! The first non-empty line is a header. The `node_id`, `x`, `y` and `z`
//! columns are located by name, so column order does not matter and
//! extra columns (such as a leading index column) are ignored.
//!
//! Fields may be double-quoted; a doubled quote inside a quoted field is
//! a literal quote. Line breaks inside quoted fields are not supported.
//!
//! Output is always `node_id,x,y,z` with coordinates in Rust's shortest
//! round-trip float formatting, so written values parse back exactly.

use std::fmt::Write;

use spiralsort::Node;

use crate::FormatError;

const COLUMNS: [&str; 4] = ["node_id", "x", "y", "z"];

/// Parse a CSV node table.
///
/// # Errors
///
/// Returns [`FormatError::MissingColumn`] if the header lacks a required
/// column, or [`FormatError::Csv`] for an empty input, a short row, an
/// unterminated quote or a coordinate that is not a number.
pub fn parse_csv(input: &str) -> Result<Vec<Node>, FormatError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, header) = lines.next().ok_or_else(|| FormatError::Csv {
        line: 1,
        message: "missing header row".to_string(),
    })?;
    let header = split_record(header).map_err(|message| FormatError::Csv {
        line: header_line,
        message,
    })?;

    let mut columns = [0usize; 4];
    for (slot, name) in columns.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|field| field.trim() == name)
            .ok_or(FormatError::MissingColumn(name))?;
    }
    let [id_col, x_col, y_col, z_col] = columns;

    let mut nodes = Vec::new();
    for (line, record) in lines {
        let fields = split_record(record).map_err(|message| FormatError::Csv { line, message })?;
        let field = |col: usize| {
            fields.get(col).ok_or_else(|| FormatError::Csv {
                line,
                message: format!("expected at least {} fields, found {}", col + 1, fields.len()),
            })
        };
        let coordinate = |col: usize| -> Result<f64, FormatError> {
            let raw = field(col)?;
            raw.trim().parse().map_err(|_| FormatError::Csv {
                line,
                message: format!("invalid {} coordinate: {raw:?}", header[col].trim()),
            })
        };

        nodes.push(Node::new(
            field(id_col)?.clone(),
            coordinate(x_col)?,
            coordinate(y_col)?,
            coordinate(z_col)?,
        ));
    }
    Ok(nodes)
}

/// Split one CSV record into fields, unquoting as needed.
fn split_record(record: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => in_quotes = false,
            ('"', false) if field.is_empty() => in_quotes = true,
            (',', false) => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

/// Quote `id` if it contains a delimiter or a quote.
fn escape_field(id: &str) -> String {
    if id.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", id.replace('"', "\"\""))
    } else {
        id.to_string()
    }
}

/// Serialize nodes into a CSV string with a `node_id,x,y,z` header.
#[must_use]
pub fn to_csv(nodes: &[Node]) -> String {
    let mut out = String::with_capacity(16 + nodes.len() * 48);
    out.push_str("node_id,x,y,z\n");
    for node in nodes {
        let p = node.position;
        // Writing to a String is infallible.
        let _ = writeln!(out, "{},{},{},{}", escape_field(&node.id), p.x, p.y, p.z);
    }
    out
}
