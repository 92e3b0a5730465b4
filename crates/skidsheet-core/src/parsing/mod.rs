pub mod normalize;
pub mod values;

use crate::error::ReportError;
use crate::model::{Cell, RawRow};
use serde::Deserialize;
use serde_json::Value;

/// Decode a JSON value into raw rows.
///
/// Accepts either a plain array of row objects, or the upstream query
/// API's response envelope (`{"status": "OK", "data": {...}}`).
pub fn rows_from_value(value: &Value) -> Result<Vec<RawRow>, ReportError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| row_from_value(i, item))
            .collect(),
        Value::Object(map) if map.contains_key("status") => rows_from_response(value),
        Value::Null => Err(ReportError::MalformedDataset(
            "dataset is null".into(),
        )),
        other => Err(ReportError::MalformedDataset(format!(
            "expected an array of rows, found {}",
            json_kind(other)
        ))),
    }
}

/// Decode a JSON document (text) into raw rows.
pub fn rows_from_json(json: &str) -> Result<Vec<RawRow>, ReportError> {
    let value: Value = serde_json::from_str(json)?;
    rows_from_value(&value)
}

fn row_from_value(index: usize, item: &Value) -> Result<RawRow, ReportError> {
    if !item.is_object() {
        return Err(ReportError::MalformedDataset(format!(
            "row {index} is {}, not an object",
            json_kind(item)
        )));
    }
    RawRow::deserialize(item)
        .map_err(|e| ReportError::MalformedDataset(format!("row {index}: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<QueryData>,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    columns: Vec<QueryColumn>,
    #[serde(default)]
    rows: Vec<QueryRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryColumn {
    column_name: String,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    values: Vec<Option<QueryValue>>,
}

#[derive(Debug, Deserialize)]
struct QueryValue {
    #[serde(default)]
    value: Option<Cell>,
}

/// Decode the upstream query API's response envelope.
///
/// Column descriptors are zipped positionally with each row's values;
/// values missing at the end of a row become null. A non-OK status turns
/// into [`ReportError::Upstream`] carrying the API's message.
pub fn rows_from_response(value: &Value) -> Result<Vec<RawRow>, ReportError> {
    let response = QueryResponse::deserialize(value)
        .map_err(|e| ReportError::MalformedDataset(format!("invalid query response: {e}")))?;

    if response.status != "OK" {
        let message = response
            .error_message
            .or(response.message)
            .unwrap_or_else(|| "Unknown error".into());
        return Err(ReportError::Upstream(message));
    }

    let data = response.data.ok_or_else(|| {
        ReportError::MalformedDataset("query response has no data section".into())
    })?;

    let rows = data
        .rows
        .into_iter()
        .map(|row| {
            let mut values = row.values.into_iter();
            data.columns
                .iter()
                .map(|column| {
                    let cell = values
                        .next()
                        .flatten()
                        .and_then(|v| v.value)
                        .unwrap_or(Cell::Null);
                    (column.column_name.clone(), cell)
                })
                .collect()
        })
        .collect();

    Ok(rows)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_row_array() {
        let rows = rows_from_value(&json!([
            { "PART": "KW1", "QTY1": "3" },
            { "part": "KW2", "qty1": 4 }
        ]))
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("qty1"), Some(&Cell::from(4)));
    }

    #[test]
    fn test_rows_from_json_text() {
        let rows = rows_from_json(r#"[{ "PART": "KW1", "SKIDS": null }]"#).unwrap();
        assert_eq!(rows[0].get("SKIDS"), Some(&Cell::Null));

        let err = rows_from_json("[{ \"PART\": ").unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn test_empty_array_is_not_an_error() {
        assert!(rows_from_value(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_null_dataset_is_malformed() {
        let err = rows_from_value(&Value::Null).unwrap_err();
        assert!(matches!(err, ReportError::MalformedDataset(_)));
    }

    #[test]
    fn test_non_object_row_is_malformed() {
        let err = rows_from_value(&json!([{ "PART": "A" }, 5])).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_nested_cell_is_malformed() {
        let err = rows_from_value(&json!([{ "PART": { "id": 1 } }])).unwrap_err();
        assert!(matches!(err, ReportError::MalformedDataset(_)));
    }

    #[test]
    fn test_scalar_dataset_is_malformed() {
        assert!(rows_from_value(&json!("rows")).is_err());
    }

    #[test]
    fn test_response_envelope() {
        let rows = rows_from_value(&json!({
            "status": "OK",
            "data": {
                "columns": [{ "columnName": "PART" }, { "columnName": "SKIDS" }, { "columnName": "QTY1" }],
                "rows": [
                    { "values": [{ "value": "KWS001" }, { "value": "1" }, { "value": 10 }] },
                    { "values": [{ "value": "PALLET" }, {}] }
                ]
            }
        }))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("PART"), Some(&Cell::from("KWS001")));
        assert_eq!(rows[0].get("QTY1"), Some(&Cell::from(10)));
        assert_eq!(rows[1].get("SKIDS"), Some(&Cell::Null));
        assert_eq!(rows[1].get("QTY1"), Some(&Cell::Null));
    }

    #[test]
    fn test_response_error_status() {
        let err = rows_from_value(&json!({
            "status": "ERROR",
            "errorMessage": "API Key is required"
        }))
        .unwrap_err();
        match err {
            ReportError::Upstream(msg) => assert_eq!(msg, "API Key is required"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_response_error_without_message() {
        let err = rows_from_value(&json!({ "status": "ERROR" })).unwrap_err();
        assert_eq!(err.to_string(), "upstream query failed: Unknown error");
    }

    #[test]
    fn test_response_without_data_is_malformed() {
        let err = rows_from_value(&json!({ "status": "OK" })).unwrap_err();
        assert!(matches!(err, ReportError::MalformedDataset(_)));
    }
}
