use crate::error::ReportError;
use serde::{Deserialize, Serialize};

/// Placeholder in the report SQL template replaced by the declaration id.
pub const DECLARATION_PLACEHOLDER: &str = "{ID_FROM_TABLE}";

/// Query listing the declarations a report can be built for, newest first.
pub const DECLARATION_LIST_SQL: &str = "select vt.id, vt.visa, c.COMPANY_NAME, vt.trans_type, vt.state, vt.export_at from visa_transaction vt, COMPANY c where vt.user_id > 0 and vt.company_id = c.COMPANY_ID order by vt.export_at DESC;";

/// Body of a request to the query proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub sql_cmd: String,
    #[serde(default = "default_response_format")]
    pub response_format: String,
}

fn default_response_format() -> String {
    "JSON".to_string()
}

impl QueryRequest {
    pub fn new(sql_cmd: impl Into<String>) -> Self {
        QueryRequest {
            sql_cmd: sql_cmd.into(),
            response_format: default_response_format(),
        }
    }
}

/// Fill the report SQL template with a declaration id.
///
/// Only the first placeholder is replaced. The SQL is passed through as is.
pub fn build_report_query(template: &str, declaration_id: &str) -> Result<QueryRequest, ReportError> {
    if !template.contains(DECLARATION_PLACEHOLDER) {
        return Err(ReportError::InvalidQueryTemplate(format!(
            "template does not contain {DECLARATION_PLACEHOLDER}"
        )));
    }
    let sql = template.replacen(DECLARATION_PLACEHOLDER, declaration_id, 1);
    Ok(QueryRequest::new(sql))
}

pub fn declaration_list_query() -> QueryRequest {
    QueryRequest::new(DECLARATION_LIST_SQL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_replaced_once() {
        let request = build_report_query(
            "select * from rows where id = {ID_FROM_TABLE} -- {ID_FROM_TABLE}",
            "42",
        )
        .unwrap();
        assert_eq!(
            request.sql_cmd,
            "select * from rows where id = 42 -- {ID_FROM_TABLE}"
        );
        assert_eq!(request.response_format, "JSON");
    }

    #[test]
    fn test_template_without_placeholder() {
        assert!(matches!(
            build_report_query("select 1", "42"),
            Err(ReportError::InvalidQueryTemplate(_))
        ));
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(QueryRequest::new("select 1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sqlCmd": "select 1", "responseFormat": "JSON" })
        );
    }

    #[test]
    fn test_response_format_defaults_on_read() {
        let request: QueryRequest = serde_json::from_str(r#"{"sqlCmd": "select 1"}"#).unwrap();
        assert_eq!(request.response_format, "JSON");
    }

    #[test]
    fn test_declaration_list_query() {
        assert!(declaration_list_query().sql_cmd.contains("visa_transaction"));
    }
}
