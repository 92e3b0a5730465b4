use skidsheet_core::query;

use crate::config::Config;
use crate::error::CliError;
use crate::output;

pub fn run(
    config: &Config,
    declaration_id: Option<String>,
    template: Option<String>,
) -> Result<(), CliError> {
    let request = match declaration_id {
        Some(id) => {
            let template = template
                .as_deref()
                .or(config.sql_template.as_deref())
                .ok_or(CliError::MissingTemplate)?;
            query::build_report_query(template, &id)?
        }
        None => query::declaration_list_query(),
    };

    output::json::print(&request)
}
