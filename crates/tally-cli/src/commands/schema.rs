use anyhow::bail;
use schemars::schema_for;
use tally_core::entities::AuditLogEntry;
use tally_core::responses::{AuditPage, AuditStatistics, IntegrityReport};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `tally schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_json(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_json(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name {
        "entry" => schema_for!(AuditLogEntry),
        "page" => schema_for!(AuditPage),
        "statistics" => schema_for!(AuditStatistics),
        "integrity" => schema_for!(IntegrityReport),
        other => bail!("unknown schema type '{other}' (expected entry, page, statistics, integrity)"),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::schema_json;

    #[test]
    fn entry_schema_lists_camel_case_fields() {
        let schema = schema_json("entry").unwrap();
        let rendered = schema.to_string();
        assert!(rendered.contains("freezeChecksum"));
        assert!(rendered.contains("isReviewable"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = schema_json("order").unwrap_err();
        assert!(err.to_string().contains("unknown schema type 'order'"));
    }
}
