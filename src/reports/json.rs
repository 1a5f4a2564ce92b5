//! JSON report generator.

use super::{ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::model::Record;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo,
    title: &'a str,
    generated_at: String,
    record_count: usize,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a Record,
    status_label: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: JsonReportMetadata<'a>,
    records: Vec<JsonRecord<'a>>,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, rows: &[&Record], ctx: &ReportContext) -> Result<Vec<u8>, ReportError> {
        let report = JsonReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                title: &ctx.title,
                generated_at: ctx.generated_at.to_rfc3339(),
                record_count: rows.len(),
            },
            records: rows
                .iter()
                .map(|&record| JsonRecord {
                    record,
                    status_label: record.status_label(),
                })
                .collect(),
        };

        let out = if self.pretty {
            serde_json::to_vec_pretty(&report)
        } else {
            serde_json::to_vec(&report)
        };
        out.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let mut r = Record::new(5);
        r.status = Some("completed".into());
        r.owner = Some("Ana".into());
        let view = vec![&r];

        let bytes = JsonReporter::new()
            .pretty(false)
            .generate(&view, &ReportContext::default().with_title("Weekly"))
            .expect("json renders");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");

        assert_eq!(value["metadata"]["title"], "Weekly");
        assert_eq!(value["metadata"]["record_count"], 1);
        assert_eq!(value["metadata"]["tool"]["name"], "trackboard");
        assert_eq!(value["records"][0]["id"], 5);
        assert_eq!(value["records"][0]["status"], "completed");
        assert_eq!(value["records"][0]["status_label"], "DONE");
        assert_eq!(value["records"][0]["owner"], "Ana");
    }
}
