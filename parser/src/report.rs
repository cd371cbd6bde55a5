//! Batch summaries for parsed message runs.

use std::collections::BTreeMap;

use penzi_sms_core::ParsedCommand;
use serde::{Deserialize, Serialize};

/// Summary of one batch parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// When the report was generated (RFC 3339).
    pub generated_at: String,
    /// Parser version that produced the report.
    pub version: String,
    pub total: usize,
    pub recognized: usize,
    pub unrecognized: usize,
    /// Commands per kind, keyed by the kind's wire tag. Kinds that did not
    /// occur in the batch are omitted.
    pub counts_by_kind: BTreeMap<String, usize>,
    pub commands: Vec<ParsedCommand>,
}

impl BatchReport {
    /// Builds a report over a batch of parsed commands.
    pub fn from_commands(commands: Vec<ParsedCommand>) -> Self {
        let mut counts_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        for command in &commands {
            *counts_by_kind.entry(command.kind.to_string()).or_insert(0) += 1;
        }
        let recognized = commands.iter().filter(|c| c.is_recognized()).count();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            total: commands.len(),
            recognized,
            unrecognized: commands.len() - recognized,
            counts_by_kind,
            commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_batch;
    use penzi_sms_core::InboundMessage;

    #[test]
    fn test_report_counts_recognized_and_unrecognized() {
        let commands = parse_batch(&[
            InboundMessage::new("0700000001", "HELP"),
            InboundMessage::new("0700000002", "ACCEPT 456"),
            InboundMessage::new("0700000003", "xyzzy"),
            InboundMessage::new("0700000004", "help"),
        ]);

        let report = BatchReport::from_commands(commands);

        assert_eq!(report.total, 4);
        assert_eq!(report.recognized, 3);
        assert_eq!(report.unrecognized, 1);
        assert_eq!(report.counts_by_kind.get("HELP"), Some(&2));
        assert_eq!(report.counts_by_kind.get("ACCEPT"), Some(&1));
        assert_eq!(report.counts_by_kind.get("UNKNOWN"), Some(&1));
        assert_eq!(report.counts_by_kind.get("STOP"), None);
        assert_eq!(report.commands.len(), 4);
    }

    #[test]
    fn test_empty_batch_report() {
        let report = BatchReport::from_commands(Vec::new());
        assert_eq!(report.total, 0);
        assert_eq!(report.recognized, 0);
        assert_eq!(report.unrecognized, 0);
        assert!(report.counts_by_kind.is_empty());
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_generated_at_is_rfc3339() {
        let report = BatchReport::from_commands(Vec::new());
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
    }
}
