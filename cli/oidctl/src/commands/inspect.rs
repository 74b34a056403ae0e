//! Decode an ObjectId into its fields.

use anyhow::Result;
use clap::Args;
use objectid::{Encoding, ObjectId};
use serde::Serialize;

use crate::error::CliError;
use crate::output::{format_json, print_field, OutputFormat};

use super::CommandContext;

/// Decode an ObjectId into its fields.
#[derive(Debug, Args)]
pub struct InspectCommand {
    /// The ObjectId (24 hex characters, or base64 with --base64).
    id: String,

    /// Treat the input as base64.
    #[arg(long)]
    base64: bool,
}

/// Decoded fields of one ObjectId.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct IdReport {
    hex: String,
    base64: String,
    timestamp: String,
    timestamp_secs: u32,
    instance_tag: String,
    counter: u32,
    inspect: String,
}

impl IdReport {
    fn from_id(id: &ObjectId) -> Self {
        Self {
            hex: id.to_hex_string(),
            base64: id.to_string_with(Encoding::Base64),
            timestamp: id.timestamp().to_rfc3339(),
            timestamp_secs: id.timestamp_secs(),
            instance_tag: id.instance_tag().to_string(),
            counter: id.counter(),
            inspect: id.inspect(),
        }
    }
}

impl InspectCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let id = self.decode()?;
        let report = IdReport::from_id(&id);

        match ctx.format {
            OutputFormat::Text => {
                print_field("Hex", &report.hex);
                print_field("Base64", &report.base64);
                print_field("Timestamp", &report.timestamp);
                print_field("Unix seconds", report.timestamp_secs);
                print_field("Instance tag", &report.instance_tag);
                print_field("Counter", report.counter);
                print_field("Inspect", &report.inspect);
            }
            OutputFormat::Json => println!("{}", format_json(&report, "{}")),
        }

        Ok(())
    }

    fn decode(&self) -> Result<ObjectId, CliError> {
        let result = if self.base64 {
            ObjectId::from_base64(&self.id)
        } else {
            ObjectId::create_from_hex_string(&self.id)
        };
        result.map_err(|source| CliError::Decode {
            input: self.id.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fields() {
        let id = ObjectId::parse_str("6553f100a1b2c3d4e5010203").unwrap();
        let report = IdReport::from_id(&id);

        assert_eq!(report.hex, "6553f100a1b2c3d4e5010203");
        assert_eq!(report.timestamp_secs, 0x6553_f100);
        assert_eq!(report.timestamp, "2023-11-14T22:13:20+00:00");
        assert_eq!(report.instance_tag, "a1b2c3d4e5");
        assert_eq!(report.counter, 0x010203);
        assert_eq!(report.inspect, "ObjectId(\"6553f100a1b2c3d4e5010203\")");
    }

    #[test]
    fn test_decode_base64() {
        let cmd = InspectCommand {
            id: "UH8fd7z4bNeZQ5AR".to_string(),
            base64: true,
        };
        assert_eq!(cmd.decode().unwrap().to_hex_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_decode_rejects_legacy_string() {
        let cmd = InspectCommand {
            id: "abcdefghijkl".to_string(),
            base64: false,
        };
        assert!(matches!(cmd.decode(), Err(CliError::Decode { .. })));
    }
}
