//! Generate new ObjectIds.

use anyhow::Result;
use clap::{Args, ValueEnum};
use objectid::{Encoding, ObjectId};
use serde_json::Value;

use crate::output::{format_json, OutputFormat};

use super::CommandContext;

/// How each generated id is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IdEncoding {
    /// 24 lowercase hex characters.
    #[default]
    Hex,
    /// Base64 of the 12 bytes.
    Base64,
    /// Extended JSON: {"$oid": "<hex>"}.
    Extended,
}

/// Generate new ObjectIds.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Number of ids to generate.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Custom timestamp in Unix seconds.
    #[arg(long)]
    time: Option<u32>,

    /// Encoding for each id.
    #[arg(long, value_enum, default_value_t = IdEncoding::Hex)]
    encoding: IdEncoding,
}

impl NewCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let ids: Vec<ObjectId> = (0..self.count)
            .map(|_| match self.time {
                Some(time) => ObjectId::from_time(time),
                None => ObjectId::new(),
            })
            .collect();

        tracing::debug!(count = ids.len(), "generated ObjectIds");

        match ctx.format {
            OutputFormat::Text => {
                for id in &ids {
                    println!("{}", render_text(id, self.encoding));
                }
            }
            OutputFormat::Json => {
                let values: Vec<Value> = ids.iter().map(|id| render_json(id, self.encoding)).collect();
                println!("{}", format_json(&values, "[]"));
            }
        }

        Ok(())
    }
}

fn render_text(id: &ObjectId, encoding: IdEncoding) -> String {
    match encoding {
        IdEncoding::Hex => id.to_string_with(Encoding::Hex),
        IdEncoding::Base64 => id.to_string_with(Encoding::Base64),
        IdEncoding::Extended => serde_json::to_string(&id.to_extended_json())
            .unwrap_or_else(|_| id.to_hex_string()),
    }
}

fn render_json(id: &ObjectId, encoding: IdEncoding) -> Value {
    match encoding {
        IdEncoding::Extended => serde_json::json!({ "$oid": id.to_hex_string() }),
        other => Value::String(render_text(id, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "507f1f77bcf86cd799439011";

    fn sample() -> ObjectId {
        ObjectId::parse_str(HEX).unwrap()
    }

    #[test]
    fn test_render_text() {
        let id = sample();
        assert_eq!(render_text(&id, IdEncoding::Hex), HEX);
        assert_eq!(render_text(&id, IdEncoding::Base64), "UH8fd7z4bNeZQ5AR");
        assert_eq!(
            render_text(&id, IdEncoding::Extended),
            format!(r#"{{"$oid":"{HEX}"}}"#)
        );
    }

    #[test]
    fn test_render_json() {
        let id = sample();
        assert_eq!(render_json(&id, IdEncoding::Hex), Value::String(HEX.to_string()));
        assert_eq!(
            render_json(&id, IdEncoding::Extended),
            serde_json::json!({ "$oid": HEX })
        );
    }
}
