//! Validate untrusted ObjectId input.

use anyhow::Result;
use clap::Args;
use objectid::ObjectId;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{format_json, print_verdict, OutputFormat};

use super::CommandContext;

/// Check whether inputs are valid ObjectIds.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strings to check (24 hex characters or 12-byte legacy strings).
    #[arg(required = true)]
    inputs: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Verdict<'a> {
    input: &'a str,
    valid: bool,
}

fn check(inputs: &[String]) -> Vec<Verdict<'_>> {
    inputs
        .iter()
        .map(|input| Verdict {
            input: input.as_str(),
            valid: ObjectId::is_valid_str(input),
        })
        .collect()
}

impl ValidateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let verdicts = check(&self.inputs);

        match ctx.format {
            OutputFormat::Text => {
                for v in &verdicts {
                    print_verdict(v.input, v.valid);
                }
            }
            OutputFormat::Json => println!("{}", format_json(&verdicts, "[]")),
        }

        let invalid = verdicts.iter().filter(|v| !v.valid).count();
        if invalid > 0 {
            return Err(CliError::InvalidInputs {
                invalid,
                total: verdicts.len(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_mixed_inputs() {
        let inputs = vec![
            "507f1f77bcf86cd799439011".to_string(),
            "507f1f77bcf86cd79943901".to_string(),
            "zzzzzzzzzzzzzzzzzzzzzzzz".to_string(),
            "abcdefghijkl".to_string(),
        ];
        let valid: Vec<bool> = check(&inputs).iter().map(|v| v.valid).collect();
        assert_eq!(valid, vec![true, false, false, true]);
    }

    #[test]
    fn test_verdict_json() {
        let inputs = vec!["507f1f77bcf86cd799439011".to_string()];
        let json = serde_json::to_value(check(&inputs)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "input": "507f1f77bcf86cd799439011", "valid": true }])
        );
    }
}
