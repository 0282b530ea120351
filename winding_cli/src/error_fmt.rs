//! Human-readable error descriptions and structured JSON error formatting.

use serde_json::json;
use winding_core::error::{ErrorKind, WindingError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(we) = err.downcast_ref::<WindingError>() {
        return match we {
            WindingError::InvalidConfiguration(msg) => format!(
                "What happened: Invalid machine configuration ({msg}).\nLikely causes: Slot, pole or phase count out of range, an odd pole count, more than twice as many poles as slots, a short pitch on a pole pitch below 2 slots, or an unknown phase/layer filter.\nHow to fix: Use Z >= 6, an even 2p >= 2 with 2p <= 2Z, and m >= 3, then rerun."
            ),
        };
    }

    // String-based heuristics for errors coming from config or CSV input
    let msg = err
        .chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ");
    let lower = msg.to_ascii_lowercase();

    if lower.contains("read config file") || lower.contains("open batch csv") {
        return format!(
            "What happened: Could not read an input file ({msg}).\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the --config / --csv path and rerun."
        );
    }

    if lower.contains("parse config file") || lower.contains("invalid config") {
        return format!(
            "What happened: Configuration file is invalid ({msg}).\nLikely causes: Missing [machine] section, a misspelled key, or out-of-range values.\nHow to fix: Edit the TOML config and try again."
        );
    }

    if lower.contains("batch csv must have headers") {
        return "Invalid headers in batch CSV. Expected 'slots,poles,phases,pitch,offset'."
            .to_string();
    }

    if lower.contains("invalid csv row") || lower.contains("batch csv contains no rows") {
        return format!(
            "What happened: Batch CSV could not be read ({msg}).\nLikely causes: Non-numeric values or an unknown pitch (expected full or short).\nHow to fix: Fix the offending row and rerun."
        );
    }

    // Generic fallback
    format!(
        "Something went wrong.\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Invalid machine configurations exit with 2; everything else with 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match winding_core::error::kind_of(err) {
        Some(ErrorKind::InvalidConfiguration) => 2,
        None => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    if let Some(we) = err.downcast_ref::<WindingError>() {
        return json!({
            "reason": we.kind().as_str(),
            "kind": we.kind().as_str(),
            "message": we.message(),
        })
        .to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "kind": null, "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid() -> eyre::Report {
        eyre::Report::new(WindingError::InvalidConfiguration(
            "number of poles must be even (got 3)".into(),
        ))
    }

    #[test]
    fn invalid_configuration_maps_to_exit_2() {
        assert_eq!(exit_code_for_error(&invalid()), 2);
        assert_eq!(exit_code_for_error(&eyre::eyre!("boom")), 1);
    }

    #[test]
    fn humanize_explains_typed_errors() {
        let text = humanize(&invalid());
        assert!(text.starts_with("What happened: Invalid machine configuration"));
        assert!(text.contains("must be even"));
    }

    #[test]
    fn json_error_carries_kind() {
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&invalid())).unwrap();
        assert_eq!(v["kind"], "InvalidConfiguration");
        assert_eq!(v["message"], "number of poles must be even (got 3)");

        let v: serde_json::Value =
            serde_json::from_str(&format_error_json(&eyre::eyre!("boom"))).unwrap();
        assert_eq!(v["reason"], "Error");
        assert!(v["kind"].is_null());
    }
}
