//! Human-readable error descriptions and structured JSON error formatting.

use humpf_core::SpringError;

/// Stable name for the kind of failure, used in JSON output.
pub fn error_kind(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<SpringError>() {
        Some(SpringError::InvalidDampingRatio { .. }) => "InvalidDampingRatio",
        Some(SpringError::InvalidAngularFrequency { .. }) => "InvalidAngularFrequency",
        None => "Error",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(se) = err.downcast_ref::<SpringError>() {
        return match se {
            SpringError::InvalidDampingRatio { received } => format!(
                "What happened: A spring has a negative damping ratio ({received}).\nLikely causes: A damping_ratio value below 0 in [defaults], [initial] or a [[step]].\nHow to fix: Use damping_ratio >= 0 (1 is critical damping)."
            ),
            SpringError::InvalidAngularFrequency { received } => format!(
                "What happened: A spring has a negative angular frequency ({received}).\nLikely causes: An angular_frequency value below 0 in [defaults], [initial] or a [[step]].\nHow to fix: Use angular_frequency >= 0."
            ),
        };
    }

    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if lower.starts_with("read timeline config") {
        return format!(
            "What happened: The timeline file could not be read.\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the --config path. Original: {msg}"
        );
    }
    if lower.starts_with("parse timeline config") {
        return format!(
            "What happened: The timeline file is not valid TOML for this tool.\nLikely causes: A typo, an unknown key or preset, or a [[step]] without time.\nHow to fix: Compare the file with the documented layout. Original: {msg}"
        );
    }
    if lower.starts_with("invalid timeline config") {
        return format!(
            "What happened: The timeline file has out-of-range values.\nLikely causes: Negative frequencies or damping, zero precisions, or a zero time_scale.\nHow to fix: Edit the file and try again. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Spring errors get their own exit codes; everything else is 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<SpringError>() {
        Some(SpringError::InvalidDampingRatio { .. }) => 3,
        Some(SpringError::InvalidAngularFrequency { .. }) => 4,
        None => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let message = humanize(err);
    match err.downcast_ref::<SpringError>() {
        Some(se) => json!({
            "reason": error_kind(err),
            "details": { "received": se.received() },
            "message": message,
        }),
        None => json!({ "reason": error_kind(err), "message": message }),
    }
    .to_string()
}
