//! Helpers for turning `validator` errors into client-facing messages.

use validator::ValidationErrors;

/// Flatten [`ValidationErrors`] into a sorted list of human-readable messages.
///
/// Each entry is either the explicit `message` declared on the validation
/// attribute, or `"{field}: {code}"` when no message was provided. The list
/// is sorted so the output is stable regardless of field iteration order.
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field}: {}", err.code),
            })
        })
        .collect();
    messages.sort();
    messages
}
