// src/utils.rs

use crate::constants::COMMON_ERROR_FOOTER;

/// Builds the user-facing error surface from a generic message.
pub fn build_error_message(message: &str) -> String {
    format!("{}\n{}", message, COMMON_ERROR_FOOTER)
}
