//! Generation policy and input validation.
//!
//! The inference parameters are policy constants, not user-configurable:
//! every edit runs the same pinned model with the same strength settings.

use crate::error::CoreError;

/// Pinned inference model (instruct-pix2pix) including its version hash.
/// Changing this changes the visual behaviour of every generation, so it
/// is deliberately not an environment variable.
pub const MODEL_VERSION: &str =
    "timothybrooks/instruct-pix2pix:30c1d0b916a6f8efce20493f5d61ee27491ab2a60437c13c588468b9810ec23f";

/// Number of denoising steps per edit.
pub const NUM_INFERENCE_STEPS: u32 = 20;

/// How strongly the output must resemble the input image.
pub const IMAGE_GUIDANCE_SCALE: f64 = 1.5;

/// How strongly the output must follow the text prompt.
pub const GUIDANCE_SCALE: f64 = 7.5;

/// Content type written for every generated output object.
pub const OUTPUT_CONTENT_TYPE: &str = "image/png";

/// Validate a user-supplied edit prompt.
///
/// The prompt must contain at least one non-whitespace character.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::Validation("Image and prompt are required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_prompt_accepts_text() {
        assert!(validate_prompt("add a party hat").is_ok());
    }

    #[test]
    fn test_validate_prompt_rejects_empty() {
        assert!(validate_prompt("").is_err());
    }

    #[test]
    fn test_validate_prompt_rejects_whitespace_only() {
        assert!(validate_prompt("   \t\n").is_err());
    }
}
