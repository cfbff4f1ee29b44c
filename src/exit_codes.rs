//! Exit codes for the `inscript` CLI.
//!
//! Grounded on the teacher's `src/exit_codes.rs`: small positive sequential
//! codes so shells/CI can test against the documented value (`std::process::exit`
//! truncates to the low 8 bits on Unix, so a negative constant would lie
//! about its own exit status), trimmed to the two cases this CLI
//! distinguishes rather than the teacher's three.

/// Success - input was read and converted.
pub const SUCCESS: i32 = 0;

/// The input (file path, URL, or annotation-rules file) could not be
/// opened or read.
pub const INPUT_ERROR: i32 = 1;

/// Helper functions for consistent exit behavior.
pub mod exit {
    use super::{INPUT_ERROR, SUCCESS};

    /// Exit with success code (0).
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with the input-error code (1).
    pub fn input_error() -> ! {
        std::process::exit(INPUT_ERROR);
    }
}
