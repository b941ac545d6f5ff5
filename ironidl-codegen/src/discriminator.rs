//! Discriminator derivation.
//!
//! Anchor programs prefix serialized accounts and instruction data with
//! an 8-byte tag derived from the declaration name. Shank IDLs declare
//! their discriminants explicitly and never use these.

use crate::case::to_snake_case;
use sha2::{Digest, Sha256};

/// Byte length of a derived discriminator.
pub const DISCRIMINATOR_LENGTH: usize = 8;

/// Derives the discriminator for an account declaration.
#[must_use]
pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    sighash("account", name)
}

/// Derives the discriminator for an instruction.
///
/// The instruction name is snake_cased first, matching the on-chain
/// method namespace.
#[must_use]
pub fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    sighash("global", &to_snake_case(name))
}

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(format!("{namespace}:{name}").as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; DISCRIMINATOR_LENGTH];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LENGTH]);
    out
}

/// Formats a discriminator as a generated-code array literal.
#[must_use]
pub fn discriminator_literal(bytes: &[u8; DISCRIMINATOR_LENGTH]) -> String {
    let rendered: Vec<String> = bytes.iter().map(u8::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_discriminator_known_vector() {
        // sha256("global:initialize")[..8]
        assert_eq!(
            instruction_discriminator("initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
    }

    #[test]
    fn test_instruction_discriminator_snake_cases() {
        assert_eq!(
            instruction_discriminator("processInit"),
            instruction_discriminator("process_init")
        );
    }

    #[test]
    fn test_discriminators_are_deterministic_and_distinct() {
        assert_eq!(account_discriminator("Fanout"), account_discriminator("Fanout"));
        assert_ne!(account_discriminator("Fanout"), account_discriminator("Creator"));
        assert_ne!(
            account_discriminator("Fanout")[..],
            instruction_discriminator("fanout")[..]
        );
    }

    #[test]
    fn test_discriminator_literal() {
        assert_eq!(
            discriminator_literal(&[1, 2, 3, 4, 5, 6, 7, 8]),
            "[1, 2, 3, 4, 5, 6, 7, 8]"
        );
    }
}
