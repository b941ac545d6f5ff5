//! Well-known account resolution.
//!
//! Instruction accounts whose address is fixed program-wide (system
//! program, sysvars, token programs) are resolved here so renderers can
//! default them instead of requiring callers to pass them in.

/// A resolved well-known account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownPubkey {
    /// Package the expression comes from.
    pub package: &'static str,
    /// SDK expression producing the pubkey.
    pub expr: &'static str,
}

/// Resolves a well-known account by its conventional IDL name.
#[must_use]
pub fn resolve_known_pubkey(name: &str) -> Option<KnownPubkey> {
    match name {
        "systemProgram" => Some(KnownPubkey {
            package: "web3",
            expr: "web3.SystemProgram.programId",
        }),
        "tokenProgram" => Some(KnownPubkey {
            package: "splToken",
            expr: "splToken.TOKEN_PROGRAM_ID",
        }),
        "ataProgram" | "associatedTokenProgram" => Some(KnownPubkey {
            package: "splToken",
            expr: "splToken.ASSOCIATED_TOKEN_PROGRAM_ID",
        }),
        "rent" => Some(KnownPubkey {
            package: "web3",
            expr: "web3.SYSVAR_RENT_PUBKEY",
        }),
        "clock" => Some(KnownPubkey {
            package: "web3",
            expr: "web3.SYSVAR_CLOCK_PUBKEY",
        }),
        "slotHashes" | "recentSlothashes" => Some(KnownPubkey {
            package: "web3",
            expr: "web3.SYSVAR_SLOT_HASHES_PUBKEY",
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_system_program() {
        let known = resolve_known_pubkey("systemProgram").expect("should resolve");
        assert_eq!(known.expr, "web3.SystemProgram.programId");
    }

    #[test]
    fn test_resolves_token_aliases() {
        assert_eq!(
            resolve_known_pubkey("ataProgram"),
            resolve_known_pubkey("associatedTokenProgram")
        );
    }

    #[test]
    fn test_unknown_name() {
        assert!(resolve_known_pubkey("authority").is_none());
        assert!(resolve_known_pubkey("fanout").is_none());
    }
}
