// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Normalization of merchant-supplied addresses into the canonical form
//! used for contract-call arguments.

use crate::common::Address;
use std::str::FromStr;

/// Hex form of a TRON account: one `0x41` version byte followed by the
/// 20-byte account id.
const TRON_HEX_LEN: usize = 42;
const TRON_VERSION_PREFIX: &str = "41";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Parse an address given in any supported representation: `0x`-prefixed
/// hex, bare 40-character hex, or the `41`-prefixed hex form produced by
/// TRON tooling (the last 20 bytes are the account).
///
/// Normalization is deterministic and idempotent; malformed input is
/// rejected rather than coerced.
pub fn normalize(input: &str) -> Result<Address, Error> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // A 21-byte payload is only ever the TRON hex form.
    let body = if body.len() == TRON_HEX_LEN && body.starts_with(TRON_VERSION_PREFIX) {
        &body[TRON_VERSION_PREFIX.len()..]
    } else {
        body
    };

    Address::from_str(body).map_err(|_| Error::InvalidAddress(trimmed.to_string()))
}

/// The canonical (EIP-55 checksummed) encoding of an address.
pub fn canonical(address: Address) -> String {
    address.to_checksum(None)
}

/// Validity predicate for normalization results. Only the exact canonical
/// encoding passes, which is what gets handed to contract calls.
pub fn is_canonical(input: &str) -> bool {
    Address::parse_checksummed(input, None).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x77E1E5E7b4614138676d9F70e53a9926d83a45c3";

    #[test]
    fn accepts_prefixed_and_bare_hex() {
        let prefixed = normalize(CHECKSUMMED).expect("checksummed input");
        let bare = normalize(&CHECKSUMMED[2..]).expect("bare input");
        let lower = normalize(&CHECKSUMMED.to_lowercase()).expect("lowercase input");
        assert_eq!(prefixed, bare);
        assert_eq!(prefixed, lower);
    }

    #[test]
    fn accepts_tron_hex_form() {
        let tron_hex = format!("41{}", &CHECKSUMMED[2..]);
        let address = normalize(&tron_hex).expect("tron hex input");
        assert_eq!(canonical(address), CHECKSUMMED);
    }

    #[test]
    fn is_idempotent() {
        let address = normalize(CHECKSUMMED).expect("valid input");
        let again = normalize(&canonical(address)).expect("canonical input");
        assert_eq!(address, again);
        assert_eq!(canonical(again), canonical(address));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "0x", "0x1234", "not-an-address", "0xzz1E5E7b4614138676d9F70e53a9926d83a45c3"] {
            assert!(
                matches!(normalize(input), Err(Error::InvalidAddress(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn validity_predicate_requires_checksum() {
        let address = normalize(CHECKSUMMED).expect("valid input");
        assert!(is_canonical(&canonical(address)));
        assert!(!is_canonical(&CHECKSUMMED.to_lowercase()));
        assert!(!is_canonical("garbage"));
    }
}
