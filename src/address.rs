//! Local, informational address-format inspection.
//!
//! Applies the same shape rules the Kaspa web wallet applies before it
//! talks to the API: network prefix, bech32 charset and payload length.
//! No checksum is verified. The result is shown next to the API verdict
//! and never stops a request from being sent.

use std::fmt;

const MAINNET_PREFIX: &str = "kaspa:";
const TESTNET_PREFIX: &str = "kaspatest:";

/// Bech32 data alphabet.
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Accepted payload lengths (characters after the prefix).
    fn payload_len_range(self) -> std::ops::RangeInclusive<usize> {
        match self {
            Network::Mainnet => 61..=63,
            Network::Testnet => 61..=65,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Local verdict on the shape of an address string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressFormat {
    /// Right prefix, charset and length. Says nothing about the checksum.
    Plausible { network: Network },
    UnknownPrefix,
    BadCharset { network: Network, offending: char },
    BadLength { network: Network, len: usize },
}

impl AddressFormat {
    pub fn is_plausible(&self) -> bool {
        matches!(self, AddressFormat::Plausible { .. })
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFormat::Plausible { network } => write!(f, "plausible {network} address"),
            AddressFormat::UnknownPrefix => {
                write!(f, "missing '{MAINNET_PREFIX}' or '{TESTNET_PREFIX}' prefix")
            }
            AddressFormat::BadCharset { network, offending } => {
                write!(f, "{network} prefix, but '{offending}' is not a bech32 character")
            }
            AddressFormat::BadLength { network, len } => {
                let range = network.payload_len_range();
                write!(
                    f,
                    "{network} prefix, but payload is {len} chars (expected {}-{})",
                    range.start(),
                    range.end()
                )
            }
        }
    }
}

/// Classify `address` without touching the network.
pub fn inspect(address: &str) -> AddressFormat {
    let (network, payload) = if let Some(rest) = address.strip_prefix(TESTNET_PREFIX) {
        (Network::Testnet, rest)
    } else if let Some(rest) = address.strip_prefix(MAINNET_PREFIX) {
        (Network::Mainnet, rest)
    } else {
        return AddressFormat::UnknownPrefix;
    };

    if let Some(offending) = payload.chars().find(|c| !BECH32_CHARSET.contains(*c)) {
        return AddressFormat::BadCharset { network, offending };
    }

    let len = payload.chars().count();
    if !network.payload_len_range().contains(&len) {
        return AddressFormat::BadLength { network, len };
    }

    AddressFormat::Plausible { network }
}
