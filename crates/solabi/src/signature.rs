use tiny_keccak::{Hasher, Keccak};

use crate::types::AbiType;

/// Keccak-256 of an arbitrary byte sequence.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(bytes);
    hasher.finalize(&mut output);
    output
}

/// The canonical signature string, `name(type1,type2,...)`, with every
/// parameter in its printed form. Tuples print their component list in
/// parentheses, recursively.
pub fn canonical_signature(name: &str, parameters: &[AbiType]) -> String {
    let parameters = parameters.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("{}({})", name, parameters.join(","))
}

/// The 4-byte function selector.
pub fn short_signature(name: &str, parameters: &[AbiType]) -> [u8; 4] {
    let hash = keccak256(canonical_signature(name, parameters).as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// The full-width event signature topic.
pub fn event_topic(name: &str, parameters: &[AbiType]) -> [u8; 32] {
    keccak256(canonical_signature(name, parameters).as_bytes())
}
