extern crate hex;
extern crate num_bigint;
extern crate num_traits;
extern crate pest;
#[macro_use]
extern crate pest_derive;
#[macro_use]
extern crate thiserror;

pub use abi_value::AbiValue;
pub use decoder::{decode, decode_abi_values, AbiDecoder};
pub use encoder::{encode, encode_hex, encode_value};
pub use error::Error;
pub use parser::parse;
pub use types::{AbiFunction, AbiType};
pub use value::Value;
pub use wrapped::WrappedValue;

mod abi_value;
mod decoder;
mod encoder;
mod error;
mod grammar;
mod parser;
pub mod signature;
mod types;
mod value;
mod wrapped;

/// Calldata and log payloads travel as hex strings, optionally `0x`-prefixed.
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}
