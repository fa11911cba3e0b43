use num_bigint::{BigInt, BigUint};

use crate::types::AbiType;
use crate::value::Value;
use crate::Error;

/// A native value paired with the type it should encode as; the input
/// contract of the encoder. Built immediately before an encode call.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedValue {
    pub kind: AbiType,
    pub value: Value,
}

impl WrappedValue {
    pub fn new(value: Value, kind: AbiType) -> Self {
        Self { kind, value }
    }

    pub fn uint(value: BigUint) -> Self {
        Self::new(Value::UInt(value), AbiType::UInt(256))
    }

    pub fn int(value: BigInt) -> Self {
        Self::new(Value::Int(value), AbiType::Int(256))
    }

    pub fn boolean(value: bool) -> Self {
        Self::new(Value::Boolean(value), AbiType::Bool)
    }

    pub fn address(address: &str) -> Result<Self, Error> {
        Ok(Self::new(Value::address(address)?, AbiType::Address))
    }

    pub fn string(value: &str) -> Self {
        Self::new(Value::String(value.to_string()), AbiType::String)
    }

    pub fn bytes(value: Vec<u8>) -> Self {
        Self::new(Value::Bytes(value), AbiType::Bytes)
    }

    /// `bytes(n)` with `n` taken from the payload length.
    pub fn fixed_bytes(value: Vec<u8>) -> Self {
        let size = value.len();
        Self::new(Value::Bytes(value), AbiType::FixedBytes(size))
    }

    pub fn array(values: Vec<Value>, element: AbiType) -> Self {
        Self::new(Value::Array(values), AbiType::DynamicArray(Box::new(element)))
    }

    /// A fixed array whose declared length is the element count.
    pub fn fixed_array(values: Vec<Value>, element: AbiType) -> Self {
        let size = values.len();
        Self::new(Value::Array(values), AbiType::Array(Box::new(element), size))
    }

    pub fn tuple(members: Vec<WrappedValue>) -> Self {
        let kinds = members.iter().map(|member| member.kind.clone()).collect();
        let values = members.into_iter().map(|member| member.value).collect();
        Self::new(Value::Tuple(values), AbiType::Tuple(kinds))
    }
}
