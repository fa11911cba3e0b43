use num_bigint::{BigInt, BigUint};

use crate::types::{AbiFunction, AbiType};
use crate::value::Value;

/// A decoded value tagged with its originating type. Produced only by the
/// decoder; callers usually project it down with [`AbiValue::native_value`].
#[derive(Clone, Debug, PartialEq)]
pub enum AbiValue {
    UInt { bits: usize, value: BigUint },
    Int { bits: usize, value: BigInt },
    Bool(bool),
    Address(String),
    Fixed { bits: usize, scale: usize, value: BigInt },
    UFixed { bits: usize, scale: usize, value: BigUint },
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    Array { element: AbiType, values: Vec<AbiValue> },
    DynamicArray { element: AbiType, values: Vec<AbiValue> },
    Tuple(Vec<AbiValue>),
    Function { function: AbiFunction, arguments: Vec<AbiValue> },
}

impl AbiValue {
    /// The type this value decoded as.
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::UInt { bits, .. } => AbiType::UInt(*bits),
            AbiValue::Int { bits, .. } => AbiType::Int(*bits),
            AbiValue::Bool(_) => AbiType::Bool,
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::Fixed { bits, scale, .. } => AbiType::Fixed(*bits, *scale),
            AbiValue::UFixed { bits, scale, .. } => AbiType::UFixed(*bits, *scale),
            AbiValue::FixedBytes(bytes) => AbiType::FixedBytes(bytes.len()),
            AbiValue::Bytes(_) => AbiType::Bytes,
            AbiValue::String(_) => AbiType::String,
            AbiValue::Array { element, values } => {
                AbiType::Array(Box::new(element.clone()), values.len())
            }
            AbiValue::DynamicArray { element, .. } => {
                AbiType::DynamicArray(Box::new(element.clone()))
            }
            AbiValue::Tuple(values) => {
                AbiType::Tuple(values.iter().map(AbiValue::abi_type).collect())
            }
            AbiValue::Function { function, .. } => AbiType::Function(Box::new(function.clone())),
        }
    }

    /// Projects down to the untagged native value. Fixed-point values project
    /// as their unscaled integer representation; function values as the tuple
    /// of their decoded arguments.
    pub fn native_value(&self) -> Value {
        match self {
            AbiValue::UInt { value, .. } => Value::UInt(value.clone()),
            AbiValue::Int { value, .. } => Value::Int(value.clone()),
            AbiValue::Bool(boolean) => Value::Boolean(*boolean),
            AbiValue::Address(address) => Value::Address(address.clone()),
            AbiValue::Fixed { value, .. } => Value::Int(value.clone()),
            AbiValue::UFixed { value, .. } => Value::UInt(value.clone()),
            AbiValue::FixedBytes(bytes) | AbiValue::Bytes(bytes) => Value::Bytes(bytes.clone()),
            AbiValue::String(string) => Value::String(string.clone()),
            AbiValue::Array { values, .. } | AbiValue::DynamicArray { values, .. } => {
                Value::Array(values.iter().map(AbiValue::native_value).collect())
            }
            AbiValue::Tuple(values) => {
                Value::Tuple(values.iter().map(AbiValue::native_value).collect())
            }
            AbiValue::Function { arguments, .. } => {
                Value::Tuple(arguments.iter().map(AbiValue::native_value).collect())
            }
        }
    }
}
