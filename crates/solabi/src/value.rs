use num_bigint::{BigInt, BigUint};

use crate::Error;

/// A native value, untagged by its declaring ABI type. This is what decoding
/// projects down to and what callers hand the encoder (paired with a type,
/// see [`crate::WrappedValue`]).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Address(String),
    Boolean(bool),
    Int(BigInt),
    UInt(BigUint),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Builds an address value from its 40-digit hex form, with or without a
    /// leading `0x`.
    pub fn address(address: &str) -> Result<Value, Error> {
        let address = crate::strip_hex_prefix(address);
        if address.len() != 40 {
            return Err(Error::InvalidData);
        }
        hex::decode(address)?;
        Ok(Value::Address(address.to_lowercase()))
    }

    pub fn as_address(&self) -> Result<&str, Error> {
        match self {
            Value::Address(address) => Ok(address),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_int(&self) -> Result<&BigInt, Error> {
        match self {
            Value::Int(int) => Ok(int),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_uint(&self) -> Result<&BigUint, Error> {
        match self {
            Value::UInt(uint) => Ok(uint),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], Error> {
        match self {
            Value::Bytes(bytes) => Ok(bytes),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_string(&self) -> Result<&str, Error> {
        match self {
            Value::String(string) => Ok(string),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], Error> {
        match self {
            Value::Array(array) => Ok(array),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_tuple(&self) -> Result<&[Value], Error> {
        match self {
            Value::Tuple(tuple) => Ok(tuple),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_boolean(&self) -> Result<&bool, Error> {
        match self {
            Value::Boolean(boolean) => Ok(boolean),
            _ => Err(Error::InvalidData),
        }
    }
}
