use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};

use crate::abi_value::AbiValue;
use crate::types::{AbiFunction, AbiType};
use crate::value::Value;
use crate::Error;

const WORD_SIZE: usize = 32;

/// Decodes a hex calldata/return payload against an expected type list,
/// projecting the results to native values.
pub fn decode(types: &[AbiType], input: &str) -> Result<Vec<Value>, Error> {
    let values = decode_abi_values(types, input)?;
    Ok(values.iter().map(AbiValue::native_value).collect())
}

/// As [`decode`], but keeps the type tags on the decoded values.
pub fn decode_abi_values(types: &[AbiType], input: &str) -> Result<Vec<AbiValue>, Error> {
    let data = hex::decode(crate::strip_hex_prefix(input))?;
    let mut decoder = AbiDecoder::new(&data);
    decoder.decode_tuple(types)
}

/// A cursor over one decode call's buffer. Head/tail jumps are relative to
/// the enclosing tuple or array frame, never to the buffer start; the cursor
/// is saved around each jump and every read is bounds checked.
pub struct AbiDecoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> AbiDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn decode(&mut self, kind: &AbiType) -> Result<AbiValue, Error> {
        match kind {
            AbiType::UInt(bits) => {
                Ok(AbiValue::UInt { bits: *bits, value: self.decode_uint()? })
            }
            AbiType::Int(bits) => {
                Ok(AbiValue::Int { bits: *bits, value: self.decode_int()? })
            }
            AbiType::Bool => Ok(AbiValue::Bool(!self.decode_uint()?.is_zero())),
            AbiType::Address => Ok(AbiValue::Address(self.decode_address()?)),
            AbiType::Fixed(bits, scale) => {
                Ok(AbiValue::Fixed { bits: *bits, scale: *scale, value: self.decode_int()? })
            }
            AbiType::UFixed(bits, scale) => {
                Ok(AbiValue::UFixed { bits: *bits, scale: *scale, value: self.decode_uint()? })
            }
            AbiType::FixedBytes(size) => Ok(AbiValue::FixedBytes(self.decode_fixed_bytes(*size)?)),
            AbiType::Bytes => {
                let size = self.decode_length()?;
                Ok(AbiValue::Bytes(self.read(size)?.to_vec()))
            }
            AbiType::String => Ok(AbiValue::String(self.decode_string()?)),
            AbiType::Array(element, size) => Ok(AbiValue::Array {
                element: (**element).clone(),
                values: self.decode_array(element, *size)?,
            }),
            AbiType::DynamicArray(element) => {
                let size = self.decode_length()?;
                // one head word per element is the least a well formed
                // payload can carry
                if size > self.data.len() / WORD_SIZE {
                    return Err(Error::UnexpectedEnd(self.offset));
                }
                Ok(AbiValue::DynamicArray {
                    element: (**element).clone(),
                    values: self.decode_array(element, size)?,
                })
            }
            AbiType::Tuple(members) => Ok(AbiValue::Tuple(self.decode_tuple(members)?)),
            AbiType::Function(function) => self.decode_function(function),
        }
    }

    /// Decodes members in declaration order. Dynamic members carry a 32-byte
    /// offset word in the head, relative to the start of this frame; the
    /// cursor jumps there, decodes, and is restored to just after the offset
    /// word.
    pub fn decode_tuple(&mut self, types: &[AbiType]) -> Result<Vec<AbiValue>, Error> {
        let base_offset = self.offset;

        let mut values = Vec::with_capacity(types.len());
        for kind in types {
            let value = if kind.is_dynamic() {
                let jump = self.decode_length()?;
                let saved = self.offset;
                self.offset = base_offset
                    .checked_add(jump)
                    .ok_or(Error::UnexpectedEnd(saved))?;
                let value = self.decode(kind)?;
                self.offset = saved;
                value
            } else {
                self.decode(kind)?
            };
            values.push(value);
        }
        Ok(values)
    }

    fn decode_array(&mut self, element: &AbiType, size: usize) -> Result<Vec<AbiValue>, Error> {
        let types = vec![element.clone(); size];
        self.decode_tuple(&types)
    }

    /// Validates the leading 4-byte selector against the descriptor's
    /// canonical signature, then decodes the declared parameter list as a
    /// trailing tuple.
    fn decode_function(&mut self, function: &AbiFunction) -> Result<AbiValue, Error> {
        let selector = self.read(4)?;
        if selector != function.selector().as_slice() {
            return Err(Error::FunctionSignatureMismatch(function.signature()));
        }
        let arguments = self.decode_tuple(&function.parameters)?;
        Ok(AbiValue::Function { function: function.clone(), arguments })
    }

    fn decode_uint(&mut self) -> Result<BigUint, Error> {
        let word = self.read(WORD_SIZE)?;
        Ok(BigUint::from_bytes_be(word))
    }

    /// Two's-complement sign extension over the full 256-bit word; the
    /// declared bit width tags the value but never masks the payload.
    fn decode_int(&mut self) -> Result<BigInt, Error> {
        let word = self.read(WORD_SIZE)?;
        Ok(BigInt::from_signed_bytes_be(word))
    }

    fn decode_address(&mut self) -> Result<String, Error> {
        let word = self.read(WORD_SIZE)?;
        Ok(hex::encode(&word[12..]))
    }

    fn decode_fixed_bytes(&mut self, size: usize) -> Result<Vec<u8>, Error> {
        let bytes = self.read(size)?.to_vec();
        // skip the producer's padding so enclosing static frames stay word
        // aligned; nothing is read from it
        let aligned = WORD_SIZE * ((size + WORD_SIZE - 1) / WORD_SIZE);
        self.offset += aligned - size;
        Ok(bytes)
    }

    fn decode_string(&mut self) -> Result<String, Error> {
        let size = self.decode_length()?;
        let bytes = self.read(size)?.to_vec();
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8String)
    }

    fn decode_length(&mut self) -> Result<usize, Error> {
        let value = self.decode_uint()?;
        value
            .to_usize()
            .ok_or_else(|| Error::CouldNotParseLength(value.to_string()))
    }

    fn read(&mut self, count: usize) -> Result<&'a [u8], Error> {
        let end = self
            .offset
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::UnexpectedEnd(self.offset))?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }
}
