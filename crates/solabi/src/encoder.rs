use num_bigint::{BigInt, BigUint, Sign};

use crate::types::{AbiFunction, AbiType};
use crate::value::Value;
use crate::wrapped::WrappedValue;
use crate::Error;

const WORD_SIZE: usize = 32;

/// Encodes an argument list as one top-level tuple.
pub fn encode(values: &[WrappedValue]) -> Result<Vec<u8>, Error> {
    let members = values
        .iter()
        .map(|wrapped| (&wrapped.kind, &wrapped.value))
        .collect::<Vec<_>>();
    encode_members(&members)
}

/// As [`encode`], to a `0x`-prefixed hex string.
pub fn encode_hex(values: &[WrappedValue]) -> Result<String, Error> {
    Ok(format!("0x{}", hex::encode(encode(values)?)))
}

/// Encodes one value against its declared type. Dynamic values come out as a
/// self-contained frame (length plus content, or head plus tail); the
/// enclosing frame decides whether that lands in place or behind an offset.
pub fn encode_value(kind: &AbiType, value: &Value) -> Result<Vec<u8>, Error> {
    match kind {
        AbiType::UInt(_) => Ok(encode_uint_word(value.as_uint()?)),
        AbiType::Int(_) => Ok(encode_int_word(value.as_int()?)),
        AbiType::UFixed(_, _) => Ok(encode_uint_word(value.as_uint()?)),
        AbiType::Fixed(_, _) => Ok(encode_int_word(value.as_int()?)),
        AbiType::Bool => {
            let mut word = vec![0u8; WORD_SIZE];
            word[WORD_SIZE - 1] = *value.as_boolean()? as u8;
            Ok(word)
        }
        AbiType::Address => encode_address(value.as_address()?),
        AbiType::FixedBytes(size) => {
            let bytes = value.as_bytes()?;
            if bytes.len() != *size {
                return Err(Error::InvalidData);
            }
            Ok(right_padded(bytes))
        }
        AbiType::Bytes => Ok(encode_length_prefixed(value.as_bytes()?)),
        AbiType::String => Ok(encode_length_prefixed(value.as_string()?.as_bytes())),
        AbiType::Array(element, size) => {
            let values = value.as_array()?;
            if values.len() != *size {
                return Err(Error::InvalidData);
            }
            encode_elements(element, values)
        }
        AbiType::DynamicArray(element) => {
            let values = value.as_array()?;
            let mut buff = encode_uint_word(&values.len().into());
            buff.extend(encode_elements(element, values)?);
            Ok(buff)
        }
        AbiType::Tuple(kinds) => {
            let values = value.as_tuple()?;
            if values.len() != kinds.len() {
                return Err(Error::InvalidData);
            }
            let members = kinds.iter().zip(values).collect::<Vec<_>>();
            encode_members(&members)
        }
        AbiType::Function(function) => encode_function(function, value),
    }
}

/// Head/tail layout for a frame of members: static members inline, dynamic
/// members as offset words pointing into a tail that starts right after the
/// head, offsets relative to the frame start, tail content in declaration
/// order.
fn encode_members(members: &[(&AbiType, &Value)]) -> Result<Vec<u8>, Error> {
    let mut head_chunks: Vec<Option<Vec<u8>>> = Vec::with_capacity(members.len());
    let mut tail_chunks: Vec<Vec<u8>> = Vec::new();

    for (kind, value) in members {
        if kind.is_dynamic() {
            head_chunks.push(None);
            tail_chunks.push(encode_value(kind, value)?);
        } else {
            head_chunks.push(Some(encode_value(kind, value)?));
        }
    }

    let head_size: usize = head_chunks
        .iter()
        .map(|chunk| chunk.as_ref().map(Vec::len).unwrap_or(WORD_SIZE))
        .sum();
    let mut tail_offset = std::iter::once(0).chain(tail_chunks.iter().scan(0, |offset, chunk| {
        *offset += chunk.len();
        Some(*offset)
    }));

    let mut head = Vec::with_capacity(head_size);
    for chunk in head_chunks {
        match chunk {
            Some(chunk) => head.extend_from_slice(&chunk),
            None => {
                let offset = head_size + tail_offset.next().unwrap();
                head.extend_from_slice(&encode_uint_word(&offset.into()));
            }
        }
    }

    let tail = tail_chunks.into_iter().flatten().collect::<Vec<_>>();
    Ok([head, tail].concat())
}

fn encode_elements(element: &AbiType, values: &[Value]) -> Result<Vec<u8>, Error> {
    let members = values.iter().map(|value| (element, value)).collect::<Vec<_>>();
    encode_members(&members)
}

/// The selector followed by the argument tuple, mirroring the decoder's
/// function layout.
fn encode_function(function: &AbiFunction, value: &Value) -> Result<Vec<u8>, Error> {
    let arguments = value.as_tuple()?;
    if arguments.len() != function.parameters.len() {
        return Err(Error::InvalidData);
    }
    let members = function.parameters.iter().zip(arguments).collect::<Vec<_>>();
    let mut buff = function.selector().to_vec();
    buff.extend(encode_members(&members)?);
    Ok(buff)
}

fn encode_address(address: &str) -> Result<Vec<u8>, Error> {
    if address.len() != 40 {
        return Err(Error::InvalidData);
    }
    let mut word = vec![0u8; 12];
    word.extend(hex::decode(address)?);
    Ok(word)
}

/// Left-pads to a word, reducing modulo 2^256 first.
fn encode_uint_word(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut word = vec![0u8; WORD_SIZE];
    if bytes.len() >= WORD_SIZE {
        word.copy_from_slice(&bytes[bytes.len() - WORD_SIZE..]);
    } else {
        word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    }
    word
}

/// Two's-complement over the full word; negative values left-pad with 0xFF.
fn encode_int_word(value: &BigInt) -> Vec<u8> {
    let bytes = value.to_signed_bytes_be();
    let fill = if value.sign() == Sign::Minus { 0xFF } else { 0x00 };
    let mut word = vec![fill; WORD_SIZE];
    if bytes.len() >= WORD_SIZE {
        word.copy_from_slice(&bytes[bytes.len() - WORD_SIZE..]);
    } else {
        word[WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    }
    word
}

fn encode_length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut buff = encode_uint_word(&bytes.len().into());
    buff.extend(right_padded(bytes));
    buff
}

fn right_padded(bytes: &[u8]) -> Vec<u8> {
    let aligned = WORD_SIZE * ((bytes.len() + WORD_SIZE - 1) / WORD_SIZE);
    let mut padded = bytes.to_vec();
    padded.resize(aligned, 0);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder;

    #[test]
    fn test_encode_simple_tuple() {
        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000001",
            "000000000000000000000000000000000000000000000000000000000000FFFF",
        ))
        .unwrap();

        let values = [
            WrappedValue::boolean(true),
            WrappedValue::uint(0xFFFF_u32.into()),
        ];
        assert_eq!(encode(&values).unwrap(), bytes);
    }

    #[test]
    fn test_encode_uint_and_int_words() {
        let bytes = hex::decode("00000000000000000000000000000000000000000000000000000000FEEDFACE")
            .unwrap();
        assert_eq!(encode(&[WrappedValue::uint(0xFEEDFACE_u32.into())]).unwrap(), bytes);
        assert_eq!(encode(&[WrappedValue::int(0xFEEDFACE_u32.into())]).unwrap(), bytes);

        let minus_one = hex::decode("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")
            .unwrap();
        assert_eq!(encode(&[WrappedValue::int(BigInt::from(-1))]).unwrap(), minus_one);
    }

    #[test]
    fn test_encode_fixed_bytes() {
        let bytes = hex::decode("FEEDFACE00000000000000000000000000000000000000000000000000000000")
            .unwrap();
        assert_eq!(
            encode(&[WrappedValue::fixed_bytes(vec![0xFE, 0xED, 0xFA, 0xCE])]).unwrap(),
            bytes,
        );

        // a full word gets no extra padding
        let word = vec![0xAB; 32];
        assert_eq!(encode(&[WrappedValue::fixed_bytes(word.clone())]).unwrap(), word);
    }

    #[test]
    fn test_encode_dynamic_bytes() {
        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000008",
            "FEEDFACEFEEDFACE000000000000000000000000000000000000000000000000",
        ))
        .unwrap();
        assert_eq!(
            encode(&[WrappedValue::bytes(vec![0xFE, 0xED, 0xFA, 0xCE, 0xFE, 0xED, 0xFA, 0xCE])])
                .unwrap(),
            bytes,
        );
    }

    #[test]
    fn test_encode_string() {
        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000020",
            "0000000000000000000000000000000000000000000000000000000000000006",
            "4845594249540000000000000000000000000000000000000000000000000000",
        ))
        .unwrap();
        assert_eq!(encode(&[WrappedValue::string("HEYBIT")]).unwrap(), bytes);
    }

    #[test]
    fn test_encode_nested_tuple() {
        // (uint256, (uint256, uint256[]))
        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000040",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "0000000000000000000000000000000000000000000000000000000000000004",
        ))
        .unwrap();

        let values = [
            WrappedValue::uint(1_u8.into()),
            WrappedValue::tuple(vec![
                WrappedValue::uint(2_u8.into()),
                WrappedValue::array(
                    vec![Value::UInt(3_u8.into()), Value::UInt(4_u8.into())],
                    AbiType::UInt(256),
                ),
            ]),
        ];
        assert_eq!(encode(&values).unwrap(), bytes);
    }

    #[test]
    fn test_encode_mixed_static_and_dynamic() {
        // (uint256, uint32[], bytes10, bytes)
        let bytes = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000123",
            "0000000000000000000000000000000000000000000000000000000000000080",
            "3132333435363738393000000000000000000000000000000000000000000000",
            "00000000000000000000000000000000000000000000000000000000000000e0",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000456",
            "0000000000000000000000000000000000000000000000000000000000000789",
            "000000000000000000000000000000000000000000000000000000000000000d",
            "48656c6c6f2c20776f726c642100000000000000000000000000000000000000",
        ))
        .unwrap();

        let values = [
            WrappedValue::uint(0x123_u32.into()),
            WrappedValue::new(
                Value::Array(vec![Value::UInt(0x456_u32.into()), Value::UInt(0x789_u32.into())]),
                AbiType::DynamicArray(Box::new(AbiType::UInt(32))),
            ),
            WrappedValue::fixed_bytes("1234567890".as_bytes().to_vec()),
            WrappedValue::bytes("Hello, world!".as_bytes().to_vec()),
        ];
        assert_eq!(encode(&values).unwrap(), bytes);
    }

    #[test]
    fn test_encode_multiple_dynamic_arrays() {
        let bytes = hex::decode(concat!(
            "00000000000000000000000000000000000000000000000000000000000000a0",
            "0000000000000000000000000000000000000000000000000000000000000160",
            "0000000000000000000000000000000000000000000000000000000000000220",
            "0000000000000000000000000000000000000000000000000000000000000280",
            "00000000000000000000000000000000000000000000000000000000000002e0",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000003",
            "0000000000000000000000000000000000000000000000000000000000000004",
            "0000000000000000000000000000000000000000000000000000000000000005",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000001111111111111111111111111111111111111111",
            "0000000000000000000000002222222222222222222222222222222222222222",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000014",
            "0000000000000000000000000000000000000000000000000000000000000019",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "0000000000000000000000000000000000000000000000000000000000000001",
            "0000000000000000000000000000000000000000000000000000000000000000",
        ))
        .unwrap();

        let addresses = |items: &[&str]| -> Vec<Value> {
            items.iter().map(|address| Value::address(address).unwrap()).collect()
        };
        let uints = |items: &[u8]| -> Vec<Value> {
            items.iter().map(|&item| Value::UInt(item.into())).collect()
        };

        let values = [
            WrappedValue::array(
                addresses(&[
                    "1111111111111111111111111111111111111111",
                    "2222222222222222222222222222222222222222",
                    "1111111111111111111111111111111111111111",
                    "1111111111111111111111111111111111111111",
                    "2222222222222222222222222222222222222222",
                ]),
                AbiType::Address,
            ),
            WrappedValue::array(uints(&[1, 2, 3, 4, 5]), AbiType::UInt(256)),
            WrappedValue::array(
                addresses(&[
                    "1111111111111111111111111111111111111111",
                    "2222222222222222222222222222222222222222",
                ]),
                AbiType::Address,
            ),
            WrappedValue::array(uints(&[20, 25]), AbiType::UInt(256)),
            WrappedValue::array(uints(&[1, 0]), AbiType::UInt(256)),
        ];
        assert_eq!(encode(&values).unwrap(), bytes);
    }

    #[test]
    fn test_encode_empty_arguments() {
        assert_eq!(encode(&[]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_shape_mismatch() {
        let wrong_arity = WrappedValue::new(
            Value::Array(vec![Value::UInt(1_u8.into())]),
            AbiType::Array(Box::new(AbiType::UInt(256)), 2),
        );
        assert_eq!(encode(&[wrong_arity]), Err(Error::InvalidData));

        let wrong_shape = WrappedValue::new(Value::Boolean(true), AbiType::UInt(256));
        assert_eq!(encode(&[wrong_shape]), Err(Error::InvalidData));
    }

    fn round_trip(values: &[WrappedValue]) -> Vec<Value> {
        let types = values.iter().map(|wrapped| wrapped.kind.clone()).collect::<Vec<_>>();
        let encoded = encode_hex(values).unwrap();
        decoder::decode(&types, &encoded).unwrap()
    }

    #[test]
    fn test_round_trip_signed_boundaries() {
        let minus_one = WrappedValue::int(BigInt::from(-1));
        assert_eq!(
            encode(&[minus_one.clone()]).unwrap(),
            vec![0xFF; 32],
        );
        assert_eq!(round_trip(&[minus_one]), vec![Value::Int(BigInt::from(-1))]);

        // i8::MIN through the shared 256-bit word path
        let int8_min = WrappedValue::new(Value::Int(BigInt::from(-128)), AbiType::Int(8));
        assert_eq!(round_trip(&[int8_min]), vec![Value::Int(BigInt::from(-128))]);
    }

    #[test]
    fn test_round_trip_nested_dynamic_offsets() {
        // tuple containing a dynamic array of dynamic arrays of string, with
        // zero-length and multi-element members
        let strings = |items: &[&str]| -> Value {
            Value::Array(items.iter().map(|item| Value::String(item.to_string())).collect())
        };
        let value = Value::Tuple(vec![
            Value::UInt(7_u8.into()),
            Value::Array(vec![
                strings(&[]),
                strings(&["", "hello", "a much longer string that spans multiple words"]),
                strings(&["x"]),
            ]),
        ]);
        let kind = AbiType::Tuple(vec![
            AbiType::UInt(256),
            AbiType::DynamicArray(Box::new(AbiType::DynamicArray(Box::new(AbiType::String)))),
        ]);

        let wrapped = WrappedValue::new(value.clone(), kind);
        assert_eq!(round_trip(&[wrapped]), vec![value]);
    }

    #[test]
    fn test_round_trip_fixed_array_of_dynamic_elements() {
        let value = Value::Array(vec![
            Value::String("one".to_string()),
            Value::String("".to_string()),
            Value::String("three".to_string()),
        ]);
        let wrapped = WrappedValue::fixed_array(value.as_array().unwrap().to_vec(), AbiType::String);
        assert_eq!(round_trip(&[wrapped.clone()]), vec![value]);
    }

    #[test]
    fn test_round_trip_function_value() {
        let function = AbiFunction::new("transfer", vec![AbiType::Address, AbiType::UInt(256)]);
        let kind = AbiType::Function(Box::new(function));
        let value = Value::Tuple(vec![
            Value::address("feedfacefeedfacefeedfacefeedfacefeedface").unwrap(),
            Value::UInt(42_u8.into()),
        ]);
        let wrapped = WrappedValue::new(value.clone(), kind);
        assert_eq!(round_trip(&[wrapped]), vec![value]);
    }
}
