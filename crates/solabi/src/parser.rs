use pest::iterators::Pair;
use pest::Parser;

use crate::grammar::{Rule, TypeGrammar};
use crate::types::AbiType;
use crate::Error;

/// Parses a type from its canonical string form.
///
/// Tuples are not expressible in the grammar; see [`AbiType::with_components`].
/// Bit widths are accepted as any digit run (`uint2000` parses) so that inputs
/// the surrounding system already tolerates keep working.
pub fn parse(string: &str) -> Result<AbiType, Error> {
    let mut pairs = TypeGrammar::parse(Rule::Type, string)
        .map_err(|_| Error::TypeMalformed(string.to_string()))?;
    let basic = pairs.next().ok_or_else(|| Error::TypeMalformed(string.to_string()))?;
    accept_basic_type(basic)
}

fn accept_basic_type(pair: Pair<Rule>) -> Result<AbiType, Error> {
    let mut inner = pair.into_inner();

    let base = inner.next().expect("Rule::BasicType should have an inner: Rule::BaseType");
    let (sub, array) = if let Some(sub_or_array) = inner.next() {
        match sub_or_array.as_rule() {
            Rule::Sub => (Some(sub_or_array), inner.next()),
            Rule::Array => (None, Some(sub_or_array)),
            rule => unreachable!("Rule::BasicType can not expand to {:?}", rule),
        }
    } else {
        (None, None)
    };

    let sub = sub.map(|digits| accept_digits(&digits)).transpose()?;
    let base_type = match base.as_str() {
        "address" => AbiType::Address,
        "bool" => AbiType::Bool,
        "string" => AbiType::String,
        "bytes" => match sub {
            Some(size) => AbiType::FixedBytes(size),
            None => AbiType::Bytes,
        },
        "uint" => AbiType::UInt(sub.unwrap_or(256)),
        "int" => AbiType::Int(sub.unwrap_or(256)),
        name => return Err(Error::TypeMalformed(name.to_string())),
    };

    match array {
        None => Ok(base_type),
        Some(array) => accept_array(array, base_type),
    }
}

fn accept_array(pair: Pair<Rule>, base_type: AbiType) -> Result<AbiType, Error> {
    // Suffixes apply left to right: `string[][7]` is a fixed array of 7
    // dynamic arrays of string.
    let mut abi_type = base_type;
    for suffix in pair.into_inner() {
        abi_type = match suffix.as_rule() {
            Rule::DynamicArray => AbiType::DynamicArray(Box::new(abi_type)),
            Rule::ConstArray => {
                let digits = suffix.into_inner().next()
                    .expect("Rule::ConstArray should have an inner: Rule::Digits");
                AbiType::Array(Box::new(abi_type), accept_digits(&digits)?)
            }
            rule => unreachable!("Rule::Array can not expand to {:?}", rule),
        };
    }
    Ok(abi_type)
}

fn accept_digits(pair: &Pair<Rule>) -> Result<usize, Error> {
    pair.as_str()
        .parse::<usize>()
        .map_err(|_| Error::CouldNotParseLength(pair.as_str().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_types() {
        assert_eq!(parse("string"), Ok(AbiType::String));
        assert_eq!(parse("bool"), Ok(AbiType::Bool));
        assert_eq!(parse("address"), Ok(AbiType::Address));
        assert_eq!(parse("bytes"), Ok(AbiType::Bytes));
        assert_eq!(parse("bytes5"), Ok(AbiType::FixedBytes(5)));
    }

    #[test]
    fn test_number_types() {
        assert_eq!(parse("uint"), Ok(AbiType::UInt(256)));
        assert_eq!(parse("uint8"), Ok(AbiType::UInt(8)));
        assert_eq!(parse("uint16"), Ok(AbiType::UInt(16)));
        assert_eq!(parse("int"), Ok(AbiType::Int(256)));
        assert_eq!(parse("int8"), Ok(AbiType::Int(8)));
        assert_eq!(parse("int16"), Ok(AbiType::Int(16)));
    }

    #[test]
    fn test_permissive_bit_widths() {
        // the grammar checks the numeric production, not the legal width set
        assert_eq!(parse("uint2000"), Ok(AbiType::UInt(2000)));
        assert_eq!(parse("int7"), Ok(AbiType::Int(7)));
    }

    #[test]
    fn test_array_types() {
        assert_eq!(parse("string[]"), Ok(AbiType::DynamicArray(Box::new(AbiType::String))));
        assert_eq!(parse("int32[]"), Ok(AbiType::DynamicArray(Box::new(AbiType::Int(32)))));
        assert_eq!(parse("string[4]"), Ok(AbiType::Array(Box::new(AbiType::String), 4)));
        assert_eq!(parse("bytes3[10]"), Ok(AbiType::Array(Box::new(AbiType::FixedBytes(3)), 10)));
    }

    #[test]
    fn test_nested_array_types() {
        assert_eq!(
            parse("string[][]"),
            Ok(AbiType::DynamicArray(Box::new(AbiType::DynamicArray(Box::new(AbiType::String))))),
        );
        assert_eq!(
            parse("string[3][]"),
            Ok(AbiType::DynamicArray(Box::new(AbiType::Array(Box::new(AbiType::String), 3)))),
        );
        assert_eq!(
            parse("string[][7]"),
            Ok(AbiType::Array(Box::new(AbiType::DynamicArray(Box::new(AbiType::String))), 7)),
        );
        assert_eq!(
            parse("string[1][2]"),
            Ok(AbiType::Array(Box::new(AbiType::Array(Box::new(AbiType::String), 1)), 2)),
        );
        assert_eq!(
            parse("string[][][2]"),
            Ok(AbiType::Array(
                Box::new(AbiType::DynamicArray(Box::new(AbiType::DynamicArray(Box::new(
                    AbiType::String
                ))))),
                2,
            )),
        );
    }

    #[test]
    fn test_malformed_types() {
        assert_eq!(parse("foo"), Err(Error::TypeMalformed("foo".to_string())));
        assert_eq!(parse("tuple"), Err(Error::TypeMalformed("tuple".to_string())));
        assert_eq!(parse("uint8x"), Err(Error::TypeMalformed("uint8x".to_string())));
        assert_eq!(parse("bytes["), Err(Error::TypeMalformed("bytes[".to_string())));
        assert_eq!(parse(""), Err(Error::TypeMalformed("".to_string())));
    }

    #[test]
    fn test_print_parse_round_trip() {
        for string in ["uint256", "int8", "bool", "address", "bytes32", "bytes", "string", "uint8[3][]", "string[][7]"] {
            let parsed = parse(string).unwrap();
            assert_eq!(parsed.to_string(), string);
            assert_eq!(parse(&parsed.to_string()), Ok(parsed));
        }
    }
}
