use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The closed set of contract ABI types.
///
/// `Tuple` has no self-describing string form; it is only constructed through
/// [`AbiType::with_components`] with an externally supplied component list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiType {
    UInt(usize),
    Int(usize),
    Bool,
    Address,
    Fixed(usize, usize),
    UFixed(usize, usize),
    FixedBytes(usize),
    Bytes,
    String,
    Array(Box<AbiType>, usize),
    DynamicArray(Box<AbiType>),
    Tuple(Vec<AbiType>),
    Function(Box<AbiFunction>),
}

impl AbiType {
    /// A type is dynamic iff its encoded width depends on the value. Dynamic
    /// members are stored behind a head offset; the encoder and the decoder
    /// must agree on this predicate for every type.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::DynamicArray(_) => true,
            AbiType::Array(element, _) => element.is_dynamic(),
            AbiType::Tuple(members) => members.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Builds a type from its JSON string form plus the `components` list the
    /// surrounding JSON object carries for tuples. Every non-tuple string
    /// falls through to the grammar; a bare `"tuple"` without components is
    /// malformed.
    pub fn with_components(string: &str, components: Option<Vec<AbiType>>) -> Result<Self, Error> {
        match (string, components) {
            ("tuple", Some(components)) => Ok(AbiType::Tuple(components)),
            ("tuple[]", Some(components)) => {
                Ok(AbiType::DynamicArray(Box::new(AbiType::Tuple(components))))
            }
            (string, _) => crate::parser::parse(string),
        }
    }
}

impl FromStr for AbiType {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Error> {
        crate::parser::parse(string)
    }
}

impl fmt::Display for AbiType {
    /// Canonical printing; the exact form hashed into selectors and topics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::UInt(bits) => write!(f, "uint{}", bits),
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::Bool => write!(f, "bool"),
            AbiType::Address => write!(f, "address"),
            AbiType::Fixed(bits, scale) => write!(f, "fixed{}x{}", bits, scale),
            AbiType::UFixed(bits, scale) => write!(f, "ufixed{}x{}", bits, scale),
            AbiType::FixedBytes(size) => write!(f, "bytes{}", size),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::Array(element, size) => write!(f, "{}[{}]", element, size),
            AbiType::DynamicArray(element) => write!(f, "{}[]", element),
            AbiType::Tuple(members) => {
                let members = members.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "({})", members.join(","))
            }
            AbiType::Function(_) => write!(f, "function"),
        }
    }
}

/// A function descriptor as the `function` type carries it: enough to
/// recompute the selector and decode the trailing argument tuple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbiFunction {
    pub name: String,
    pub parameters: Vec<AbiType>,
}

impl AbiFunction {
    pub fn new(name: &str, parameters: Vec<AbiType>) -> Self {
        Self { name: name.to_string(), parameters }
    }

    /// The canonical signature string, `name(type1,type2,...)`.
    pub fn signature(&self) -> String {
        crate::signature::canonical_signature(&self.name, &self.parameters)
    }

    pub fn selector(&self) -> [u8; 4] {
        crate::signature::short_signature(&self.name, &self.parameters)
    }
}

impl fmt::Display for AbiFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}
