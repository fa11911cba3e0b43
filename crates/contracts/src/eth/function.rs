use std::collections::BTreeMap;

use solabi::{Value, WrappedValue};

use crate::eth::parameter::{decode_outputs, OutputValue, SolidityParameter};
use crate::Error;

/// A callable function descriptor: canonical signature, 4-byte selector, and
/// the input/output parameter lists used to encode calls and decode results.
pub struct SolidityFunction {
    pub name: String,
    pub inputs: Vec<SolidityParameter>,
    pub outputs: Vec<SolidityParameter>,
    selector: [u8; 4],
}

impl SolidityFunction {
    pub fn new(name: &str, inputs: Vec<SolidityParameter>, outputs: Vec<SolidityParameter>) -> Self {
        let types = inputs.iter().map(|input| input.kind.clone()).collect::<Vec<_>>();
        let selector = solabi::signature::short_signature(name, &types);
        Self { name: name.to_string(), inputs, outputs, selector }
    }

    /// Builds a function from bare type strings, for callers that don't carry
    /// a JSON interface description.
    pub fn from_signature(name: &str, args: &[&str], returns: &[&str]) -> Result<Self, Error> {
        let parse = |strings: &[&str]| -> Result<Vec<SolidityParameter>, Error> {
            strings
                .iter()
                .map(|string| Ok(SolidityParameter::unnamed(solabi::parse(string)?)))
                .collect()
        };
        Ok(Self::new(name, parse(args)?, parse(returns)?))
    }

    pub fn signature(&self) -> String {
        let types = self.inputs.iter().map(|input| input.kind.clone()).collect::<Vec<_>>();
        solabi::signature::canonical_signature(&self.name, &types)
    }

    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }

    /// Encodes a call as `0x`-prefixed calldata: selector then arguments.
    pub fn encode_call(&self, args: Vec<Value>) -> Result<String, Error> {
        if args.len() != self.inputs.len() {
            return Err(Error::InvalidData);
        }
        let wrapped = self
            .inputs
            .iter()
            .zip(args)
            .map(|(input, value)| WrappedValue::new(value, input.kind.clone()))
            .collect::<Vec<_>>();
        let encoded = solabi::encode(&wrapped)?;
        Ok(format!("0x{}{}", hex::encode(self.selector), hex::encode(encoded)))
    }

    /// Decodes calldata back to the argument values. The leading 4 bytes must
    /// match this function's selector.
    pub fn decode_call(&self, input: &str) -> Result<Vec<Value>, Error> {
        let data = hex::decode(solabi::strip_hex_prefix(input))?;
        if data.len() < 4 || data[..4] != self.selector {
            return Err(solabi::Error::FunctionSignatureMismatch(self.signature()).into());
        }

        let types = self.inputs.iter().map(|input| input.kind.clone()).collect::<Vec<_>>();
        let mut decoder = solabi::AbiDecoder::new(&data[4..]);
        let values = decoder.decode_tuple(&types)?;
        Ok(values.iter().map(|value| value.native_value()).collect())
    }

    /// Decodes return data to the raw output values, in declaration order.
    pub fn decode_returns(&self, input: &str) -> Result<Vec<Value>, Error> {
        let types = self.outputs.iter().map(|output| output.kind.clone()).collect::<Vec<_>>();
        Ok(solabi::decode(&types, input)?)
    }

    /// Decodes return data to named outputs.
    pub fn decode_outputs(&self, input: &str) -> Result<BTreeMap<String, OutputValue>, Error> {
        decode_outputs(&self.outputs, input)
    }
}
