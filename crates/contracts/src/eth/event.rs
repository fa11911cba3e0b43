use std::collections::BTreeMap;

use solabi::Value;

use crate::eth::parameter::{decode_outputs, map_parameter, OutputValue, SolidityParameter};
use crate::Error;

/// An event descriptor from the JSON contract-interface schema.
pub struct SolidityEvent {
    pub name: String,
    pub inputs: Vec<SolidityParameter>,
    pub anonymous: bool,
}

/// The slice of a log object the codec consumes: the topic list and the data
/// payload, both as hex strings.
#[derive(Clone, Debug, PartialEq)]
pub struct Log {
    pub topics: Vec<String>,
    pub data: String,
}

impl SolidityEvent {
    pub fn new(name: &str, inputs: Vec<SolidityParameter>, anonymous: bool) -> Self {
        Self { name: name.to_string(), inputs, anonymous }
    }

    pub fn signature(&self) -> String {
        let types = self.inputs.iter().map(|input| input.kind.clone()).collect::<Vec<_>>();
        solabi::signature::canonical_signature(&self.name, &types)
    }

    /// The full-width signature hash carried as topic zero by non-anonymous
    /// events.
    pub fn topic(&self) -> [u8; 32] {
        let types = self.inputs.iter().map(|input| input.kind.clone()).collect::<Vec<_>>();
        solabi::signature::event_topic(&self.name, &types)
    }

    /// Decodes a log against this event, mapping every parameter to its
    /// declared name.
    ///
    /// Indexed parameters consume one topic each, in declaration order.
    /// Indexed parameters of *dynamic* type are lossy by protocol: the topic
    /// holds only the hash of the value, so the topic's hex string is
    /// surfaced as-is instead of a decoded value. Non-indexed parameters are
    /// decoded together as one tuple from the data payload.
    pub fn decode_log(&self, log: &Log) -> Result<BTreeMap<String, OutputValue>, Error> {
        let mut topics = log.topics.iter();

        // anonymous events don't carry their signature in the topics
        if !self.anonymous {
            match topics.next() {
                Some(topic) if topic_matches(topic, &self.topic()) => {}
                _ => return Err(solabi::Error::DoesNotMatchSignature(self.signature()).into()),
            }
        }

        let (indexed, non_indexed): (Vec<_>, Vec<_>) =
            self.inputs.iter().partition(|input| input.indexed);

        let mut values = BTreeMap::new();
        for parameter in indexed {
            let topic = match topics.next() {
                Some(topic) => topic,
                None => break,
            };
            if parameter.kind.is_dynamic() {
                // only the hash of the value is on the wire
                values.insert(
                    parameter.name.clone(),
                    OutputValue::Value(Value::String(topic.clone())),
                );
            } else {
                let decoded = solabi::decode_abi_values(
                    std::slice::from_ref(&parameter.kind),
                    topic,
                )?;
                values.insert(parameter.name.clone(), map_parameter(&decoded[0], parameter)?);
            }
        }

        if !non_indexed.is_empty() {
            let non_indexed = non_indexed.into_iter().cloned().collect::<Vec<_>>();
            values.extend(decode_outputs(&non_indexed, &log.data)?);
        }
        Ok(values)
    }
}

fn topic_matches(topic: &str, expected: &[u8; 32]) -> bool {
    solabi::strip_hex_prefix(topic).eq_ignore_ascii_case(&hex::encode(expected))
}
