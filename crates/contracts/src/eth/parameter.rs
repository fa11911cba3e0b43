use std::collections::BTreeMap;

use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use solabi::{AbiType, AbiValue, Value};

use crate::Error;

/// A named parameter from the JSON contract-interface schema. The type field
/// is a single string; tuple types carry their member types in a sibling
/// `components` list, which also supplies the field names used when decoded
/// values are mapped to named results.
#[derive(Clone, Debug, PartialEq)]
pub struct SolidityParameter {
    pub name: String,
    pub kind: AbiType,
    pub components: Option<Vec<SolidityParameter>>,
    pub indexed: bool,
}

impl SolidityParameter {
    pub fn new(name: &str, kind: AbiType) -> Self {
        Self { name: name.to_string(), kind, components: None, indexed: false }
    }

    pub fn unnamed(kind: AbiType) -> Self {
        Self::new("", kind)
    }

    /// The JSON form of the type: tuples serialize as `"tuple"`/`"tuple[]"`
    /// with their members in `components`, everything else as its canonical
    /// string.
    pub fn type_string(&self) -> String {
        match &self.kind {
            AbiType::Tuple(_) => "tuple".to_string(),
            AbiType::DynamicArray(element) if matches!(**element, AbiType::Tuple(_)) => {
                "tuple[]".to_string()
            }
            kind => kind.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    components: Option<Vec<SolidityParameter>>,
    #[serde(default)]
    indexed: bool,
}

impl<'de> Deserialize<'de> for SolidityParameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawParameter::deserialize(deserializer)?;
        let component_types = raw
            .components
            .as_ref()
            .map(|components| components.iter().map(|c| c.kind.clone()).collect::<Vec<_>>());
        let kind = AbiType::with_components(&raw.kind, component_types)
            .map_err(de::Error::custom)?;
        Ok(SolidityParameter {
            name: raw.name,
            kind,
            components: raw.components,
            indexed: raw.indexed,
        })
    }
}

impl Serialize for SolidityParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = 2 + self.components.is_some() as usize + self.indexed as usize;
        let mut state = serializer.serialize_struct("SolidityParameter", fields)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", &self.type_string())?;
        if let Some(components) = &self.components {
            state.serialize_field("components", components)?;
        }
        if self.indexed {
            state.serialize_field("indexed", &self.indexed)?;
        }
        state.end()
    }
}

/// A decoded value mapped into named-result form: scalars stay native, arrays
/// map element-wise, tuples become records keyed by component name.
#[derive(Clone, Debug, PartialEq)]
pub enum OutputValue {
    Value(Value),
    Array(Vec<OutputValue>),
    Record(BTreeMap<String, OutputValue>),
}

impl OutputValue {
    pub fn as_value(&self) -> Result<&Value, Error> {
        match self {
            OutputValue::Value(value) => Ok(value),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_array(&self) -> Result<&[OutputValue], Error> {
        match self {
            OutputValue::Array(array) => Ok(array),
            _ => Err(Error::InvalidData),
        }
    }

    pub fn as_record(&self) -> Result<&BTreeMap<String, OutputValue>, Error> {
        match self {
            OutputValue::Record(record) => Ok(record),
            _ => Err(Error::InvalidData),
        }
    }
}

/// Projects a decoded value through its declaring parameter. Tuples without a
/// `components` list collapse to a single-entry record keyed by the
/// parameter's own name; `function` values cannot be projected.
pub fn map_parameter(value: &AbiValue, parameter: &SolidityParameter) -> Result<OutputValue, Error> {
    match value {
        AbiValue::Tuple(values) => {
            if let Some(components) = &parameter.components {
                if components.len() != values.len() {
                    return Err(Error::AbiError(solabi::Error::AssociatedTypeNotFound(
                        value.abi_type(),
                    )));
                }
                let mut record = BTreeMap::new();
                for (component, value) in components.iter().zip(values) {
                    record.insert(component.name.clone(), map_parameter(value, component)?);
                }
                Ok(OutputValue::Record(record))
            } else {
                let members = values
                    .iter()
                    .map(|value| OutputValue::Value(value.native_value()))
                    .collect();
                let mut record = BTreeMap::new();
                record.insert(parameter.name.clone(), OutputValue::Array(members));
                Ok(OutputValue::Record(record))
            }
        }
        AbiValue::Array { values, .. } | AbiValue::DynamicArray { values, .. } => {
            let members = values
                .iter()
                .map(|value| map_parameter(value, parameter))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(OutputValue::Array(members))
        }
        AbiValue::Function { .. } => {
            Err(Error::AbiError(solabi::Error::TypeNotSupported(value.abi_type())))
        }
        value => Ok(OutputValue::Value(value.native_value())),
    }
}

/// Decodes a hex payload against an output parameter list and maps each value
/// to its declared name.
pub fn decode_outputs(
    outputs: &[SolidityParameter],
    input: &str,
) -> Result<BTreeMap<String, OutputValue>, Error> {
    let types = outputs.iter().map(|output| output.kind.clone()).collect::<Vec<_>>();
    let values = solabi::decode_abi_values(&types, input)?;

    let mut result = BTreeMap::new();
    for (parameter, value) in outputs.iter().zip(&values) {
        result.insert(parameter.name.clone(), map_parameter(value, parameter)?);
    }
    Ok(result)
}
