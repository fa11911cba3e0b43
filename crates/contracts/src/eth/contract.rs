use std::collections::BTreeMap;

use serde::Deserialize;

use crate::eth::event::SolidityEvent;
use crate::eth::function::SolidityFunction;
use crate::eth::parameter::SolidityParameter;
use crate::Error;

/// A parsed JSON contract interface, indexed by entry name. Only `function`
/// and `event` entries are kept; constructors, fallbacks and the rest of the
/// schema are skipped.
pub struct ContractAbi {
    functions: BTreeMap<String, SolidityFunction>,
    events: BTreeMap<String, SolidityEvent>,
}

#[derive(Deserialize)]
struct AbiEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<SolidityParameter>,
    #[serde(default)]
    outputs: Vec<SolidityParameter>,
    #[serde(default)]
    anonymous: bool,
}

impl ContractAbi {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<AbiEntry> = serde_json::from_str(json)?;

        let mut functions = BTreeMap::new();
        let mut events = BTreeMap::new();
        for entry in entries {
            match entry.kind.as_str() {
                "function" => {
                    let function = SolidityFunction::new(&entry.name, entry.inputs, entry.outputs);
                    functions.insert(entry.name, function);
                }
                "event" => {
                    let event = SolidityEvent::new(&entry.name, entry.inputs, entry.anonymous);
                    events.insert(entry.name, event);
                }
                _ => {}
            }
        }
        Ok(Self { functions, events })
    }

    pub fn function(&self, name: &str) -> Option<&SolidityFunction> {
        self.functions.get(name)
    }

    pub fn event(&self, name: &str) -> Option<&SolidityEvent> {
        self.events.get(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &SolidityFunction> {
        self.functions.values()
    }

    pub fn events(&self) -> impl Iterator<Item = &SolidityEvent> {
        self.events.values()
    }
}
