pub use contract::ContractAbi;
pub use event::{Log, SolidityEvent};
pub use function::SolidityFunction;
pub use parameter::{decode_outputs, map_parameter, OutputValue, SolidityParameter};

mod contract;
mod event;
mod function;
mod parameter;
