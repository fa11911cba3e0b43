extern crate hex;
extern crate serde;
extern crate serde_json;
extern crate solabi;
#[macro_use]
extern crate thiserror;

pub use error::Error;

pub mod eth;
mod error;
