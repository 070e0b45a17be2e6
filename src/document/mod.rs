//! Document trees decoded from YAML or JSON.
//!
//! - [`node`]: the generic [`node::Value`] tree and its structural kinds
//! - [`normalize`]: canonicalization and complex list classification
//! - [`parser`]: decoding YAML/JSON text and encoding trees back

pub mod node;
pub mod normalize;
pub mod parser;

pub use node::{Kind, Mapping, Scalar, Value};
pub use normalize::{as_record_sequence, normalize};
