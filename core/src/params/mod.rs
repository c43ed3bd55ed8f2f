//! params/mod.rs
//! Parameter registry and the standalone parameter set.

pub mod registry;
pub mod set;

pub use registry::{
    descriptors, names, resolve, resolve_code, ParameterDescriptor, DECODE_PARAMETER_COUNT,
    ENCODE_PARAMETER_COUNT,
};
pub use set::CompressionParameterSet;
