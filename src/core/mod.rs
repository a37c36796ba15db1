pub mod attributes;
pub mod dataset;
pub mod error;
pub mod header_schema;
pub mod instance_header;
pub mod instances;

pub use error::TreeError;
