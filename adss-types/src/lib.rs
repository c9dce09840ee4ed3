pub mod access;
pub mod constants;
pub mod error;
pub mod primitives;
pub mod share;

pub use access::AccessStructure;
pub use error::{AdssError, AdssResult};
pub use share::{PublicData, SecretShare};
