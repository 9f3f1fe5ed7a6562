// Sub-modules organized by functional domain
pub mod access;
pub mod api;
pub mod label;

pub use access::*;
pub use api::*;
pub use label::*;
