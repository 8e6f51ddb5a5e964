//! Data Transfer Objects for REST request/response serialization.
//!
//! Request fields arrive as plain strings and are validated into domain
//! types here; an invalid field never reaches the service layer.

pub mod common_dto;
pub mod pool_dto;
pub mod program_dto;
pub mod query_dto;

pub use common_dto::*;
pub use pool_dto::*;
pub use program_dto::*;
pub use query_dto::*;
