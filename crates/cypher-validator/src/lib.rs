#![doc = include_str!("../README.md")]

mod compatibility;
mod error;
mod extract;
mod model;
mod normalize;
mod rules;
mod scan;
mod schema;
mod validator;

pub use crate::error::ValidationError;
pub use crate::model::Direction;
pub use crate::model::SchemaViolation;
pub use crate::schema::RelationshipDecl;
pub use crate::schema::Schema;
pub use crate::schema::SchemaPayload;
pub use crate::validator::CypherValidator;
