//! Parsers for contract specification files: OpenAPI, GraphQL SDL,
//! protobuf IDL, and AsyncAPI.

pub mod asyncapi;
pub mod graphql;
pub mod openapi;
pub mod proto;
