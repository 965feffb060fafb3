//! Concrete write targets for the device import.
//!
//! - [`DynamoSink`]: one `PutItem` per row into a DynamoDB table (or DynamoDB
//!   Local), every attribute stored as a string.
//! - [`JsonLinesSink`]: one JSON object per line, for inspecting what an
//!   import would write.

pub mod dynamo;
pub mod jsonl;

pub use dynamo::{
    DEFAULT_ENDPOINT, DEFAULT_REGION, DEFAULT_TABLE_NAME, DynamoConfig, DynamoSink, TableState,
    to_attribute_map,
};
pub use jsonl::JsonLinesSink;
