//! Write targets for normalized items.
//!
//! The importer only ever calls [`ItemSink::put_item`], once per valid row and
//! in source order. Batching, retries, and persistence are up to the sink.

mod memory;

pub use memory::{DiscardSink, MemorySink};

use curator_model::{NormalizedItem, WriteError};

/// A destination that accepts one item at a time.
pub trait ItemSink {
    /// Human-readable name of the destination, used in log messages.
    fn target(&self) -> &str;

    /// Stores a single item. A failure affects only this item.
    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError>;
}

impl<S: ItemSink + ?Sized> ItemSink for &mut S {
    fn target(&self) -> &str {
        (**self).target()
    }

    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError> {
        (**self).put_item(item)
    }
}

impl<S: ItemSink + ?Sized> ItemSink for Box<S> {
    fn target(&self) -> &str {
        (**self).target()
    }

    fn put_item(&mut self, item: &NormalizedItem) -> Result<(), WriteError> {
        (**self).put_item(item)
    }
}
