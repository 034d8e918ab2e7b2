//! Ordered key/value ledger used as the record store substrate.
//!
//! The ledger (consensus, durability, transaction ordering) lives outside of
//! this crate; only its interface is defined here.

use core::pin::Pin;
use core::task::{Context, Poll};

use std::sync::Arc;

use futures::Stream;
use futures::StreamExt;

use tonic::Status;

pub mod mem;

/// Key/value pair read from a ledger.
pub type Entry = (Vec<u8>, Vec<u8>);

/// Releases the resources held by a cursor.
pub trait Close {
    fn close(&mut self);
}

#[tonic::async_trait]
pub trait Ledger: Send + Sync + 'static {
    /// Entries of a range, in ascending key order.
    type Cursor: Stream<Item = Result<Entry, Status>> + Close + Send + Unpin + 'static;

    async fn put_state(&self, key: Vec<u8>, val: Vec<u8>) -> Result<(), Status>;

    /// Gets the value of a key; an empty value is returned if the key is absent.
    async fn get_state(&self, key: &[u8]) -> Result<Vec<u8>, Status>;

    /// Opens a cursor over all keys starting with `prefix`.
    async fn open_range_by_prefix(&self, prefix: Vec<u8>) -> Result<Self::Cursor, Status>;
}

#[tonic::async_trait]
impl<L> Ledger for Arc<L>
where
    L: Ledger,
{
    type Cursor = L::Cursor;

    async fn put_state(&self, key: Vec<u8>, val: Vec<u8>) -> Result<(), Status> {
        let l: &L = self;
        l.put_state(key, val).await
    }

    async fn get_state(&self, key: &[u8]) -> Result<Vec<u8>, Status> {
        let l: &L = self;
        l.get_state(key).await
    }

    async fn open_range_by_prefix(&self, prefix: Vec<u8>) -> Result<Self::Cursor, Status> {
        let l: &L = self;
        l.open_range_by_prefix(prefix).await
    }
}

/// Cursor which is closed when dropped.
pub struct ScopedCursor<C>
where
    C: Close,
{
    cursor: C,
}

impl<C> ScopedCursor<C>
where
    C: Close,
{
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }
}

impl<C> Drop for ScopedCursor<C>
where
    C: Close,
{
    fn drop(&mut self) {
        self.cursor.close()
    }
}

impl<C> Stream for ScopedCursor<C>
where
    C: Stream + Close + Unpin,
{
    type Item = C::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().cursor.poll_next_unpin(cx)
    }
}
