//! In-memory ledger over a [`BTreeMap`].
//!
//! Cursor entries are produced lazily: a task seeks one entry at a time and
//! hands it over through a bounded channel, so an open cursor never holds a
//! lock and never buffers more than the channel capacity. Writes made while a
//! cursor is open may or may not be seen by it.

use core::pin::Pin;
use core::task::{Context, Poll};

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use futures::Stream;
use futures::StreamExt;

use tokio_stream::wrappers::ReceiverStream;

use tonic::Status;

use crate::config::StoreConfig;
use crate::key::range::KeyRange;
use crate::ledger::{Close, Entry, Ledger};

type Data = Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>;

#[derive(Clone)]
pub struct MemLedger {
    data: Data,
    buffer: usize,
}

impl Default for MemLedger {
    fn default() -> Self {
        Self::with_config(&StoreConfig::default())
    }
}

impl MemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: &StoreConfig) -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            buffer: cfg.cursor_buffer.max(1),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize, Status> {
        let m = self
            .data
            .read()
            .map_err(|e| Status::internal(format!("unable to lock the ledger: {e}")))?;
        Ok(m.len())
    }

    pub fn is_empty(&self) -> Result<bool, Status> {
        self.len().map(|l| 0 == l)
    }
}

fn next_entry(
    data: &Data,
    range: &KeyRange,
    after: Option<&[u8]>,
) -> Result<Option<Entry>, Status> {
    let m = data
        .read()
        .map_err(|e| Status::internal(format!("unable to lock the ledger: {e}")))?;
    let found = m
        .range(range.bounds_after(after))
        .next()
        .map(|pair| (pair.0.clone(), pair.1.clone()));
    Ok(found)
}

pub struct MemCursor {
    rx: ReceiverStream<Result<Entry, Status>>,
}

impl Stream for MemCursor {
    type Item = Result<Entry, Status>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_next_unpin(cx)
    }
}

impl Close for MemCursor {
    fn close(&mut self) {
        self.rx.close()
    }
}

#[tonic::async_trait]
impl Ledger for MemLedger {
    type Cursor = MemCursor;

    async fn put_state(&self, key: Vec<u8>, val: Vec<u8>) -> Result<(), Status> {
        let mut m = self
            .data
            .write()
            .map_err(|e| Status::internal(format!("unable to lock the ledger: {e}")))?;
        m.insert(key, val);
        Ok(())
    }

    async fn get_state(&self, key: &[u8]) -> Result<Vec<u8>, Status> {
        let m = self
            .data
            .read()
            .map_err(|e| Status::internal(format!("unable to lock the ledger: {e}")))?;
        Ok(m.get(key).cloned().unwrap_or_default())
    }

    async fn open_range_by_prefix(&self, prefix: Vec<u8>) -> Result<Self::Cursor, Status> {
        let range = KeyRange::prefix(prefix);
        let data: Data = self.data.clone();
        let (tx, rx) = tokio::sync::mpsc::channel(self.buffer);
        tokio::spawn(async move {
            let mut last: Option<Vec<u8>> = None;
            loop {
                let next = next_entry(&data, &range, last.as_deref());
                let entry: Entry = match next {
                    Ok(None) => return,
                    Ok(Some(entry)) => entry,
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                };
                last = Some(entry.0.clone());
                if tx.send(Ok(entry)).await.is_err() {
                    log::debug!("cursor closed before the end of the range");
                    return;
                }
            }
        });
        Ok(MemCursor {
            rx: ReceiverStream::new(rx),
        })
    }
}
