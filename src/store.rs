//! Book store on top of a [`Ledger`].
//!
//! Books are keyed by the composite key `[bookname, location, library]`, so
//! every holding of a title (optionally at one location) is a single prefix
//! scan.

use std::path::Path;

use futures::Stream;
use futures::StreamExt;
use futures::TryStreamExt;

use crate::book::default_catalog;
use crate::config::StoreConfig;
use crate::error::{ledger_err, scan_err, BookError};
use crate::key::composite;
use crate::key::range::KeyRange;
use crate::ledger::{Ledger, ScopedCursor};
use crate::schema::{Schema, BOOK};

pub mod render;

pub struct BookStore<L> {
    ledger: L,
    schema: Schema,
    config: StoreConfig,
}

impl<L> BookStore<L>
where
    L: Ledger,
{
    pub fn new(ledger: L) -> Self {
        Self::with_config(ledger, StoreConfig::default())
    }

    pub fn with_config(ledger: L, config: StoreConfig) -> Self {
        Self {
            ledger,
            schema: BOOK,
            config,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Writes a book under its composite key, replacing any previous value.
    pub async fn create_book<S>(&self, args: &[S]) -> Result<(), BookError>
    where
        S: AsRef<str>,
    {
        let components: Vec<&str> = self.schema.key_components(args)?;
        let key: Vec<u8> = composite::encode(&components)?;
        let val: Vec<u8> = self.schema.encode(args)?;
        log::debug!("putting a book: {components:?}");
        self.ledger.put_state(key, val).await.map_err(ledger_err)
    }

    /// Writes every record(`createBook` arguments) of a stream; stops at the
    /// first error.
    ///
    /// Returns the number of records written.
    pub async fn put_records<S>(&self, records: S) -> Result<usize, BookError>
    where
        S: Stream<Item = Result<Vec<String>, BookError>>,
    {
        records
            .try_fold(0, |tot, args| async move {
                self.create_book(&args).await?;
                Ok(tot + 1)
            })
            .await
    }

    /// Seeds the built-in catalog, then the configured catalog file (if any).
    ///
    /// Calling this again overwrites the same keys with the same values.
    /// Returns the number of books written.
    pub async fn init_ledger(&self) -> Result<usize, BookError> {
        let seeded: usize = self
            .put_records(futures::stream::iter(default_catalog()).map(|b| Ok(b.into_args())))
            .await?;
        log::info!("seeded {seeded} books");
        match &self.config.catalog {
            None => Ok(seeded),
            Some(p) => {
                let path: &Path = p;
                let imported: usize = crate::catalog::import_path(self, path).await?;
                log::info!("imported {imported} books from {}", path.display());
                Ok(seeded + imported)
            }
        }
    }

    /// Gets the stored bytes of a key as they are.
    ///
    /// Books written by this store are never empty, so an empty value from the
    /// ledger (its answer for an absent key) is reported as `None`.
    pub async fn query_by_key(&self, key: &[u8]) -> Result<Option<Vec<u8>>, BookError> {
        let val: Vec<u8> = self.ledger.get_state(key).await.map_err(ledger_err)?;
        Ok(Some(val).filter(|v| !v.is_empty()))
    }

    /// Point lookup of the book with the full key `components`.
    pub async fn query_book<S>(&self, components: &[S]) -> Result<Option<Vec<u8>>, BookError>
    where
        S: AsRef<str>,
    {
        let key: Vec<u8> = composite::encode(components)?;
        self.query_by_key(&key).await
    }

    /// Gets every book whose key starts with `[leading] + trailing`, as one
    /// JSON array in key order.
    ///
    /// Keys holding an empty value read as absent and are left out.
    pub async fn query_by_prefix<S>(
        &self,
        leading: &str,
        trailing: &[S],
    ) -> Result<Vec<u8>, BookError>
    where
        S: AsRef<str>,
    {
        let components: Vec<&str> = core::iter::once(leading)
            .chain(trailing.iter().map(|s| s.as_ref()))
            .collect();
        log::debug!("querying books by {components:?}");
        let prefix: Vec<u8> = composite::prefix_for(&components)?;
        let range: KeyRange = KeyRange::prefix(prefix.clone());
        let cursor: L::Cursor = self
            .ledger
            .open_range_by_prefix(prefix)
            .await
            .map_err(scan_err)?;
        let values = ScopedCursor::new(cursor).map(|rslt| {
            let (key, val) = rslt.map_err(scan_err)?;
            if !range.contains(&key) {
                return Err(BookError::Scan(format!("key out of range: {key:02x?}")));
            }
            let parts: Vec<String> = composite::decode(&key)?;
            log::debug!("found a book: {parts:?}");
            Ok::<_, BookError>(val)
        });
        render::json_array(values).await
    }
}
