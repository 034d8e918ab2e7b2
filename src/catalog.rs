//! Bulk import of books from JSON lines (one book object per line).
//!
//! Lines are checked against the store's schema. Files ending with `.gz` are
//! read through a gzip decoder.

use std::io;
use std::path::Path;

use futures::Stream;
use futures::StreamExt;

use crate::error::BookError;
use crate::ledger::Ledger;
use crate::schema::Schema;
use crate::store::BookStore;

pub mod lines;

#[cfg(feature = "gzip_tokio_async")]
pub mod gz_tokio;

/// Parses one catalog line into record arguments; blank lines give `None`.
pub fn parse_line(
    schema: &Schema,
    lineno: usize,
    line: &str,
) -> Result<Option<Vec<String>>, BookError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let catalog_err = |e: String| BookError::Catalog(format!("line {lineno}: {e}"));
    let v: serde_json::Value =
        serde_json::from_str(line).map_err(|e| catalog_err(e.to_string()))?;
    schema
        .args_from_json(v)
        .map(Some)
        .map_err(|e| catalog_err(e.to_string()))
}

/// Writes the books of the lines; stops at the first bad line.
pub async fn import_lines<L, S>(store: &BookStore<L>, lines: S) -> Result<usize, BookError>
where
    L: Ledger,
    S: Stream<Item = Result<String, io::Error>>,
{
    let schema: Schema = *store.schema();
    let records = lines.enumerate().filter_map(|pair| async move {
        let (ix, rslt) = pair;
        let lineno: usize = ix + 1;
        rslt.map_err(|e| BookError::Catalog(format!("line {lineno}: {e}")))
            .and_then(|line| parse_line(&schema, lineno, &line))
            .transpose()
    });
    store.put_records(records).await
}

fn is_gzip(p: &Path) -> bool {
    p.extension().map(|ext| ext == "gz").unwrap_or(false)
}

async fn path2lines(p: &Path) -> Result<lines::Lines, io::Error> {
    match is_gzip(p) {
        #[cfg(feature = "gzip_tokio_async")]
        true => gz_tokio::path2lines(p).await,
        #[cfg(not(feature = "gzip_tokio_async"))]
        true => Err(io::Error::new(io::ErrorKind::Unsupported, "gzip support disabled")),
        false => lines::path2lines(p).await,
    }
}

/// Imports a catalog file.
pub async fn import_path<L>(store: &BookStore<L>, p: &Path) -> Result<usize, BookError>
where
    L: Ledger,
{
    let lines = path2lines(p)
        .await
        .map_err(|e| BookError::Catalog(format!("unable to open {}: {e}", p.display())))?;
    import_lines(store, lines).await
}
