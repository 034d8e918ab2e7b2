use std::io;
use std::path::Path;
use std::pin::Pin;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use tokio_stream::wrappers::LinesStream;
use tokio_stream::Stream;

pub type Lines = Pin<Box<dyn Stream<Item = Result<String, io::Error>> + Send>>;

pub fn read2lines<R>(r: R) -> Lines
where
    R: AsyncBufRead + Send + Unpin + 'static,
{
    Box::pin(LinesStream::new(r.lines()))
}

/// Gets the lines of a plain text file.
pub async fn path2lines<P>(p: P) -> Result<Lines, io::Error>
where
    P: AsRef<Path>,
{
    let f: File = File::open(p).await?;
    Ok(read2lines(BufReader::new(f)))
}
