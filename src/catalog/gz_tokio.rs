use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::BufReader;

use async_compression::tokio::bufread::GzipDecoder;

use crate::catalog::lines::{read2lines, Lines};

/// Gets the lines of a gzip compressed file.
pub async fn path2lines<P>(p: P) -> Result<Lines, io::Error>
where
    P: AsRef<Path>,
{
    let f: File = File::open(p).await?;
    let br: BufReader<File> = BufReader::new(f);
    let gr: GzipDecoder<BufReader<File>> = GzipDecoder::new(br);
    Ok(read2lines(BufReader::new(gr)))
}
