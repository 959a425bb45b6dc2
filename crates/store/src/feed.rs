//! Transaction feed: one conversion request per text line.
//!
//! Lines are yielded in file order with their 1-based number. Blank lines
//! are yielded as well; they tokenize to no fields and the pipeline rejects
//! them like any other malformed request.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use fxwallet_core::settlement::RawRequest;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A request read from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// Tokenized request.
    pub request: RawRequest,
}

/// Iterator over the requests of a transaction source.
#[derive(Debug)]
pub struct TransactionFeed<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl TransactionFeed<BufReader<File>> {
    /// Opens a transactions file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        debug!(path = %path.display(), "Opened transaction feed");
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> TransactionFeed<R> {
    /// Reads requests from any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TransactionFeed<R> {
    type Item = StoreResult<FeedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;
        let line_number = self.line_number;

        Some(
            line.map(|text| FeedLine {
                line_number,
                request: RawRequest::tokenize(&text),
            })
            .map_err(|source| StoreError::Feed {
                line_number,
                source,
            }),
        )
    }
}
