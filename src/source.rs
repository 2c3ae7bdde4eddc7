use std::collections::hash_map::Entry;
use std::collections::HashMap;

use memchr::memchr_iter;

use crate::error::SourceError;
use crate::token::{FileId, SourceLocation};

/// Bytes appended past the logical end of every buffer.
///
/// The trailing blank flushes a pending word or number, and the `#` leaves
/// the machine parked in a comment, so the driver never needs an
/// end-of-input special case.
pub const SENTINEL: &str = " #";

/// Immutable source text plus a line-start index.
#[derive(Debug, Clone)]
pub struct Source {
    file: FileId,
    /// Text followed by [`SENTINEL`].
    data: String,
    len: usize,
    /// Offset of the first byte of every line after the first.
    line_starts: Vec<usize>,
}

impl Source {
    pub fn new(file: impl Into<FileId>, text: impl Into<String>) -> Self {
        let mut data = text.into();
        let len = data.len();
        let line_starts = memchr_iter(b'\n', data.as_bytes())
            .map(|i| i + 1)
            .collect();
        data.push_str(SENTINEL);
        Self {
            file: file.into(),
            data,
            len,
            line_starts,
        }
    }

    #[inline]
    pub fn file(&self) -> &FileId {
        &self.file
    }

    /// Logical text, without the sentinel.
    #[inline]
    pub fn text(&self) -> &str {
        &self.data[..self.len]
    }

    /// Logical length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte at `index`. Indices up to the end of the sentinel are valid.
    #[inline]
    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.data.as_bytes().get(index).copied()
    }

    /// Text plus sentinel, as fed to the state machine.
    #[inline]
    pub(crate) fn padded_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Logical text of `length` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, length: usize) -> Result<&str, SourceError> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= self.len)
            .ok_or(SourceError::RangeOutOfBounds {
                offset,
                length,
                len: self.len,
            })?;
        self.data
            .get(offset..end)
            .ok_or(SourceError::RangeOutOfBounds {
                offset,
                length,
                len: self.len,
            })
    }

    /// Character starting at `offset`, if `offset` is on a char boundary.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.data.get(offset..)?.chars().next()
    }

    /// 1-indexed (line, column) of `offset`. Columns count bytes.
    pub fn line_and_col(&self, offset: usize) -> Result<(usize, usize), SourceError> {
        if offset >= self.len {
            return Err(SourceError::OffsetOutOfRange {
                offset,
                len: self.len,
            });
        }
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = match line {
            0 => 0,
            n => self.line_starts[n - 1],
        };
        Ok((line + 1, offset - line_start + 1))
    }

    /// Number of lines, counting a trailing partial line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len() + 1
    }
}

/// Registry of sources keyed by file id.
///
/// Inserting an id that is already present replaces its source.
#[derive(Debug, Default)]
pub struct SourceManager {
    sources: HashMap<FileId, Source>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `text` under `file`, replacing any previous source, and
    /// returns the stored buffer.
    pub fn upsert(&mut self, file: impl Into<FileId>, text: impl Into<String>) -> &Source {
        let source = Source::new(file, text);
        match self.sources.entry(source.file().clone()) {
            Entry::Occupied(mut slot) => {
                tracing::debug!(file = %slot.key(), "replaced source");
                slot.insert(source);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(source),
        }
    }

    pub fn get(&self, file: &FileId) -> Result<&Source, SourceError> {
        self.sources
            .get(file)
            .ok_or_else(|| SourceError::UnknownFile(file.clone()))
    }

    pub fn contains(&self, file: &FileId) -> bool {
        self.sources.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    /// Raw text a location points at.
    pub fn code_slice(&self, loc: &SourceLocation) -> Result<&str, SourceError> {
        self.get(&loc.file)?.slice(loc.offset, loc.length)
    }

    pub fn line_and_col(
        &self,
        file: &FileId,
        offset: usize,
    ) -> Result<(usize, usize), SourceError> {
        self.get(file)?.line_and_col(offset)
    }
}
