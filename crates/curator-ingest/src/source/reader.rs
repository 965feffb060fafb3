//! Streaming CSV reader over the import source.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use ::csv::{Reader, ReaderBuilder, StringRecordsIter};
use curator_model::Row;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported. The file position
/// is rewound to the start afterwards.
pub fn validate_encoding(file: &mut File, path: &Path) -> Result<()> {
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.seek(SeekFrom::Start(0))
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    if bytes_read == 2 {
        // UTF-16 LE BOM
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

/// An open CSV source whose first line is the header.
///
/// The file handle is released when the source is dropped.
pub struct CsvSource {
    path: PathBuf,
    reader: Reader<File>,
    headers: Vec<String>,
}

impl CsvSource {
    /// Opens `path` and reads its header line.
    ///
    /// A file with no content yields a source with no headers and no rows.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;
        validate_encoding(&mut file, path)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IngestError::HeaderParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                if idx == 0 {
                    header.trim_start_matches(UTF8_BOM).to_string()
                } else {
                    header.to_string()
                }
            })
            .collect();

        if headers.is_empty() {
            tracing::warn!(path = %path.display(), "source has no header line");
        } else {
            tracing::debug!(
                path = %path.display(),
                columns = headers.len(),
                "opened CSV source"
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            reader,
            headers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw header names in file order, exactly as written.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Iterates data lines in file order. Blank lines are not counted.
    pub fn rows(&mut self) -> Rows<'_> {
        Rows {
            records: self.reader.records(),
            headers: &self.headers,
            path: &self.path,
            number: 0,
            finished: false,
        }
    }
}

/// Iterator over the data lines of a [`CsvSource`].
///
/// Yields [`IngestError::MalformedRecord`] for a line that cannot be decoded
/// and keeps going; stops after the first fatal error.
pub struct Rows<'a> {
    records: StringRecordsIter<'a, File>,
    headers: &'a [String],
    path: &'a Path,
    number: usize,
    finished: bool,
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let record = self.records.next()?;
        self.number += 1;
        match record {
            Ok(record) => {
                let cells: Vec<&str> = record.iter().collect();
                Some(Ok(Row::from_record(self.number, self.headers, &cells)))
            }
            Err(err) if err.is_io_error() => {
                self.finished = true;
                Some(Err(IngestError::RecordRead {
                    path: self.path.to_path_buf(),
                    row: self.number,
                    message: err.to_string(),
                }))
            }
            Err(err) => Some(Err(IngestError::MalformedRecord {
                row: self.number,
                message: err.to_string(),
            })),
        }
    }
}
