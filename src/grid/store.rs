//! Grid data file I/O
//!
//! Reads and writes the tab-delimited grid file using the csv crate:
//!
//! ```text
//! \t0\t1\t2
//! 0\t0\t1\t0
//! 1\t1\t0\t0
//! ```
//!
//! The header row carries column labels and each data row starts with its row
//! index. Loading always produces a grid of the requested size: narrower or
//! shorter sources are zero-padded, wider or taller ones are truncated.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use super::model::{CellGrid, CellPos, GridSize};

/// Error type for grid data loading and saving
#[derive(Debug)]
pub enum GridDataError {
    /// File could not be opened, read or written
    Io { path: PathBuf, source: io::Error },
    /// The temporary file could not be renamed over the target
    Persist { path: PathBuf, source: io::Error },
    /// A row the CSV reader could not decode
    Record { line: Option<u64>, message: String },
    /// A cell token that is not `0` or `1`
    InvalidCell {
        line: Option<u64>,
        column: usize,
        token: String,
    },
}

impl GridDataError {
    /// 1-based file line the error was found on, if known
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Record { line, .. } | Self::InvalidCell { line, .. } => *line,
            Self::Io { .. } | Self::Persist { .. } => None,
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Display for GridDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Persist { path, source } => {
                write!(f, "could not replace {}: {}", path.display(), source)
            }
            Self::Record {
                line: Some(line),
                message,
            } => write!(f, "grid data error at line {}: {}", line, message),
            Self::Record {
                line: None,
                message,
            } => write!(f, "grid data error: {}", message),
            Self::InvalidCell {
                line,
                column,
                token,
            } => {
                write!(f, "invalid cell value {:?} in column {}", token, column)?;
                if let Some(line) = line {
                    write!(f, " at line {}", line)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GridDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Persist { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<csv::Error> for GridDataError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        Self::Record {
            line,
            message: err.to_string(),
        }
    }
}

/// Result of loading a grid file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(CellGrid),
    /// The file does not exist; carries its base name for the user notice
    Missing { file_name: String },
}

/// Grid file bound to a path
#[derive(Debug, Clone)]
pub struct GridDataStore {
    path: PathBuf,
}

impl GridDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the grid file, as shown to the user
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Load the grid, normalized to `required`
    ///
    /// A missing file is not an error: the caller gets the file name back and
    /// decides how to initialize the grid.
    pub fn load(&self, required: GridSize) -> Result<LoadOutcome, GridDataError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!("Grid file {} not found", self.path.display());
                return Ok(LoadOutcome::Missing {
                    file_name: self.file_name(),
                });
            }
            Err(err) => return Err(GridDataError::io(&self.path, err)),
        };

        let grid = read_grid(BufReader::new(file), required)?;
        tracing::info!(
            "Loaded grid {} ({}x{}, {} alive)",
            self.path.display(),
            grid.cols(),
            grid.rows(),
            grid.alive_count()
        );
        Ok(LoadOutcome::Loaded(grid))
    }

    /// Write the grid, replacing the file atomically
    pub fn save(&self, grid: &CellGrid) -> Result<(), GridDataError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| GridDataError::io(dir, e))?;
        write_grid(&mut temp, grid).map_err(|e| GridDataError::io(temp.path(), e))?;
        // Keep the existing file's access rights across the rename
        match fs::metadata(&self.path) {
            Ok(metadata) => temp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| GridDataError::io(temp.path(), e))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(GridDataError::io(&self.path, err)),
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| GridDataError::io(temp.path(), e))?;
        temp.persist(&self.path)
            .map_err(|e| GridDataError::Persist {
                path: self.path.clone(),
                source: e.error,
            })?;

        tracing::info!(
            "Saved grid {} ({}x{})",
            self.path.display(),
            grid.cols(),
            grid.rows()
        );
        Ok(())
    }
}

/// Parse grid data from any reader, normalized to `required`
pub fn read_grid<R: Read>(reader: R, required: GridSize) -> Result<CellGrid, GridDataError> {
    let mut grid = CellGrid::new(required);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records();

    let header = match records.next() {
        Some(header) => header?,
        None => {
            tracing::debug!("Grid data is empty, using a blank grid");
            return Ok(grid);
        }
    };
    let source_cols = header.len().saturating_sub(1);
    tracing::debug!(
        "Grid data has {} columns, {} required",
        source_cols,
        required.cols
    );

    let mut source_rows = 0;
    for (row, result) in records.enumerate() {
        // Rows past the required height are never read
        if row >= required.rows {
            break;
        }
        let record = result?;
        let line = record.position().map(|pos| pos.line());
        source_rows += 1;

        for (col, token) in record.iter().skip(1).enumerate() {
            let alive = parse_cell(token).ok_or_else(|| GridDataError::InvalidCell {
                line,
                column: col + 1,
                token: token.to_string(),
            })?;
            if col < required.cols {
                grid.set(CellPos::new(col, row), alive);
            }
        }
    }

    if source_rows < required.rows {
        tracing::debug!(
            "Grid data has {} rows, padding to {}",
            source_rows,
            required.rows
        );
    }
    Ok(grid)
}

fn parse_cell(token: &str) -> Option<bool> {
    match token.trim().parse::<i64>().ok()? {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// Serialize grid data in the tab-delimited layout
pub fn write_grid<W: Write>(writer: W, grid: &CellGrid) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let header = std::iter::once(String::new()).chain((0..grid.cols()).map(|c| c.to_string()));
    writer.write_record(header)?;

    for (index, row) in grid.iter_rows().enumerate() {
        let fields = std::iter::once(index.to_string())
            .chain(row.iter().map(|&alive| if alive { "1" } else { "0" }.to_string()));
        writer.write_record(fields)?;
    }

    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str, cols: usize, rows: usize) -> Result<CellGrid, GridDataError> {
        read_grid(text.as_bytes(), GridSize::new(cols, rows))
    }

    #[test]
    fn test_write_layout() {
        let grid = CellGrid::from_rows(&[[0u8, 1, 0], [1, 0, 0]]);
        let mut out = Vec::new();
        write_grid(&mut out, &grid).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\t0\t1\t2\n0\t0\t1\t0\n1\t1\t0\t0\n"
        );
    }

    #[test]
    fn test_read_exact() {
        let grid = read("\t0\t1\n0\t1\t0\n1\t0\t1\n", 2, 2).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_read_accepts_crlf() {
        let grid = read("\t0\t1\r\n0\t1\t1\r\n1\t0\t1\r\n", 2, 2).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_read_empty_is_blank() {
        let grid = read("", 3, 2).unwrap();
        assert_eq!(grid.size(), GridSize::new(3, 2));
        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn test_read_header_only() {
        let grid = read("\t0\t1\n", 2, 3).unwrap();
        assert_eq!(grid.alive_count(), 0);
        assert_eq!(grid.rows(), 3);
    }

    #[test]
    fn test_read_rejects_non_integer() {
        let err = read("\t0\t1\n0\t1\tx\n", 2, 1).unwrap_err();
        match err {
            GridDataError::InvalidCell {
                line,
                column,
                ref token,
            } => {
                assert_eq!(line, Some(2));
                assert_eq!(column, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_rejects_out_of_range_integer() {
        let err = read("\t0\n0\t2\n", 1, 1).unwrap_err();
        assert!(matches!(err, GridDataError::InvalidCell { .. }));
        assert!(err.to_string().contains("\"2\""));
    }

    #[test]
    fn test_rows_past_required_are_not_validated() {
        // Only the first row is read; the bad token below it is never parsed
        let grid = read("\t0\n0\t1\n1\tbad\n", 1, 1).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1]]);
    }

    #[test]
    fn test_short_row_is_padded() {
        let grid = read("\t0\t1\t2\n0\t1\n", 3, 1).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 0, 0]]);
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let grid = read("\t0\t1\n0\t 1\t0 \n", 2, 1).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 0]]);
    }

    #[test]
    fn test_error_line_accessor() {
        let err = read("\t0\n0\t1\n1\t7\n", 1, 2).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }
}
