use crate::model::attendance::AttendanceRecord;
use chrono::{Local, NaiveDateTime};
use csv::StringRecord;
use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Header row every store file starts with.
pub const HEADER: [&str; 3] = ["Name", "Date", "Time"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Name cannot be empty!")]
    EmptyName,

    /// The backing file does not exist yet. Readers treat this as "no data".
    #[error("attendance file not found at {}", .path.display())]
    Absent { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(csv::Error),
}

/// Append-only attendance log backed by a single CSV file.
///
/// Every operation opens and closes the file on its own; nothing is cached
/// between calls. Concurrent appenders are not serialized.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Startup warm-up: create the file with its header if missing.
    /// Failures are logged and otherwise ignored.
    pub fn ensure_initialized(&self) {
        match self.initialize() {
            Ok(true) => info!(path = %self.path.display(), "Attendance file created with headers"),
            Ok(false) => info!(path = %self.path.display(), "Attendance file already exists"),
            Err(e) => error!(error = %e, "Failed to create attendance file"),
        }
    }

    /// Returns `true` when the file was created by this call.
    pub fn initialize(&self) -> Result<bool, StoreError> {
        // create_new never truncates a file that already exists
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut writer = csv::Writer::from_writer(file);
        writer
            .write_record(HEADER)
            .map_err(|e| self.csv_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;
        Ok(true)
    }

    /// Record `name` at the current local time.
    pub fn append(&self, name: &str) -> Result<AttendanceRecord, StoreError> {
        self.append_at(name, Local::now().naive_local())
    }

    pub fn append_at(
        &self,
        name: &str,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let record = AttendanceRecord {
            name: name.to_string(),
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
        };

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let needs_header = file.metadata().map_err(|e| self.io_error(e))?.len() == 0;

        // a hand-edited file may lack the final newline
        if !needs_header && !ends_with_newline(&mut file).map_err(|e| self.io_error(e))? {
            file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }

        let mut writer = csv::Writer::from_writer(file);
        if needs_header {
            warn!(path = %self.path.display(), "Attendance file was missing, writing headers first");
            writer
                .write_record(HEADER)
                .map_err(|e| self.csv_error(e))?;
        }
        writer
            .write_record([&record.name, &record.date, &record.time])
            .map_err(|e| self.csv_error(e))?;
        writer.flush().map_err(|e| self.io_error(e))?;

        debug!(name = %record.name, date = %record.date, time = %record.time, "Attendance appended");
        Ok(record)
    }

    /// All records in file order, header excluded.
    ///
    /// Rows without exactly three fields are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Absent {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| self.csv_error(e))?;
            match to_record(&row) {
                Some(record) => records.push(record),
                None => warn!(
                    line = row.position().map(|p| p.line()),
                    fields = row.len(),
                    "Skipping malformed attendance row"
                ),
            }
        }

        Ok(records)
    }

    /// OS failures surfacing through the csv reader or writer are reported as `Io`.
    fn csv_error(&self, e: csv::Error) -> StoreError {
        match e.kind() {
            csv::ErrorKind::Io(source) => {
                self.io_error(io::Error::new(source.kind(), source.to_string()))
            }
            _ => StoreError::Csv(e),
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn to_record(row: &StringRecord) -> Option<AttendanceRecord> {
    if row.len() != HEADER.len() {
        return None;
    }

    Some(AttendanceRecord {
        name: row[0].to_string(),
        date: row[1].to_string(),
        time: row[2].to_string(),
    })
}
