//! Catalog snapshot files
//!
//! Snapshots are named `all_classes_<YYY><S>_<YYYYMMDD>.csv`: a three-digit
//! academic year, a semester digit (1 fall, 2 spring, 3 summer) and the date
//! the data was scraped. A directory usually holds several snapshots per
//! semester; only the newest one of each semester is relevant.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SNAPSHOT_PATTERN: &str = r"^all_classes_(\d{3})([123])_(\d{4})(\d{2})(\d{2})\.csv$";

/// Semester of an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Semester {
    /// 上學期
    Fall,
    /// 下學期
    Spring,
    /// 暑修
    Summer,
}

impl Semester {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Fall),
            "2" => Some(Self::Spring),
            "3" => Some(Self::Summer),
            _ => None,
        }
    }

    /// Single-character label (上 / 下 / 暑)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fall => "上",
            Self::Spring => "下",
            Self::Summer => "暑",
        }
    }
}

/// A recognised catalog snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    /// Full path of the snapshot
    pub path: PathBuf,
    /// File name
    pub name: String,
    /// Academic year (e.g., 113)
    pub academic_year: u32,
    /// Semester
    pub semester: Semester,
    /// Scrape date, `YYYYMMDD`
    pub updated: String,
}

impl DataFile {
    /// Recognise a snapshot file name; `None` when the name does not match
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let pattern = Regex::new(SNAPSHOT_PATTERN).ok()?;
        let caps = pattern.captures(&name)?;

        let academic_year = caps[1].parse().ok()?;
        let semester = Semester::from_code(&caps[2])?;
        let updated = format!("{}{}{}", &caps[3], &caps[4], &caps[5]);

        Some(Self {
            path: path.to_path_buf(),
            name,
            academic_year,
            semester,
            updated,
        })
    }

    /// Human readable label, e.g. `113上 20240715 資料`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{} {} 資料", self.academic_year, self.semester.label(), self.updated)
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Errors while scanning a snapshot directory
#[derive(Debug)]
pub enum DataFileError {
    /// The directory could not be read
    Io(io::Error),
    /// No file in the directory matched the snapshot naming scheme
    NoSnapshots(PathBuf),
}

impl fmt::Display for DataFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read snapshot directory: {e}"),
            Self::NoSnapshots(dir) => {
                write!(f, "No all_classes_*.csv snapshots found in {}", dir.display())
            }
        }
    }
}

impl std::error::Error for DataFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::NoSnapshots(_) => None,
        }
    }
}

impl From<io::Error> for DataFileError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Latest snapshot of every semester found in `dir`, newest semester first
///
/// Within a semester the file name with the greatest date wins.
///
/// # Errors
/// Returns an error if the directory cannot be read or holds no snapshot
pub fn list_snapshots(dir: &Path) -> Result<Vec<DataFile>, DataFileError> {
    let mut latest: BTreeMap<(u32, Semester), DataFile> = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let Some(file) = DataFile::from_path(&entry?.path()) else {
            continue;
        };
        let key = (file.academic_year, file.semester);
        match latest.get(&key) {
            Some(current) if current.name >= file.name => {}
            _ => {
                latest.insert(key, file);
            }
        }
    }

    if latest.is_empty() {
        return Err(DataFileError::NoSnapshots(dir.to_path_buf()));
    }
    Ok(latest.into_values().rev().collect())
}

/// The newest snapshot of the newest semester in `dir`
///
/// # Errors
/// Returns an error if the directory cannot be read or holds no snapshot
pub fn latest_snapshot(dir: &Path) -> Result<DataFile, DataFileError> {
    list_snapshots(dir)?
        .into_iter()
        .next()
        .ok_or_else(|| DataFileError::NoSnapshots(dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_snapshot_name() {
        let file = DataFile::from_path(Path::new("data/all_classes_1131_20240715.csv")).unwrap();
        assert_eq!(file.academic_year, 113);
        assert_eq!(file.semester, Semester::Fall);
        assert_eq!(file.updated, "20240715");
        assert_eq!(file.label(), "113上 20240715 資料");
    }

    #[test]
    fn test_rejects_other_names() {
        assert!(DataFile::from_path(Path::new("all_classes_1134_20240715.csv")).is_none());
        assert!(DataFile::from_path(Path::new("all_classes_1131_2024071.csv")).is_none());
        assert!(DataFile::from_path(Path::new("courses.csv")).is_none());
        assert!(DataFile::from_path(Path::new("all_classes_1131_20240715.csv.bak")).is_none());
        assert!(DataFile::from_path(Path::new("old_all_classes_1131_20240715.csv")).is_none());
    }

    #[test]
    fn test_latest_per_semester() {
        let dir = TempDir::new().unwrap();
        for name in [
            "all_classes_1131_20240701.csv",
            "all_classes_1131_20240715.csv",
            "all_classes_1122_20240210.csv",
            "all_classes_1133_20240620.csv",
            "all_classes_1131_20240801.csv.bak",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), "Number,Name\n").unwrap();
        }

        let snapshots = list_snapshots(dir.path()).unwrap();
        let names: Vec<&str> = snapshots.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "all_classes_1133_20240620.csv",
                "all_classes_1131_20240715.csv",
                "all_classes_1122_20240210.csv",
            ]
        );
        assert_eq!(latest_snapshot(dir.path()).unwrap().semester, Semester::Summer);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            list_snapshots(dir.path()),
            Err(DataFileError::NoSnapshots(_))
        ));
    }
}
