//! Input directory scanner

use crate::error::{Error, Result};
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An input file and the period identifier taken from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Full path of the input file
    pub path: PathBuf,
    /// File name with the input suffix removed, e.g. `2024-01`
    pub period: String,
}

/// Iterator over the input files of one directory, in file-name order
///
/// Created by [`discover`]. Directory-level failures are reported by
/// `discover` itself; items that fail here concern a single entry only.
#[derive(Debug)]
pub struct InputFiles {
    suffix: String,
    entries: std::vec::IntoIter<std::io::Result<DirEntry>>,
    dir: PathBuf,
}

impl Iterator for InputFiles {
    type Item = Result<DiscoveredFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(Error::FileRead {
                        path: self.dir.clone(),
                        source,
                    }))
                }
            };

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                debug!("Skipping non UTF-8 file name {:?}", file_name);
                continue;
            };

            if !name.ends_with(&self.suffix) {
                continue;
            }

            let Some(period) = extract_period(name, &self.suffix) else {
                warn!("Skipping '{name}': no period identifier before the suffix");
                continue;
            };

            let path = entry.path();
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => {
                    debug!("Skipping '{}': not a regular file", path.display());
                    continue;
                }
                Err(source) => return Some(Err(Error::FileRead { path, source })),
            }

            return Some(Ok(DiscoveredFile {
                period: period.to_string(),
                path,
            }));
        }
    }
}

/// Scan `dir` for files whose name ends with `suffix`
///
/// Fails when the directory does not exist or cannot be listed; both are
/// fatal for a run. Files are yielded in lexical file-name order so repeated
/// runs process them identically.
pub fn discover(dir: impl AsRef<Path>, suffix: &str) -> Result<InputFiles> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(Error::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut entries: Vec<std::io::Result<DirEntry>> = fs::read_dir(dir)
        .map_err(|e| Error::discovery(dir, e.to_string()))?
        .collect();

    // Entries that failed to list carry no name; report them last.
    entries.sort_by(|a, b| match (a, b) {
        (Ok(a), Ok(b)) => a.file_name().cmp(&b.file_name()),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => std::cmp::Ordering::Equal,
    });

    debug!("Scanning {} entries in {}", entries.len(), dir.display());

    Ok(InputFiles {
        suffix: suffix.to_string(),
        entries: entries.into_iter(),
        dir: dir.to_path_buf(),
    })
}

/// Period identifier of `file_name`: everything before `suffix`
///
/// Returns `None` when the name does not end with the suffix or nothing
/// precedes it.
pub fn extract_period<'a>(file_name: &'a str, suffix: &str) -> Option<&'a str> {
    file_name
        .strip_suffix(suffix)
        .filter(|period| !period.is_empty())
}
