//! Line reading for procfs-style files.
//!
//! This never fails; a missing or unreadable file is logged (if asked) and
//! treated as empty.

use std::{
    fs,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Reads every line of `path`. Returns an empty list if the file can't be
/// read. If `report_error` is set, failures are logged.
pub fn read_lines(path: &Path, report_error: bool) -> Vec<String> {
    match fs::File::open(path) {
        Ok(file) => {
            let mut lines = Vec::new();
            for line in BufReader::new(file).lines() {
                match line {
                    Ok(line) => lines.push(line),
                    Err(err) => {
                        report(path, &err, report_error);
                        return Vec::new();
                    }
                }
            }
            lines
        }
        Err(err) => {
            report(path, &err, report_error);
            Vec::new()
        }
    }
}

#[allow(unused_variables)]
fn report(path: &Path, err: &io::Error, report_error: bool) {
    if !report_error {
        return;
    }

    if err.kind() == io::ErrorKind::NotFound {
        crate::warn!("File not found: {}", path.display());
    } else {
        crate::error!("Error reading file {}: {err}", path.display());
    }
}
