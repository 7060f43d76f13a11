// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum JobError {
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Format(String),
    MissingSource(PathBuf),
    MissingFields {
        missing: Vec<String>,
        available: Vec<String>,
    },
}

// These allow conversion to JobError, so that '?' works across the pipeline.

impl From<io::Error> for JobError {
    fn from(e: io::Error) -> Self {
        JobError::Io(e)
    }
}

impl From<csv::Error> for JobError {
    fn from(e: csv::Error) -> Self {
        JobError::Csv(e)
    }
}

impl From<serde_json::Error> for JobError {
    fn from(e: serde_json::Error) -> Self {
        JobError::Json(e)
    }
}

impl From<String> for JobError {
    fn from(s: String) -> Self {
        JobError::Format(s)
    }
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::Io(e) => write!(f, "I/O error: {}", e),
            JobError::Csv(e) => write!(f, "Table error: {}", e),
            JobError::Json(e) => write!(f, "JSON error: {}", e),
            JobError::Format(msg) => write!(f, "Format error: {}", msg),
            JobError::MissingSource(path) => write!(f, "source missing: {}", path.display()),
            JobError::MissingFields { missing, available } => write!(
                f,
                "missing fields {:?} (available: {:?})",
                missing, available
            ),
        }
    }
}

impl std::error::Error for JobError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = JobError::MissingFields {
            missing: vec![String::from("guide_id")],
            available: vec![String::from("guide_seq"), String::from("full_target_sequence")],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"guide_id\""));
        assert!(msg.contains("available: [\"guide_seq\", \"full_target_sequence\"]"));
    }

    #[test]
    fn test_io_conversion() {
        let err: JobError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, JobError::Io(_)));
    }
}
