//! Record file storage.
//!
//! # Responsibilities
//! - Own the POST and PATCH sequence counters
//! - Reserve a numbered file slot per request
//! - Write rendered records into the record directory

use std::path::{Path, PathBuf};

use crate::recording::counter::SequenceCounter;
use crate::recording::error::RecordError;
use crate::recording::record::{MissingResponse, RecordKind, RequestRecord};

/// A reserved record file: the kind, its sequence number and target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSlot {
    pub kind: RecordKind,
    pub seq: u64,
    pub path: PathBuf,
}

/// Writes numbered record files into one directory.
#[derive(Debug)]
pub struct RecordStore {
    dir: PathBuf,
    post: SequenceCounter,
    patch: SequenceCounter,
    missing_response: MissingResponse,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>, missing_response: MissingResponse) -> Self {
        Self {
            dir: dir.into(),
            post: SequenceCounter::new(),
            patch: SequenceCounter::new(),
            missing_response,
        }
    }

    /// Directory record files are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn counter(&self, kind: RecordKind) -> &SequenceCounter {
        match kind {
            RecordKind::Post => &self.post,
            RecordKind::Patch => &self.patch,
        }
    }

    /// Reserve the next sequence number for `kind`.
    pub fn reserve(&self, kind: RecordKind) -> RecordSlot {
        let seq = self.counter(kind).next();
        RecordSlot {
            kind,
            seq,
            path: self.dir.join(kind.file_name(seq)),
        }
    }

    /// Number of slots reserved so far for `kind`.
    pub fn reserved(&self, kind: RecordKind) -> u64 {
        self.counter(kind).peek()
    }

    /// Write `record` into `slot`, replacing any existing file.
    pub async fn write(
        &self,
        slot: &RecordSlot,
        record: &RequestRecord,
    ) -> Result<(), RecordError> {
        let contents = record.to_json(self.missing_response)?;

        tracing::info!(
            file = %slot.path.display(),
            seq = slot.seq,
            kind = %slot.kind,
            "writing to"
        );

        tokio::fs::write(&slot.path, contents)
            .await
            .map_err(|source| RecordError::Write {
                path: slot.path.clone(),
                source,
            })
    }
}
