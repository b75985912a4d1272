//! Bounded file reading for the batch layer.
//!
//! The core analyzers never touch the filesystem; this module gives the
//! batch driver a size-checked read so oversized artifacts surface as an
//! explicit error before any analysis runs.

use crate::error::{BinsiftError, Result};
use crate::triage::config::IoLimits;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read an artifact, enforcing the configured size limits.
///
/// Files larger than `max_file_size` are rejected outright; otherwise at
/// most `max_read_bytes` are read.
pub fn read_artifact(path: &Path, limits: &IoLimits) -> Result<Vec<u8>> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > limits.max_file_size {
        return Err(BinsiftError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            limit: limits.max_file_size,
        });
    }

    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(meta.len().min(limits.max_read_bytes) as usize);
    file.take(limits.max_read_bytes).read_to_end(&mut buf)?;
    debug!(path = %path.display(), bytes = buf.len(), "artifact read");
    Ok(buf)
}
