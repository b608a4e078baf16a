//! Run directory persistence: write/read/verify [`RunArtifacts`] on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   report.json    canonical JSON
//!   policy.json    canonical JSON
//!   trace.json     canonical JSON, only if the run recorded a trace
//!   digests.txt    one `name=sha256:...` line per artifact, sorted
//! ```
//!
//! Reading is fail-closed: a missing file, non-canonical JSON, or a digest
//! that does not match the file contents is an error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use waypoint_kernel::proof::canon::canonical_json_bytes;
use waypoint_kernel::proof::hash::{
    canonical_hash, ContentHash, DOMAIN_SEARCH_POLICY, DOMAIN_SEARCH_REPORT, DOMAIN_SEARCH_TRACE,
};

use crate::runner::RunArtifacts;

const REPORT_FILENAME: &str = "report.json";
const POLICY_FILENAME: &str = "policy.json";
const TRACE_FILENAME: &str = "trace.json";
const DIGESTS_FILENAME: &str = "digests.txt";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunDirError {
    #[error("I/O error on {path}: {detail}")]
    Io { path: String, detail: String },
    #[error("missing file {filename}")]
    Missing { filename: String },
    #[error("{filename} is not canonical JSON: {detail}")]
    NonCanonical { filename: String, detail: String },
    #[error("malformed digests.txt line {line:?}")]
    MalformedDigestLine { line: String },
    #[error("digest mismatch for {name}: stored {stored}, recomputed {recomputed}")]
    DigestMismatch {
        name: String,
        stored: String,
        recomputed: String,
    },
}

fn io_error(path: &Path, e: &std::io::Error) -> RunDirError {
    RunDirError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    }
}

/// Write `artifacts` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`RunDirError::Io`] if the directory or a file cannot be written.
pub fn write_run_dir(artifacts: &RunArtifacts, dir: &Path) -> Result<(), RunDirError> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, &e))?;

    let mut digests = BTreeMap::new();
    let mut write = |filename: &str, bytes: &[u8], digest: &ContentHash| {
        let path = dir.join(filename);
        fs::write(&path, bytes).map_err(|e| io_error(&path, &e))?;
        digests.insert(filename.to_owned(), digest.as_str().to_owned());
        Ok::<(), RunDirError>(())
    };
    write(REPORT_FILENAME, &artifacts.report_json, &artifacts.report_digest)?;
    write(POLICY_FILENAME, &artifacts.policy_json, &artifacts.policy_digest)?;
    if let (Some(bytes), Some(digest)) = (&artifacts.trace_json, &artifacts.trace_digest) {
        write(TRACE_FILENAME, bytes, digest)?;
    }

    let listing: String = digests
        .iter()
        .map(|(name, digest)| format!("{name}={digest}\n"))
        .collect();
    let path = dir.join(DIGESTS_FILENAME);
    fs::write(&path, listing).map_err(|e| io_error(&path, &e))
}

/// Read and verify a run directory written by [`write_run_dir`].
///
/// # Errors
///
/// Returns [`RunDirError`] if a file is missing or unreadable, is not
/// canonical JSON, or does not match its stored digest.
pub fn read_run_dir(dir: &Path) -> Result<RunArtifacts, RunDirError> {
    let stored = read_digests(dir)?;

    let report_json = read_canonical(dir, REPORT_FILENAME)?;
    let report_digest = verify(&stored, REPORT_FILENAME, DOMAIN_SEARCH_REPORT, &report_json)?;
    let policy_json = read_canonical(dir, POLICY_FILENAME)?;
    let policy_digest = verify(&stored, POLICY_FILENAME, DOMAIN_SEARCH_POLICY, &policy_json)?;

    let (trace_json, trace_digest) = if stored.contains_key(TRACE_FILENAME) {
        let bytes = read_canonical(dir, TRACE_FILENAME)?;
        let digest = verify(&stored, TRACE_FILENAME, DOMAIN_SEARCH_TRACE, &bytes)?;
        (Some(bytes), Some(digest))
    } else {
        (None, None)
    };

    Ok(RunArtifacts {
        report_json,
        report_digest,
        policy_json,
        policy_digest,
        trace_json,
        trace_digest,
    })
}

fn read_file(dir: &Path, filename: &str) -> Result<Vec<u8>, RunDirError> {
    let path = dir.join(filename);
    fs::read(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => RunDirError::Missing {
            filename: filename.to_owned(),
        },
        _ => io_error(&path, &e),
    })
}

fn read_digests(dir: &Path) -> Result<BTreeMap<String, String>, RunDirError> {
    let raw = read_file(dir, DIGESTS_FILENAME)?;
    let text = String::from_utf8_lossy(&raw);
    text.lines()
        .filter(|l| !l.is_empty())
        .map(|line| {
            line.split_once('=')
                .map(|(name, digest)| (name.to_owned(), digest.to_owned()))
                .ok_or_else(|| RunDirError::MalformedDigestLine {
                    line: line.to_owned(),
                })
        })
        .collect()
}

fn read_canonical(dir: &Path, filename: &str) -> Result<Vec<u8>, RunDirError> {
    let bytes = read_file(dir, filename)?;
    let non_canonical = |detail: String| RunDirError::NonCanonical {
        filename: filename.to_owned(),
        detail,
    };
    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| non_canonical(e.to_string()))?;
    let recanon = canonical_json_bytes(&value).map_err(|e| non_canonical(e.to_string()))?;
    if recanon != bytes {
        return Err(non_canonical("bytes differ from canonical form".to_owned()));
    }
    Ok(bytes)
}

fn verify(
    stored: &BTreeMap<String, String>,
    filename: &str,
    domain: &[u8],
    bytes: &[u8],
) -> Result<ContentHash, RunDirError> {
    let recomputed = canonical_hash(domain, bytes);
    let stored = stored.get(filename).ok_or_else(|| RunDirError::Missing {
        filename: format!("{DIGESTS_FILENAME}:{filename}"),
    })?;
    if stored != recomputed.as_str() {
        return Err(RunDirError::DigestMismatch {
            name: filename.to_owned(),
            stored: stored.clone(),
            recomputed: recomputed.as_str().to_owned(),
        });
    }
    Ok(recomputed)
}
