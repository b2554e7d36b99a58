//! On-disk image format.
//!
//! ```json
//! {
//!   "format": "aide-store",
//!   "version": 1,
//!   "kind": "contacts",
//!   "records": [ { "name": "Ann Lee", "phones": ["0501234567"] } ]
//! }
//! ```
//!
//! `records` keeps insertion order. Field values are written in display form and
//! re-validated when read back.

use crate::model::Record;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const FORMAT: &str = "aide-store";
pub const VERSION: u32 = 1;

#[derive(Serialize)]
struct ImageOut<'a, R: Serialize> {
    format: &'static str,
    version: u32,
    kind: &'static str,
    records: &'a [R],
}

#[derive(Deserialize)]
#[serde(bound = "R: DeserializeOwned")]
struct ImageIn<R> {
    format: String,
    version: u32,
    kind: String,
    records: Vec<R>,
}

pub fn encode<R: Record>(records: &[R]) -> serde_json::Result<Vec<u8>> {
    let image = ImageOut {
        format: FORMAT,
        version: VERSION,
        kind: R::COLLECTION,
        records,
    };
    serde_json::to_vec_pretty(&image)
}

/// Decodes and checks an image. The error is a human-readable reason.
pub fn decode<R: Record>(bytes: &[u8]) -> Result<Vec<R>, String> {
    let image: ImageIn<R> = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    if image.format != FORMAT {
        return Err(format!("unexpected format '{}'", image.format));
    }
    if image.version != VERSION {
        return Err(format!("unsupported version {}", image.version));
    }
    if image.kind != R::COLLECTION {
        return Err(format!(
            "holds {} but {} were expected",
            image.kind,
            R::COLLECTION
        ));
    }

    let mut seen = HashSet::new();
    for record in &image.records {
        if !seen.insert(record.key()) {
            return Err(format!("duplicate key '{}'", record.key()));
        }
    }

    Ok(image.records)
}
