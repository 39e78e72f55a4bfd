use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use thiserror::Error;

use crate::color::ParseColorError;
use crate::stroke::{Segment, SegmentRecord, Stroke};

/// Storage key the drawing is saved under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "saved";

/// Errors that can occur while encoding or decoding a saved drawing
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to (de)serialize drawing: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to (de)compress drawing: {0}")]
    Compression(#[from] std::io::Error),

    #[error("Saved drawing is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// JSON has no representation for NaN or infinity
    #[error("Segment {index} has a non-finite coordinate or width")]
    NonFinite { index: usize },

    #[error("Invalid segment {index}: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ParseColorError,
    },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// What happened when a saved drawing was requested
#[derive(Debug)]
pub enum LoadOutcome {
    /// The drawing was restored; holds the number of segments
    Loaded(usize),
    /// Nothing is stored under the key
    Missing,
    /// A payload exists but could not be decoded. The session is unchanged.
    Rejected(PersistenceError),
}

/// Flattens strokes into `[x0, y0, x1, y1, color, width]` tuples, dropping
/// stroke boundaries, then compresses and base64-encodes the JSON
pub fn encode(strokes: &[Stroke]) -> PersistenceResult<String> {
    let records = strokes
        .iter()
        .flat_map(Stroke::iter)
        .enumerate()
        .map(|(index, segment)| {
            let record = segment.to_record();
            let (x0, y0, x1, y1, _, width) = &record;
            if [x0, y0, x1, y1, width].iter().all(|v| v.is_finite()) {
                Ok(record)
            } else {
                Err(PersistenceError::NonFinite { index })
            }
        })
        .collect::<PersistenceResult<Vec<SegmentRecord>>>()?;
    let json = serde_json::to_string(&records)?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes())?;
    let compressed = encoder.finish()?;

    Ok(STANDARD.encode(compressed))
}

/// Inverse of [`encode`]. All segments come back as one stroke.
pub fn decode(payload: &str) -> PersistenceResult<Stroke> {
    let compressed = STANDARD.decode(payload.trim())?;

    let mut json = String::new();
    DeflateDecoder::new(compressed.as_slice()).read_to_string(&mut json)?;

    let records: Vec<SegmentRecord> = serde_json::from_str(&json)?;
    let segments = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Segment::from_record(record)
                .map_err(|source| PersistenceError::InvalidColor { index, source })
        })
        .collect::<PersistenceResult<Vec<_>>>()?;

    Ok(Stroke::new(segments))
}

/// Encode `strokes` and write them to `storage` under `key`. Returns the
/// number of segments written.
pub fn write_drawing(
    storage: &mut dyn eframe::Storage,
    key: &str,
    strokes: &[Stroke],
) -> PersistenceResult<usize> {
    let payload = encode(strokes)?;
    storage.set_string(key, payload);
    storage.flush();
    Ok(strokes.iter().map(Stroke::len).sum())
}

/// Read and decode the drawing under `key`, if there is one
pub fn read_drawing(storage: &dyn eframe::Storage, key: &str) -> PersistenceResult<Option<Stroke>> {
    match storage.get_string(key) {
        Some(payload) if !payload.is_empty() => decode(&payload).map(Some),
        _ => Ok(None),
    }
}
