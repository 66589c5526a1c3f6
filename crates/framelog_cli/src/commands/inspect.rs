//! Inspect command implementation.

use framelog_store::{Store, LEN_WIDTH};
use serde::Serialize;
use std::path::Path;

/// Store file inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Store file path.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Number of complete frames.
    pub frame_count: usize,
    /// Total payload bytes across complete frames.
    pub payload_bytes: u64,
    /// Smallest payload length, if any frames exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smallest_payload: Option<u64>,
    /// Largest payload length, if any frames exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_payload: Option<u64>,
    /// Whether a partial trailing frame was found (crash mid-append).
    pub partial_trailing_frame: bool,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("no store file found at {}", path.display()).into());
    }

    let store = Store::open(path)?;
    let result = analyze(&store, path)?;
    store.close()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_text_output(&result),
    }

    Ok(())
}

fn analyze(store: &Store, path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    let size = store.size()?;

    let mut result = InspectResult {
        path: path.display().to_string(),
        size,
        frame_count: 0,
        payload_bytes: 0,
        smallest_payload: None,
        largest_payload: None,
        partial_trailing_frame: false,
    };

    let mut position = 0u64;
    while position < size {
        if position + LEN_WIDTH > size {
            result.partial_trailing_frame = true;
            break;
        }

        let mut prefix = [0u8; LEN_WIDTH as usize];
        store.read_at(&mut prefix, position)?;
        let len = u64::from_be_bytes(prefix);

        if position + LEN_WIDTH + len > size {
            result.partial_trailing_frame = true;
            break;
        }

        result.frame_count += 1;
        result.payload_bytes += len;
        result.smallest_payload = Some(result.smallest_payload.map_or(len, |s| s.min(len)));
        result.largest_payload = Some(result.largest_payload.map_or(len, |l| l.max(len)));

        position += LEN_WIDTH + len;
    }

    Ok(result)
}

fn print_text_output(result: &InspectResult) {
    println!("Store file: {}", result.path);
    println!("  size:           {} bytes", result.size);
    println!("  frames:         {}", result.frame_count);
    println!("  payload bytes:  {}", result.payload_bytes);
    if let (Some(smallest), Some(largest)) = (result.smallest_payload, result.largest_payload) {
        println!("  payload range:  {smallest}..={largest} bytes");
    }
    if result.partial_trailing_frame {
        println!("  WARNING: partial trailing frame (crash mid-append?)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn analyze_counts_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.store");

        let store = Store::open(&path).unwrap();
        store.append(b"hello").unwrap();
        store.append(b"hello world").unwrap();
        store.flush().unwrap();

        let result = analyze(&store, &path).unwrap();
        assert_eq!(result.frame_count, 2);
        assert_eq!(result.payload_bytes, 16);
        assert_eq!(result.smallest_payload, Some(5));
        assert_eq!(result.largest_payload, Some(11));
        assert!(!result.partial_trailing_frame);
    }

    #[test]
    fn analyze_flags_partial_trailing_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.store");

        {
            let store = Store::open(&path).unwrap();
            store.append(b"complete").unwrap();
            store.close().unwrap();
        }

        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap();
        file.write_all(&64u64.to_be_bytes()).unwrap();
        file.write_all(b"short").unwrap();
        drop(file);

        let store = Store::open(&path).unwrap();
        let result = analyze(&store, &path).unwrap();
        assert_eq!(result.frame_count, 1);
        assert!(result.partial_trailing_frame);
    }
}
