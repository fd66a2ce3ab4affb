//! Worker event stream decoding.
//!
//! The worker streams text frames, each a `data: {json}` payload terminated
//! by a blank line. Frames arrive as arbitrary byte chunks, so the decoder
//! buffers bytes until a full frame is present; the delimiter, a multi-byte
//! UTF-8 sequence, or the JSON payload itself may split across reads.

use tracing::warn;

use clipninja_models::WorkerEvent;

/// Marker introducing an event payload line.
const DATA_PREFIX: &str = "data:";

/// Incremental decoder for the worker's event stream.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    buffer: Vec<u8>,
}

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of bytes and return the events completed by it.
    ///
    /// A frame with malformed JSON is dropped with a warning; one corrupt
    /// event must not abort an otherwise-healthy stream.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<WorkerEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(end) = find_delimiter(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_frame(&frame[..end]) {
                events.push(event);
            }
        }
        events
    }
}

/// Position of the next `\n\n` frame delimiter, if a full frame is buffered.
fn find_delimiter(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

/// Parse one complete frame into an event.
///
/// Only lines carrying the `data:` prefix contribute payload text; comment
/// and blank lines are ignored. Returns `None` for frames with no payload
/// or with malformed JSON.
fn parse_frame(frame: &[u8]) -> Option<WorkerEvent> {
    let text = String::from_utf8_lossy(frame);

    let mut payload = String::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
            if !payload.is_empty() {
                payload.push('\n');
            }
            payload.push_str(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if payload.is_empty() {
        return None;
    }

    match serde_json::from_str(&payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!("Dropping malformed worker event ({}): {:?}", err, payload);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipninja_models::{ProgressEvent, TerminalEvent};

    fn progress(percent: u32, message: &str) -> WorkerEvent {
        WorkerEvent::Progress(ProgressEvent {
            progress: percent,
            message: message.to_string(),
        })
    }

    const BODY: &str = concat!(
        "data: {\"progress\": 10, \"message\": \"Downloading segment...\"}\n\n",
        "data: {\"progress\": 60, \"message\": \"Re-encoding...\"}\n\n",
        "data: {\"status\": \"success\", \"output_file\": \"/tmp/out/clip_42.mp4\"}\n\n",
    );

    fn expected() -> Vec<WorkerEvent> {
        vec![
            progress(10, "Downloading segment..."),
            progress(60, "Re-encoding..."),
            WorkerEvent::Terminal(TerminalEvent::Success {
                output_file: "/tmp/out/clip_42.mp4".to_string(),
            }),
        ]
    }

    #[test]
    fn test_single_chunk() {
        let mut decoder = EventStreamDecoder::new();
        assert_eq!(decoder.feed(BODY.as_bytes()), expected());
    }

    #[test]
    fn test_any_two_chunk_split_is_equivalent() {
        // Every split point, including inside the delimiter and inside a
        // JSON payload, must decode identically to one chunk.
        let bytes = BODY.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = EventStreamDecoder::new();
            let mut events = decoder.feed(&bytes[..split]);
            events.extend(decoder.feed(&bytes[split..]));
            assert_eq!(events, expected(), "split at byte {}", split);
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut decoder = EventStreamDecoder::new();
        let mut events = Vec::new();
        for byte in BODY.as_bytes() {
            events.extend(decoder.feed(std::slice::from_ref(byte)));
        }
        assert_eq!(events, expected());
    }

    #[test]
    fn test_partial_frame_stays_buffered() {
        let mut decoder = EventStreamDecoder::new();
        assert!(decoder.feed(b"data: {\"progress\": 10}\n").is_empty());
        assert_eq!(decoder.feed(b"\n"), vec![progress(10, "")]);
    }

    #[test]
    fn test_malformed_json_is_swallowed() {
        let mut decoder = EventStreamDecoder::new();
        let events = decoder.feed(
            b"data: {not json}\n\ndata: {\"progress\": 20, \"message\": \"ok\"}\n\n",
        );
        assert_eq!(events, vec![progress(20, "ok")]);
    }

    #[test]
    fn test_frames_without_data_prefix_ignored() {
        let mut decoder = EventStreamDecoder::new();
        let events = decoder.feed(b": keep-alive\n\nretry: 1000\n\ndata: {\"progress\": 5}\n\n");
        assert_eq!(events, vec![progress(5, "")]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let body = "data: {\"progress\": 1, \"message\": \"caf\u{e9}\"}\n\n".as_bytes();
        // Split in the middle of the two-byte 'é' sequence.
        let split = body.len() - 5;
        let mut decoder = EventStreamDecoder::new();
        let mut events = decoder.feed(&body[..split]);
        events.extend(decoder.feed(&body[split..]));
        assert_eq!(events, vec![progress(1, "caf\u{e9}")]);
    }
}
