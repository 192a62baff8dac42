//! Per-file character encoding detection.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

/// Bytes inspected at the start of each file.
pub const SNIFF_BYTES: u64 = 10 * 1024;

/// Pick the encoding to decode a file with from its first bytes.
///
/// Input that is valid UTF-8 (a sequence cut off by the sniff window is
/// allowed) decodes as UTF-8. Anything else goes to the detector, which
/// falls back to windows-1252 when it has nothing better.
pub fn detect(head: &[u8]) -> &'static Encoding {
  let utf8 = match std::str::from_utf8(head) {
    Ok(_) => true,
    Err(e) => e.error_len().is_none(),
  };
  if utf8 {
    return UTF_8;
  }

  let mut detector = EncodingDetector::new();
  detector.feed(head, true);
  detector.guess(None, false)
}
