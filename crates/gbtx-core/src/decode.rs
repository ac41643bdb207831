// crates/gbtx-core/src/decode.rs
//
// Frame decoder: monitor text lines -> Frames, through a FrameLayout.
//
// Contract:
// - one non-blank line == one Frame, in file order
// - blank (whitespace-only) lines are skipped and produce nothing
// - every line is decoded; a malformed line is an error value, and the
//   caller picks the policy (abort on first, or skip and record)

use std::io::BufRead;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{GbtxError, MalformedReason, Result};
use crate::frame::{Frame, Sequence};
use crate::layout::{slot_range, strip_line_ending_bytes, FrameLayout, HEX_CHARS_PER_SLOT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Stop at the first malformed line and return its error.
    #[default]
    Abort,
    /// Drop malformed lines, recording each one in `DecodeReport::skipped`.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub frame: Frame,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub frames: Sequence,
    pub skipped: Vec<SkippedLine>,
    /// Physical lines consumed, blank ones included.
    pub lines_read: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameDecoder<'a> {
    layout: &'a FrameLayout,
}

impl<'a> FrameDecoder<'a> {
    pub fn new(layout: &'a FrameLayout) -> Self {
        Self { layout }
    }

    #[inline]
    pub fn layout(&self) -> &'a FrameLayout {
        self.layout
    }

    /// Decode a single line. `line_no` is only used for error reporting.
    pub fn decode_line(&self, line_no: usize, line: &str) -> Result<Frame> {
        self.decode_bytes(line_no, line.as_bytes())
    }

    /// Same as [`decode_line`](Self::decode_line) for raw bytes. Non-ASCII
    /// bytes inside a slot are reported as non-hex.
    pub fn decode_bytes(&self, line_no: usize, line: &[u8]) -> Result<Frame> {
        let body = strip_line_ending_bytes(line);
        let need = self.layout.min_line_len();

        if body.len() < need {
            let widest = self.layout.widest_slot();
            let end = body.len().saturating_sub(HEX_CHARS_PER_SLOT * widest.offset);
            let start = end.saturating_sub(HEX_CHARS_PER_SLOT);
            return Err(GbtxError::MalformedFrame {
                line: line_no,
                channel: widest.name.clone(),
                slot: String::from_utf8_lossy(&body[start..end]).into_owned(),
                reason: MalformedReason::TooShort { len: body.len(), need },
            });
        }

        let mut frame = Frame::default();
        for slot in self.layout.slots() {
            let raw = &body[slot_range(body.len(), slot.offset)];
            match (hex_nibble(raw[0]), hex_nibble(raw[1])) {
                (Some(hi), Some(lo)) => frame.insert(slot.name.clone(), (hi << 4) | lo),
                _ => {
                    return Err(GbtxError::MalformedFrame {
                        line: line_no,
                        channel: slot.name.clone(),
                        slot: String::from_utf8_lossy(raw).into_owned(),
                        reason: MalformedReason::NonHex,
                    })
                }
            }
        }
        Ok(frame)
    }

    /// Lazily decode `reader` line by line. Single pass: to read the input
    /// again, reopen it and call `frames` again.
    pub fn frames<R: BufRead>(&self, reader: R) -> Frames<'a, R> {
        Frames {
            decoder: *self,
            reader,
            buf: Vec::new(),
            line_no: 0,
            done: false,
        }
    }

    pub fn decode_all<R: BufRead>(&self, reader: R, policy: MalformedPolicy) -> Result<DecodeReport> {
        let mut frames = self.frames(reader);
        let mut report = DecodeReport::default();

        while let Some(item) = frames.next() {
            match item {
                Ok(d) => report.frames.push(d.frame),
                Err(e @ GbtxError::MalformedFrame { .. }) => match policy {
                    MalformedPolicy::Abort => return Err(e),
                    MalformedPolicy::Skip => {
                        let line = frames.line_no();
                        warn!("skipping line {line}: {e}");
                        report.skipped.push(SkippedLine { line, error: e.to_string() });
                    }
                },
                Err(e) => return Err(e),
            }
        }

        report.lines_read = frames.line_no();
        debug!(
            "decoded {} frames from {} lines ({} skipped)",
            report.frames.len(),
            report.lines_read,
            report.skipped.len()
        );
        Ok(report)
    }

    pub fn decode_str(&self, text: &str, policy: MalformedPolicy) -> Result<DecodeReport> {
        self.decode_all(text.as_bytes(), policy)
    }
}

/// Iterator returned by [`FrameDecoder::frames`].
///
/// Malformed lines come out as `Err` and iteration continues; an I/O error
/// ends the iteration after being yielded.
pub struct Frames<'a, R> {
    decoder: FrameDecoder<'a>,
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
    done: bool,
}

impl<R> Frames<'_, R> {
    /// Number of physical lines consumed so far.
    #[inline]
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for Frames<'_, R> {
    type Item = Result<DecodedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {
                    self.line_no += 1;
                    if self.buf.iter().all(u8::is_ascii_whitespace) {
                        continue;
                    }
                    let line = self.line_no;
                    return Some(
                        self.decoder
                            .decode_bytes(line, &self.buf)
                            .map(|frame| DecodedLine { line, frame }),
                    );
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[inline]
fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
