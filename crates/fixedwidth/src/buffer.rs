//! In-memory line buffer with a read position.

use std::borrow::Cow;

/// Encoded output, or decode input: bytes plus a read position.
///
/// The buffer behaves like a rewindable stream. Writes always append;
/// [`read_line`](Self::read_line) consumes from the current position.
///
/// ```
/// use fixedwidth::RecordBuffer;
///
/// let mut buffer = RecordBuffer::from("Mercury\r\nVenus\nEarth");
/// assert_eq!(buffer.read_line().as_deref(), Some("Mercury"));
/// assert_eq!(buffer.read_line().as_deref(), Some("Venus"));
/// assert_eq!(buffer.read_line().as_deref(), Some("Earth"));
/// assert_eq!(buffer.read_line(), None);
///
/// buffer.rewind();
/// assert_eq!(buffer.read_line().as_deref(), Some("Mercury"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBuffer {
    data: Vec<u8>,
    position: usize,
}

impl RecordBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        RecordBuffer::default()
    }

    /// Wraps existing bytes, positioned at the start.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        RecordBuffer { data, position: 0 }
    }

    /// The full contents, regardless of position.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The contents as text, replacing invalid UTF-8.
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position in bytes.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the read position, clamped to the buffer length.
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    /// Moves the read position back to the start.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Appends `line` followed by `terminator`.
    pub fn push_line(&mut self, line: &str, terminator: &str) {
        self.data.extend_from_slice(line.as_bytes());
        self.data.extend_from_slice(terminator.as_bytes());
    }

    /// Reads the next line, without its terminator.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. A final line without a
    /// terminator is still returned; a trailing terminator does not produce
    /// an extra empty line. Invalid UTF-8 is replaced.
    pub fn read_line(&mut self) -> Option<String> {
        let rest = self.data.get(self.position..)?;
        if rest.is_empty() {
            return None;
        }

        let end = rest
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .unwrap_or(rest.len());
        let line = String::from_utf8_lossy(&rest[..end]).into_owned();

        let terminator = match (rest.get(end), rest.get(end + 1)) {
            (Some(&b'\r'), Some(&b'\n')) => 2,
            (Some(_), _) => 1,
            (None, _) => 0,
        };
        self.position += end + terminator;

        Some(line)
    }
}

impl From<Vec<u8>> for RecordBuffer {
    fn from(data: Vec<u8>) -> Self {
        RecordBuffer::from_bytes(data)
    }
}

impl From<&str> for RecordBuffer {
    fn from(text: &str) -> Self {
        RecordBuffer::from_bytes(text.as_bytes().to_vec())
    }
}

impl From<String> for RecordBuffer {
    fn from(text: String) -> Self {
        RecordBuffer::from_bytes(text.into_bytes())
    }
}

impl AsRef<[u8]> for RecordBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buffer: &mut RecordBuffer) -> Vec<String> {
        std::iter::from_fn(|| buffer.read_line()).collect()
    }

    #[test]
    fn empty_buffer_has_no_lines() {
        assert!(lines(&mut RecordBuffer::new()).is_empty());
    }

    #[test]
    fn trailing_terminator_is_not_a_line() {
        let mut b = RecordBuffer::from("a\nb\n");
        assert_eq!(lines(&mut b), vec!["a", "b"]);
    }

    #[test]
    fn blank_lines_are_kept() {
        let mut b = RecordBuffer::from("a\n\nb");
        assert_eq!(lines(&mut b), vec!["a", "", "b"]);
    }

    #[test]
    fn mixed_terminators() {
        let mut b = RecordBuffer::from("a\r\nb\rc\n");
        assert_eq!(lines(&mut b), vec!["a", "b", "c"]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut b = RecordBuffer::from(vec![b'o', 0xff, b'k', b'\n']);
        assert_eq!(b.read_line().as_deref(), Some("o\u{fffd}k"));
    }

    #[test]
    fn position_tracks_reads() {
        let mut b = RecordBuffer::new();
        b.push_line("Sol", "\r\n");
        b.push_line("Vega", "\r\n");
        assert_eq!(b.len(), 11);

        b.read_line();
        assert_eq!(b.position(), 5);
        assert_eq!(b.read_line().as_deref(), Some("Vega"));
        assert_eq!(b.position(), 11);
        assert_eq!(b.read_line(), None);

        b.set_position(100);
        assert_eq!(b.position(), 11);
        b.rewind();
        assert_eq!(b.position(), 0);
    }
}
