//! Size-capped reads of response bodies.

use std::io::{self, Read};

/// Reads at most `max_len` bytes from `reader` and returns them.
///
/// The reader is taken by value and dropped before returning, on success and
/// on error alike, so the underlying stream is always closed.
pub fn read_truncated<R: Read>(reader: R, max_len: usize) -> io::Result<Vec<u8>> {
    match read_truncated_partial(reader, max_len) {
        (bytes, None) => Ok(bytes),
        (_, Some(e)) => Err(e),
    }
}

/// Like [`read_truncated`], but an I/O error keeps the bytes read before it.
///
/// Returns the bytes and the error that stopped the read, if any.
pub fn read_truncated_partial<R: Read>(
    reader: R,
    max_len: usize,
) -> (Vec<u8>, Option<io::Error>) {
    let mut out = Vec::with_capacity(max_len.min(8 * 1024));
    let mut limited = reader.take(max_len as u64);
    let mut buf = [0u8; 1024];
    loop {
        match limited.read(&mut buf) {
            Ok(0) => return (out, None),
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return (out, Some(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    /// Reader that records when it is dropped and can fail after some bytes.
    struct TrackedReader {
        inner: Cursor<Vec<u8>>,
        fail_after: Option<usize>,
        served: usize,
        closed: Rc<Cell<bool>>,
    }

    impl TrackedReader {
        fn new(len: usize, fail_after: Option<usize>) -> (Self, Rc<Cell<bool>>) {
            let closed = Rc::new(Cell::new(false));
            let reader = TrackedReader {
                inner: Cursor::new(vec![b'x'; len]),
                fail_after,
                served: 0,
                closed: Rc::clone(&closed),
            };
            (reader, closed)
        }
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if let Some(limit) = self.fail_after {
                if self.served >= limit {
                    return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
                }
            }
            let n = self.inner.read(buf)?;
            self.served += n;
            Ok(n)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.closed.set(true);
        }
    }

    #[test]
    fn truncates_long_stream_and_closes() {
        let (reader, closed) = TrackedReader::new(1000, None);
        let bytes = read_truncated(reader, 512).unwrap();
        assert_eq!(bytes.len(), 512);
        assert!(closed.get());
    }

    #[test]
    fn short_stream_read_fully_and_closed() {
        let (reader, closed) = TrackedReader::new(100, None);
        let bytes = read_truncated(reader, 512).unwrap();
        assert_eq!(bytes.len(), 100);
        assert!(closed.get());
    }

    #[test]
    fn io_error_still_closes() {
        let (reader, closed) = TrackedReader::new(1000, Some(0));
        let err = read_truncated(reader, 512).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(closed.get());
    }

    #[test]
    fn io_error_keeps_bytes_read_so_far() {
        let (reader, closed) = TrackedReader::new(1000, Some(300));
        let (bytes, err) = read_truncated_partial(reader, 512);
        assert!(bytes.len() >= 300 && bytes.len() < 512);
        assert_eq!(err.map(|e| e.kind()), Some(io::ErrorKind::ConnectionReset));
        assert!(closed.get());
    }

    #[test]
    fn partial_read_without_error() {
        let (bytes, err) = read_truncated_partial(Cursor::new(vec![7u8; 40]), 16);
        assert_eq!(bytes, vec![7u8; 16]);
        assert!(err.is_none());
    }

    #[test]
    fn zero_limit_reads_nothing() {
        let bytes = read_truncated(Cursor::new(b"abc".to_vec()), 0).unwrap();
        assert!(bytes.is_empty());
    }
}
