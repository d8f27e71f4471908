//! Line framing and tokenizing for the text command protocol.

use bytes::{Buf, BytesMut};

use crate::error::{CacheError, CacheResult};

/// Longest line accepted before a terminator, in bytes.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Split the next complete line off the front of `buf`.
///
/// Returns `Ok(None)` until a `\n` has arrived; the terminator (and a
/// preceding `\r`) is stripped. Whatever follows the line stays in `buf`.
/// Fails with `CacheError::ParseError` once more than `MAX_LINE_LENGTH`
/// bytes are buffered without a terminator.
///
/// ```
/// use bytes::BytesMut;
/// use lru_ttl_cache::utils::next_line;
///
/// let mut buf = BytesMut::from("get a\r\nput");
/// assert_eq!(&next_line(&mut buf).unwrap().unwrap()[..], b"get a");
/// assert!(next_line(&mut buf).unwrap().is_none());
/// assert_eq!(&buf[..], b"put");
/// ```
pub fn next_line(buf: &mut BytesMut) -> CacheResult<Option<BytesMut>> {
    let end = match buf.iter().position(|&b| b == b'\n') {
        Some(end) => end,
        None if buf.len() > MAX_LINE_LENGTH => {
            return Err(CacheError::ParseError(format!(
                "line longer than {} bytes",
                MAX_LINE_LENGTH
            )));
        }
        None => return Ok(None),
    };
    let mut line = buf.split_to(end);
    buf.advance(1);
    if line.last() == Some(&b'\r') {
        line.truncate(line.len() - 1);
    }
    Ok(Some(line))
}

/// Split a line into whitespace-separated words.
///
/// Runs of whitespace count as a single separator. Quoting and escaping are
/// not supported.
pub fn split_words(line: &[u8]) -> CacheResult<Vec<String>> {
    let text = std::str::from_utf8(line)
        .map_err(|e| CacheError::ParseError(format!("input is not valid UTF-8: {}", e)))?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Split a line into words, rejecting blank input.
pub fn parse_command(line: &[u8]) -> CacheResult<Vec<String>> {
    let parts = split_words(line)?;

    if parts.is_empty() {
        return Err(CacheError::ParseError("empty command".to_string()));
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_basic() {
        let result = split_words(b"put key value").unwrap();
        assert_eq!(result, vec!["put", "key", "value"]);
    }

    #[test]
    fn test_split_words_multiple_spaces() {
        let result = split_words(b"  put  key\tvalue ").unwrap();
        assert_eq!(result, vec!["put", "key", "value"]);
    }

    #[test]
    fn test_split_words_rejects_invalid_utf8() {
        assert!(matches!(
            split_words(&[0x67, 0xff, 0xfe]),
            Err(CacheError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_command_empty() {
        assert!(parse_command(b"").is_err());
        assert!(parse_command(b"   ").is_err());
    }

    #[test]
    fn test_next_line_handles_several_lines() {
        let mut buf = BytesMut::from("ping\nstats\n");
        assert_eq!(&next_line(&mut buf).unwrap().unwrap()[..], b"ping");
        assert_eq!(&next_line(&mut buf).unwrap().unwrap()[..], b"stats");
        assert!(next_line(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_next_line_waits_for_terminator() {
        let mut buf = BytesMut::from("get ke");
        assert!(next_line(&mut buf).unwrap().is_none());
        buf.extend_from_slice(b"y\n");
        assert_eq!(&next_line(&mut buf).unwrap().unwrap()[..], b"get key");
    }

    #[test]
    fn test_next_line_rejects_unterminated_overlong_input() {
        let mut buf = BytesMut::from(&vec![b'a'; MAX_LINE_LENGTH][..]);
        assert!(next_line(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"a");
        assert!(matches!(
            next_line(&mut buf),
            Err(CacheError::ParseError(_))
        ));
    }

    #[test]
    fn test_next_line_accepts_long_terminated_line() {
        let mut long = vec![b'v'; MAX_LINE_LENGTH + 10];
        long.push(b'\n');
        let mut buf = BytesMut::from(&long[..]);
        assert_eq!(next_line(&mut buf).unwrap().unwrap().len(), MAX_LINE_LENGTH + 10);
    }
}
