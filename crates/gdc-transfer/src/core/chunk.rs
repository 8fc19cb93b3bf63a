use bytes::Bytes;

/// Split a network frame into slices of at most `max` bytes.
///
/// Slicing `Bytes` is reference counted, so no payload is copied.
pub fn split_chunk(mut frame: Bytes, max: usize) -> impl Iterator<Item = Bytes> {
    let max = max.max(1);
    std::iter::from_fn(move || {
        if frame.is_empty() {
            None
        } else {
            let n = frame.len().min(max);
            Some(frame.split_to(n))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_frame_passes_through() {
        let parts: Vec<_> = split_chunk(Bytes::from_static(b"abc"), 8192).collect();
        assert_eq!(parts, vec![Bytes::from_static(b"abc")]);
    }

    #[test]
    fn test_large_frame_is_bounded() {
        let frame = Bytes::from(vec![7u8; 20_000]);
        let sizes: Vec<_> = split_chunk(frame, 8192).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![8192, 8192, 3616]);
    }

    #[test]
    fn test_empty_frame_yields_nothing() {
        assert_eq!(split_chunk(Bytes::new(), 16).count(), 0);
    }
}
