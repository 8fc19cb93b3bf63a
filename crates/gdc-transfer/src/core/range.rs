use crate::error::{Result, TransferError};

/// Build the `Range` header value asking for everything from `offset` on.
///
/// # Examples
///
/// ```
/// use gdc_transfer::range_header;
///
/// assert_eq!(range_header(40), "bytes=40-");
/// ```
pub fn range_header(offset: u64) -> String {
    format!("bytes={offset}-")
}

/// Parsed `Content-Range` response header.
///
/// `bytes 40-99/100` yields `first = Some(40)`, `last = Some(99)`,
/// `total = Some(100)`; the unsatisfied form `bytes */100` yields only a
/// total; an unknown total (`/*`) yields `total = None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub first: Option<u64>,
    pub last: Option<u64>,
    pub total: Option<u64>,
}

impl ContentRange {
    pub fn parse(value: &str) -> Option<Self> {
        let rest = value.trim().strip_prefix("bytes")?.trim_start();
        let (range, total) = rest.split_once('/')?;

        let total = match total.trim() {
            "*" => None,
            n => Some(n.parse().ok()?),
        };

        let (first, last) = match range.trim() {
            "*" => (None, None),
            r => {
                let (a, b) = r.split_once('-')?;
                let first: u64 = a.trim().parse().ok()?;
                let last: u64 = b.trim().parse().ok()?;
                if last < first {
                    return None;
                }
                (Some(first), Some(last))
            }
        };

        Some(Self { first, last, total })
    }

    /// Number of bytes covered by the range, if it names one.
    ///
    /// `None` also when the count does not fit in a `u64` (`bytes 0-18446744073709551615/*`).
    pub fn len(&self) -> Option<u64> {
        match (self.first, self.last) {
            (Some(first), Some(last)) => last.checked_sub(first)?.checked_add(1),
            _ => None,
        }
    }
}

/// How the executor should proceed with an accepted response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    /// The body starts exactly at the requested offset.
    Body { remaining: Option<u64> },

    /// The server reports the resource as already fully present.
    Complete,
}

/// Decide whether a response may be appended at `offset`.
///
/// A `200` reply to a ranged request is refused: appending a full body to a
/// partial file would duplicate its head.
pub fn classify_response(
    status: u16,
    offset: u64,
    content_length: Option<u64>,
    content_range: Option<&str>,
    url: &str,
) -> Result<Accepted> {
    let range = content_range.and_then(ContentRange::parse);

    match status {
        404 => Err(TransferError::NotFound { url: url.to_string() }),
        416 => match range.and_then(|r| r.total) {
            Some(total) if offset > 0 && total == offset => Ok(Accepted::Complete),
            _ => Err(TransferError::HttpStatus {
                status,
                url: url.to_string(),
            }),
        },
        200 if offset > 0 => Err(TransferError::RangeNotSupported { offset, status }),
        200 => Ok(Accepted::Body {
            remaining: content_length,
        }),
        206 => {
            if let Some(first) = range.and_then(|r| r.first)
                && first != offset
            {
                return Err(TransferError::RangeMismatch {
                    requested: offset,
                    received: first,
                });
            }
            Ok(Accepted::Body {
                remaining: content_length.or_else(|| range.and_then(|r| r.len())),
            })
        }
        _ => Err(TransferError::HttpStatus {
            status,
            url: url.to_string(),
        }),
    }
}
