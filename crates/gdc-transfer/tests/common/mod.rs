#![allow(dead_code)]

use std::sync::Mutex;

use bytes::Bytes;
use futures_util::{stream, StreamExt};
use gdc_transfer::{HttpClient, RemoteResponse};

#[derive(Debug)]
pub struct MockError(pub String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

/// How the scripted server reacts to a request.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Honour `Range` with 206, answer 416 past the end.
    HonourRange,
    /// Always send the whole resource with 200.
    IgnoreRange,
    /// Honour `Range`, then break the connection after `n` body bytes.
    FailAfter(usize),
    /// Honour `Range`, announce the full length, but end the body after `n` bytes.
    TruncateAfter(usize),
    /// Honour `Range`, send `n` body bytes, then never send another frame.
    StallAfter(usize),
    /// Honour `Range`, but announce a `Content-Length` of `u64::MAX` on a 206.
    OverstateLength,
    /// Reply with a bare status and an empty body.
    Status(u16),
    /// Refuse to connect at all.
    Unreachable,
}

/// In-memory resource served through the `HttpClient` seam.
pub struct ScriptedRemote {
    data: Vec<u8>,
    behaviour: Behaviour,
    frame: usize,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedRemote {
    pub fn new(data: Vec<u8>, behaviour: Behaviour) -> Self {
        Self {
            data,
            behaviour,
            frame: 16,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Size of the network frames the body is delivered in.
    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_url(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|(url, _)| url.clone())
    }

    pub fn last_range(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, headers)| {
                headers
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case("range"))
                    .map(|(_, v)| v.clone())
            })
    }

    fn frames(&self, body: &[u8], fail: bool) -> Vec<Result<Bytes, MockError>> {
        let mut frames: Vec<Result<Bytes, MockError>> = body
            .chunks(self.frame.max(1))
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        if fail {
            frames.push(Err(MockError("connection reset by peer".into())));
        }
        frames
    }

    fn respond(
        &self,
        status: u16,
        content_length: Option<u64>,
        content_range: Option<String>,
        frames: Vec<Result<Bytes, MockError>>,
    ) -> RemoteResponse<MockError> {
        RemoteResponse {
            status,
            content_length,
            content_range,
            body: Box::pin(stream::iter(frames)),
        }
    }
}

fn parse_range(headers: &[(String, String)]) -> Option<usize> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("range"))
        .and_then(|(_, v)| v.strip_prefix("bytes="))
        .and_then(|v| v.strip_suffix('-'))
        .and_then(|v| v.parse().ok())
}

impl HttpClient for ScriptedRemote {
    type Error = MockError;

    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<RemoteResponse<Self::Error>, Self::Error> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), headers.to_vec()));

        let len = self.data.len();
        let start = parse_range(headers);

        let (cut, fail) = match self.behaviour {
            Behaviour::Unreachable => return Err(MockError("connection refused".into())),
            Behaviour::Status(status) => {
                return Ok(self.respond(status, Some(0), None, Vec::new()));
            }
            Behaviour::IgnoreRange => {
                let frames = self.frames(&self.data, false);
                return Ok(self.respond(200, Some(len as u64), None, frames));
            }
            Behaviour::HonourRange | Behaviour::OverstateLength => (None, false),
            Behaviour::FailAfter(n) => (Some(n), true),
            Behaviour::TruncateAfter(n) | Behaviour::StallAfter(n) => (Some(n), false),
        };

        let mut response = match start {
            Some(start) if start >= len => {
                self.respond(416, Some(0), Some(format!("bytes */{len}")), Vec::new())
            }
            Some(start) => {
                let body = &self.data[start..];
                let sent = &body[..cut.unwrap_or(body.len()).min(body.len())];
                self.respond(
                    206,
                    Some(body.len() as u64),
                    Some(format!("bytes {start}-{}/{len}", len - 1)),
                    self.frames(sent, fail),
                )
            }
            None => {
                let sent = &self.data[..cut.unwrap_or(len).min(len)];
                self.respond(200, Some(len as u64), None, self.frames(sent, fail))
            }
        };

        match self.behaviour {
            Behaviour::StallAfter(_) => {
                let sent = std::mem::replace(&mut response.body, Box::pin(stream::empty()));
                response.body = Box::pin(sent.chain(stream::pending()));
            }
            Behaviour::OverstateLength if response.status == 206 => {
                response.content_length = Some(u64::MAX);
            }
            _ => {}
        }
        Ok(response)
    }
}

/// Deterministic resource bytes, so misplaced bytes show up in comparisons.
pub fn resource(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
