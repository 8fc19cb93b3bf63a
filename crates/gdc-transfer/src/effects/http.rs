use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status line, the headers the executor inspects, and the body stream.
pub struct RemoteResponse<E> {
    pub status: u16,

    /// `Content-Length` of this response, i.e. the remaining length on a 206.
    pub content_length: Option<u64>,

    /// Raw `Content-Range` header, if any.
    pub content_range: Option<String>,

    pub body: BoxStream<'static, std::result::Result<Bytes, E>>,
}

impl<E> fmt::Debug for RemoteResponse<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("content_range", &self.content_range)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Asynchronous HTTP client abstraction.
///
/// Implementations must not turn non-2xx statuses into errors: the executor
/// needs to see `200` versus `206` versus `404` and `416` to decide what to
/// do. Errors are reserved for transport failures.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Scripted in-memory clients for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + 'static;

    /// Issue a `GET` with the given headers and return the response unconsumed.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response could be obtained (DNS failure,
    /// connection refused, connect timeout, ...).
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = std::result::Result<RemoteResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use reqwest::{Client, Proxy, Url};

    use super::*;

    /// Builder inputs for the production client.
    ///
    /// Timeouts are a transport concern; the executor imposes none.
    #[derive(Debug, Clone, Default)]
    pub struct ClientSetting {
        pub proxies: Option<Vec<Url>>,
        pub connect_timeout: Option<Duration>,
        pub user_agent: Option<String>,
    }

    impl ClientSetting {
        pub fn build(self) -> std::result::Result<Client, reqwest::Error> {
            let mut cb = Client::builder();

            if let Some(proxies) = self.proxies {
                let (secure, insecure): (Vec<Url>, Vec<Url>) =
                    proxies.into_iter().partition(|u| u.scheme() == "https");

                for u in secure {
                    cb = cb.proxy(Proxy::https(u)?);
                }

                for u in insecure {
                    cb = cb.proxy(Proxy::http(u)?);
                }
            }

            if let Some(timeout) = self.connect_timeout {
                cb = cb.connect_timeout(timeout);
            }

            if let Some(agent) = self.user_agent {
                cb = cb.user_agent(agent);
            }

            cb.build()
        }
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        pub fn new(setting: ClientSetting) -> std::result::Result<Self, reqwest::Error> {
            Ok(Self {
                client: setting.build()?,
            })
        }

        /// Wrap an already configured client.
        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> std::result::Result<RemoteResponse<Self::Error>, Self::Error> {
            let mut request = self.client.get(url);

            for (key, value) in headers {
                request = request.header(key.as_str(), value.as_str());
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            let content_length = response.content_length();
            let content_range = response
                .headers()
                .get(reqwest::header::CONTENT_RANGE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            Ok(RemoteResponse {
                status,
                content_length,
                content_range,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSetting, ReqwestClient};
