//! `fetch`-backed [`Transport`] via `gloo-net`.

#![allow(clippy::unused_async)]

use gallery::transport::{HttpRequest, HttpResponse, Transport, TransportError};
#[cfg(feature = "csr")]
use gallery::transport::{Method, RequestBody};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let prepared = match request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Bytes(bytes) => builder.body(js_sys::Uint8Array::from(bytes.as_slice())),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let resp = prepared.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(TransportError(format!("no browser transport for {} {}", request.method, request.url)))
        }
    }
}
