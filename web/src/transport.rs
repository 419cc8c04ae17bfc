//! Browser `fetch` transport built on `gloo-net`.

use gloo_net::http::{Request, RequestBuilder};
use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes core requests with the page's `fetch`. Any status is returned as
/// data; only a rejected fetch or unreadable body is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let builder = request
            .headers
            .iter()
            .fold(builder_for(request.method, &request.path), |builder, (name, value)| {
                builder.header(name, value)
            });
        let fetch = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(transport_error)?;

        let response = fetch.send().await.map_err(transport_error)?;
        let status = response.status();
        let headers = response.headers().entries().collect();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn builder_for(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

fn transport_error(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}
