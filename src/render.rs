//! Request-time rendering.
//!
//! A page is executed into a pooled buffer first. Only a successful
//! execution touches the sink: the content type and status are written,
//! then the buffer is copied. If that copy fails the headers have already
//! gone out and the response is left incomplete; execution errors, the
//! common case, never reach the sink.

use std::io::{self, Write};
use std::sync::Arc;

use http::StatusCode;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tera::Context;

use crate::error::RenderError;
use crate::names::LAYOUT_TEMPLATE;
use crate::pool::{BufferPool, PooledBuffer};
use crate::set::TemplateSet;

/// Content type written for every rendered page
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Where a rendered page goes: headers, a status line, then the body
pub trait ResponseSink: Write {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    fn write_status(&mut self, status: StatusCode);
}

/// In-memory [`ResponseSink`] that can be handed to an `http`-based server
#[derive(Debug, Default)]
pub struct HtmlResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HtmlResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Convert into an `http::Response`, defaulting the status to 200
    pub fn into_http(self) -> http::Response<Vec<u8>> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl Write for HtmlResponse {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ResponseSink for HtmlResponse {
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

/// Renders pages from a loaded [`TemplateSet`]
#[derive(Debug, Clone)]
pub struct Renderer {
    templates: Arc<TemplateSet>,
    pool: Arc<BufferPool>,
}

impl Renderer {
    pub fn new(templates: Arc<TemplateSet>, pool: Arc<BufferPool>) -> Self {
        Self { templates, pool }
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Render `name` with `data` and stream it to `sink` as a 200 HTML response
    pub fn render<S, T>(&self, sink: &mut S, name: &str, data: &T) -> Result<(), RenderError>
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        let mut buf = self.pool.get();
        self.execute(name, data, &mut buf)?;

        sink.set_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static(HTML_CONTENT_TYPE),
        );
        sink.write_status(StatusCode::OK);
        sink.write_all(&buf)?;
        sink.flush()?;
        Ok(())
    }

    /// Render `name` with `data` into a string
    pub fn render_to_string<T>(&self, name: &str, data: &T) -> Result<String, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let mut buf = self.pool.get();
        self.execute(name, data, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn execute<T>(
        &self,
        name: &str,
        data: &T,
        buf: &mut PooledBuffer<'_>,
    ) -> Result<(), RenderError>
    where
        T: Serialize + ?Sized,
    {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::not_found(name))?;
        let context = Context::from_serialize(data).map_err(|source| RenderError::Context {
            name: name.to_string(),
            source,
        })?;
        template
            .render_to(LAYOUT_TEMPLATE, &context, &mut *buf)
            .map_err(|source| RenderError::Execute {
                name: name.to_string(),
                source,
            })
    }
}
