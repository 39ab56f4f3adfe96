use crate::error::ConversionError;
use crate::request::ConversionRequest;
use crate::response::ConversionResponse;
use async_trait::async_trait;

mod http;
pub mod wire;

pub use http::HttpGateway;
pub use wire::{RequestSchema, RpcCall};

/// The boundary to the conversion service.
///
/// Implementations turn JSON source text into a response whose shape matches
/// the request's output format. Callers issue one request per user action and
/// never retry; any failure is reported as a [`ConversionError`] carrying the
/// service's message.
#[async_trait]
pub trait ConversionGateway: Send + Sync {
    async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResponse, ConversionError>;
}
