//! Collaborator interfaces to the design backend.
//!
//! The pipeline depends on these traits, never on reqwest directly, so
//! tests run against in-process doubles.

use crate::api::{DesignRequest, DesignResult, SketchImage, UploadedImage};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors from a single backend operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status; `detail` carries the
    /// backend's own message when the body provides one.
    #[error("server rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Uploads an exported sketch and returns its public URL.
pub trait UploadService: Send + Sync {
    fn upload_image(&self, image: SketchImage) -> BoxFuture<'_, ApiResult<UploadedImage>>;
}

/// Submits a design request and returns the raw structured result.
pub trait DesignService: Send + Sync {
    fn generate_design(&self, request: DesignRequest) -> BoxFuture<'_, ApiResult<DesignResult>>;
}
