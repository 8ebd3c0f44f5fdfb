//! reqwest implementation of the backend collaborators.

use crate::api::{DesignRequest, DesignResult, SketchImage, UploadedImage};
use crate::service::{ApiError, ApiResult, BoxFuture, DesignService, UploadService};
use reqwest::multipart;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Design generation is slow but bounded; well past this the request is dead.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const UPLOAD_PATH: &str = "upload-image";
const DESIGN_PATH: &str = "agent/design/multi";

/// HTTP client for a single backend base URL.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base: Url) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Passes 2xx responses through; otherwise extracts the backend's
    /// `{"detail": ...}` message when present.
    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|d| d.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| format!("HTTP {status}"));
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

impl UploadService for HttpBackend {
    fn upload_image(&self, image: SketchImage) -> BoxFuture<'_, ApiResult<UploadedImage>> {
        Box::pin(async move {
            let url = self.endpoint(UPLOAD_PATH)?;
            debug!(%url, bytes = image.bytes.len(), "uploading sketch image");

            let part = multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(SketchImage::MIME)?;
            let form = multipart::Form::new().part("file", part);

            let response = self.client.post(url).multipart(form).send().await?;
            let response = Self::ensure_success(response).await?;
            Ok(response.json::<UploadedImage>().await?)
        })
    }
}

impl DesignService for HttpBackend {
    fn generate_design(&self, request: DesignRequest) -> BoxFuture<'_, ApiResult<DesignResult>> {
        Box::pin(async move {
            let url = self.endpoint(DESIGN_PATH)?;
            debug!(%url, "requesting design generation");

            let response = self.client.post(url).json(&request).send().await?;
            let response = Self::ensure_success(response).await?;
            Ok(response.json::<DesignResult>().await?)
        })
    }
}
