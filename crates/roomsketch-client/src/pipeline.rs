//! Export/submit pipeline: rasterize the sketch, upload it, request a
//! design. Strictly sequential, one submission at a time, no retries.

use crate::api::{DesignParams, DesignResult, SketchImage};
use crate::service::{ApiError, DesignService, UploadService};
use roomsketch_core::SketchCanvas;
use roomsketch_render::{RenderError, export_png};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;
use tracing::{info, warn};

/// Why a submission produced no design.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("sketch export failed: {0}")]
    Export(#[from] RenderError),

    #[error("sketch upload failed: {0}")]
    Upload(#[source] ApiError),

    #[error("design generation failed: {0}")]
    Generation(#[source] ApiError),

    #[error("a submission is already in flight")]
    Busy,

    #[error("the sketch changed while the submission was in flight")]
    Superseded,
}

/// Cheap shared handle marking which sketch "generation" is current.
/// Bump it (for instance when the sketch is cleared) and any in-flight
/// submission started before the bump will discard its result.
#[derive(Debug, Clone, Default)]
pub struct GenerationToken(Arc<AtomicU64>);

impl GenerationToken {
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives the export, upload, and generate steps in order.
///
/// Holds no document state; callers pass the canvas per submission. Safe to
/// share behind an `Arc` since the guards are atomics.
pub struct SubmitPipeline<U, D> {
    upload: U,
    design: D,
    in_flight: AtomicBool,
    generation: GenerationToken,
}

impl<U: UploadService, D: DesignService> SubmitPipeline<U, D> {
    pub fn new(upload: U, design: D) -> Self {
        Self {
            upload,
            design,
            in_flight: AtomicBool::new(false),
            generation: GenerationToken::default(),
        }
    }

    /// Shares an externally owned generation token, letting several callers
    /// invalidate the same pipeline.
    pub fn with_generation(mut self, generation: GenerationToken) -> Self {
        self.generation = generation;
        self
    }

    /// Handle for invalidating in-flight submissions; wire it to whatever
    /// destroys the sketch the submission was made from.
    pub fn generation(&self) -> GenerationToken {
        self.generation.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Runs one submission. Fails fast with [`SubmitError::Busy`] while an
    /// earlier one is still outstanding; a failing step aborts the rest.
    pub async fn submit(
        &self,
        canvas: &SketchCanvas,
        params: DesignParams,
    ) -> Result<DesignResult, SubmitError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::Busy);
        }
        let result = self.run(canvas, params).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run(
        &self,
        canvas: &SketchCanvas,
        params: DesignParams,
    ) -> Result<DesignResult, SubmitError> {
        let started_at = self.generation.current();

        let bytes = export_png(canvas)?;
        info!(bytes = bytes.len(), "sketch exported");

        let uploaded = self
            .upload
            .upload_image(SketchImage::png(bytes))
            .await
            .map_err(SubmitError::Upload)?;
        info!(url = %uploaded.url, "control image uploaded");

        let request = params.into_request(Some(uploaded.url));
        let result = self
            .design
            .generate_design(request)
            .await
            .map_err(SubmitError::Generation)?;

        if self.generation.current() != started_at {
            warn!("design result arrived for a discarded sketch");
            return Err(SubmitError::Superseded);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DesignRequest, UploadedImage};
    use crate::service::{ApiResult, BoxFuture};
    use kurbo::{Point, Size};
    use roomsketch_core::{MouseButton, ToolKind};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn sketch() -> SketchCanvas {
        let mut canvas = SketchCanvas::new();
        canvas.set_viewport_size(Size::new(200.0, 150.0));
        canvas.set_tool(ToolKind::Rect);
        canvas.pointer_down(Point::new(20.0, 20.0), MouseButton::Left);
        canvas.pointer_move(Point::new(120.0, 100.0));
        canvas.pointer_up(Point::new(120.0, 100.0), MouseButton::Left);
        canvas
    }

    #[derive(Default)]
    struct FakeUpload {
        calls: AtomicUsize,
        fail: bool,
    }

    impl UploadService for FakeUpload {
        fn upload_image(&self, image: SketchImage) -> BoxFuture<'_, ApiResult<UploadedImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail;
            Box::pin(async move {
                assert!(!image.bytes.is_empty());
                if fail {
                    Err(ApiError::Rejected {
                        status: 500,
                        detail: "storage unavailable".to_string(),
                    })
                } else {
                    Ok(UploadedImage {
                        url: "https://img.example/sketch.png".to_string(),
                    })
                }
            })
        }
    }

    #[derive(Default)]
    struct FakeDesign {
        calls: AtomicUsize,
        last_request: Mutex<Option<DesignRequest>>,
        invalidate: Option<GenerationToken>,
        gate: Option<Arc<Notify>>,
    }

    impl DesignService for FakeDesign {
        fn generate_design(&self, request: DesignRequest) -> BoxFuture<'_, ApiResult<DesignResult>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            Box::pin(async move {
                if let Some(gate) = &self.gate {
                    gate.notified().await;
                }
                if let Some(token) = &self.invalidate {
                    token.invalidate();
                }
                Ok(DesignResult(json!({"designs": []})))
            })
        }
    }

    #[tokio::test]
    async fn successful_submission_threads_the_upload_url() {
        let pipeline = SubmitPipeline::new(FakeUpload::default(), FakeDesign::default());
        let result = pipeline.submit(&sketch(), DesignParams::default()).await;

        assert!(result.is_ok());
        assert_eq!(pipeline.upload.calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.design.calls.load(Ordering::SeqCst), 1);
        let request = pipeline.design.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(
            request.control_image_url.as_deref(),
            Some("https://img.example/sketch.png")
        );
    }

    #[tokio::test]
    async fn upload_failure_never_reaches_design_generation() {
        let upload = FakeUpload {
            fail: true,
            ..Default::default()
        };
        let pipeline = SubmitPipeline::new(upload, FakeDesign::default());
        let err = pipeline
            .submit(&sketch(), DesignParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Upload(_)));
        assert_eq!(pipeline.design.calls.load(Ordering::SeqCst), 0);
        // The guard is released so a later submission can proceed.
        assert!(!pipeline.is_in_flight());
    }

    #[tokio::test]
    async fn export_failure_aborts_before_any_network_call() {
        let mut canvas = SketchCanvas::new();
        canvas.set_viewport_size(Size::new(0.0, 0.0));

        let pipeline = SubmitPipeline::new(FakeUpload::default(), FakeDesign::default());
        let err = pipeline
            .submit(&canvas, DesignParams::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Export(_)));
        assert_eq!(pipeline.upload.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_submission_is_rejected_as_busy() {
        let gate = Arc::new(Notify::new());
        let design = FakeDesign {
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let pipeline = Arc::new(SubmitPipeline::new(FakeUpload::default(), design));
        let canvas = Arc::new(sketch());

        let first = tokio::spawn({
            let pipeline = pipeline.clone();
            let canvas = canvas.clone();
            async move { pipeline.submit(&canvas, DesignParams::default()).await }
        });

        // Wait until the first submission reaches the gated design call.
        while pipeline.design.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = pipeline.submit(&canvas, DesignParams::default()).await;
        assert!(matches!(second, Err(SubmitError::Busy)));

        gate.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert!(!pipeline.is_in_flight());
    }

    #[tokio::test]
    async fn invalidated_sketch_discards_the_result() {
        // The design double bumps the generation mid-flight, mimicking a
        // Clear happening while the backend works.
        let token = GenerationToken::default();
        let design = FakeDesign {
            invalidate: Some(token.clone()),
            ..Default::default()
        };
        let pipeline =
            SubmitPipeline::new(FakeUpload::default(), design).with_generation(token);

        let err = pipeline
            .submit(&sketch(), DesignParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Superseded));
    }
}
