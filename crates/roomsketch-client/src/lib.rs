//! RoomSketch client library.
//!
//! Talks to the design backend: wire types, collaborator traits, the
//! reqwest implementation, and the export/submit pipeline that turns a
//! sketch into a design request.

pub mod api;
pub mod http;
pub mod pipeline;
pub mod service;

pub use api::{
    DesignParams, DesignRequest, DesignResult, RoomSize, RoomType, SketchImage, UploadedImage,
};
pub use http::HttpBackend;
pub use pipeline::{GenerationToken, SubmitError, SubmitPipeline};
pub use service::{ApiError, ApiResult, BoxFuture, DesignService, UploadService};
