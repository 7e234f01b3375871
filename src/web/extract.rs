//! Request body extraction.

use axum::extract::FromRequest;

use crate::prelude::*;

/// JSON body extractor whose rejections render as [`Error`] responses.
///
/// A body that is missing, not JSON, or of the wrong shape is answered with
/// `400 {"erro": ...}` like every other failure of the API.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);
