//! Request payloads for the upstream provider.

use serde::Serialize;

/// JSON body for the send-like endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LikeRequest {
    /// Player UID receiving the likes.
    pub uid: String,
    /// API key authorizing the call.
    pub key: String,
}
