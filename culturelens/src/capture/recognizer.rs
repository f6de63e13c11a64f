//! Recognizer collaborator.
//!
//! Converts raw image bytes into a landmark identifier. The on-device model
//! is out of scope; the production implementation defers to the backend's
//! `/analyze/image` endpoint.

use bytes::Bytes;

use crate::api::{ApiClient, ApiError, BoxFuture, RecognitionResult};

use super::CaptureError;

/// Opaque image-to-identifier collaborator.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, image: Bytes) -> BoxFuture<'_, Result<RecognitionResult, CaptureError>>;
}

/// Recognizer backed by the backend's `/analyze/image` endpoint.
pub struct HttpRecognizer {
    api: ApiClient,
}

impl HttpRecognizer {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl Recognizer for HttpRecognizer {
    fn recognize(&self, image: Bytes) -> BoxFuture<'_, Result<RecognitionResult, CaptureError>> {
        Box::pin(async move {
            self.api.analyze_image(image).await.map_err(|e| match e {
                ApiError::Backend(message) => CaptureError::RecognitionFailed(message),
                other => CaptureError::RecognitionFailed(other.to_string()),
            })
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Scripted recognizer returning queued results in order.
    #[derive(Clone)]
    pub struct MockRecognizer {
        script: Arc<Mutex<Vec<Result<RecognitionResult, CaptureError>>>>,
        pub calls: Arc<Mutex<Vec<Bytes>>>,
    }

    impl MockRecognizer {
        pub fn new(script: Vec<Result<RecognitionResult, CaptureError>>) -> Self {
            Self {
                script: Arc::new(Mutex::new(script)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn recognizing(object_id: &str) -> Self {
            Self::new(vec![Ok(RecognitionResult {
                object_id: object_id.to_string(),
                detected_name: None,
                location: None,
                confidence: Some(0.92),
                visual_tags: Vec::new(),
            })])
        }

        pub fn failing(reason: &str) -> Self {
            Self::new(vec![Err(CaptureError::RecognitionFailed(reason.into()))])
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl Recognizer for MockRecognizer {
        fn recognize(
            &self,
            image: Bytes,
        ) -> BoxFuture<'_, Result<RecognitionResult, CaptureError>> {
            self.calls.lock().push(image);
            let next = {
                let mut script = self.script.lock();
                if script.is_empty() {
                    Err(CaptureError::RecognitionFailed("script exhausted".into()))
                } else {
                    script.remove(0)
                }
            };
            Box::pin(async move { next })
        }
    }

    #[tokio::test]
    async fn test_http_recognizer_maps_backend_error() {
        use crate::api::MockHttpClient;

        let mock = MockHttpClient::new();
        mock.route_json(
            "/analyze/image",
            serde_json::json!({"error": "Landmark not found"}),
        );
        let api = ApiClient::new("http://localhost:8000", Arc::new(mock));

        let recognizer = HttpRecognizer::new(api);
        let result = recognizer.recognize(Bytes::from_static(b"img")).await;
        assert!(matches!(
            result,
            Err(CaptureError::RecognitionFailed(msg)) if msg.contains("not found")
        ));
    }

    #[tokio::test]
    async fn test_http_recognizer_decodes_result() {
        use crate::api::MockHttpClient;

        let mock = MockHttpClient::new();
        mock.route_json(
            "/analyze/image",
            serde_json::json!({"object_id": "great_wall", "confidence": 0.92}),
        );
        let api = ApiClient::new("http://localhost:8000", Arc::new(mock));

        let recognizer = HttpRecognizer::new(api);
        let result = recognizer
            .recognize(Bytes::from_static(b"img"))
            .await
            .unwrap();
        assert_eq!(result.object_id, "great_wall");
    }
}
