//! HTTP client abstraction for the interpretation backend.
//!
//! `AsyncHttpClient` keeps the transport injectable so tests can swap in a
//! mock without a running backend. `ApiClient` layers the typed endpoints on
//! top of whichever transport it is given.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use super::error::ApiError;
use super::types::{
    InterpretationRequest, InterpretationResponse, LensInfo, NarrationRequest, RecognitionResult,
};

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for HTTP operations against the backend.
///
/// Implementations must be `Send + Sync` so a single client can be shared
/// across spawned fetch tasks.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs a GET request, returning the response body.
    fn get(&self, url: &str) -> BoxFuture<'_, Result<Bytes, ApiError>>;

    /// Performs a POST request with a JSON body, returning the response body.
    fn post_json(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> BoxFuture<'_, Result<Bytes, ApiError>>;

    /// Performs a multipart POST with a single `file` part containing the
    /// given bytes, returning the response body.
    fn post_multipart(&self, url: &str, file: Bytes) -> BoxFuture<'_, Result<Bytes, ApiError>>;
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default 30 second timeout.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn read_body(response: reqwest::Response) -> Result<Bytes, ApiError> {
        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.bytes().await?)
    }
}

impl AsyncHttpClient for ReqwestClient {
    fn get(&self, url: &str) -> BoxFuture<'_, Result<Bytes, ApiError>> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self.client.get(&url).send().await?;
            Self::read_body(response).await
        })
    }

    fn post_json(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> BoxFuture<'_, Result<Bytes, ApiError>> {
        let url = url.to_string();
        Box::pin(async move {
            let response = self.client.post(&url).json(&body).send().await?;
            Self::read_body(response).await
        })
    }

    fn post_multipart(&self, url: &str, file: Bytes) -> BoxFuture<'_, Result<Bytes, ApiError>> {
        let url = url.to_string();
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(file.to_vec()).file_name("capture.jpg");
            let form = reqwest::multipart::Form::new().part("file", part);
            let response = self.client.post(&url).multipart(form).send().await?;
            Self::read_body(response).await
        })
    }
}

/// Typed endpoints of the interpretation backend.
///
/// Cheap to clone; all clones share the underlying transport.
#[derive(Clone)]
pub struct ApiClient {
    http: Arc<dyn AsyncHttpClient>,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>, http: Arc<dyn AsyncHttpClient>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
        // The backend reports application errors as 2xx bodies with an
        // `error` field, so check for that shape before decoding.
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return Err(ApiError::Backend(message.to_string()));
        }
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /analyze/image`: submit raw image bytes to the recognizer.
    pub async fn analyze_image(&self, image: Bytes) -> Result<RecognitionResult, ApiError> {
        let url = self.url("/analyze/image");
        debug!(bytes = image.len(), "submitting image for recognition");
        let body = self.http.post_multipart(&url, image).await?;
        Self::decode(&body)
    }

    /// `POST /interpret`: resolve an object + lens to an interpretation.
    pub async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<InterpretationResponse, ApiError> {
        let url = self.url("/interpret");
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.http.post_json(&url, body).await?;
        Self::decode(&response)
    }

    /// Audio endpoints answer 2xx with a JSON `{"error": ...}` body instead
    /// of media bytes when generation fails upstream; a real clip never
    /// parses as such an object.
    fn check_clip_body(body: &Bytes) -> Result<(), ApiError> {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
            if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
                return Err(ApiError::Backend(message.to_string()));
            }
        }
        Ok(())
    }

    /// `POST /audio/narrate`: fetch a narration clip as raw audio bytes.
    pub async fn narrate(&self, request: &NarrationRequest) -> Result<Bytes, ApiError> {
        let url = self.url("/audio/narrate");
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let clip = self.http.post_json(&url, body).await?;
        Self::check_clip_body(&clip)?;
        Ok(clip)
    }

    /// `POST /audio/intro`: fetch the short introduction clip.
    pub async fn narrate_intro(&self, request: &NarrationRequest) -> Result<Bytes, ApiError> {
        let url = self.url("/audio/intro");
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let clip = self.http.post_json(&url, body).await?;
        Self::check_clip_body(&clip)?;
        Ok(clip)
    }

    /// `GET /lenses`: list the lenses the backend knows about.
    pub async fn lenses(&self) -> Result<Vec<LensInfo>, ApiError> {
        #[derive(serde::Deserialize)]
        struct Listing {
            lenses: Vec<LensInfo>,
        }
        let body = self.http.get(&self.url("/lenses")).await?;
        let listing: Listing = Self::decode(&body)?;
        Ok(listing.lenses)
    }

    /// `GET /audio/languages`: list narration languages the backend supports.
    pub async fn audio_languages(&self) -> Result<Vec<String>, ApiError> {
        #[derive(serde::Deserialize)]
        struct Listing {
            languages: Vec<String>,
        }
        let body = self.http.get(&self.url("/audio/languages")).await?;
        let listing: Listing = Self::decode(&body)?;
        Ok(listing.languages)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// One canned route of the mock transport.
    struct MockRoute {
        /// URL path suffix this route answers for.
        path: String,
        /// If set, only JSON bodies whose `cultural_lens` matches.
        lens: Option<String>,
        /// Simulated network latency before the response resolves.
        delay: Duration,
        response: Result<Bytes, ApiError>,
        hits: u64,
    }

    /// Mock transport with canned, optionally delayed responses.
    ///
    /// Routes are matched most-specific first (lens-qualified routes before
    /// plain path routes). Unmatched requests fail loudly.
    #[derive(Clone)]
    pub struct MockHttpClient {
        routes: Arc<Mutex<Vec<MockRoute>>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                routes: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn route(&self, path: &str, response: Result<Bytes, ApiError>) -> &Self {
            self.route_with(path, None, Duration::ZERO, response)
        }

        pub fn route_json(&self, path: &str, json: serde_json::Value) -> &Self {
            self.route(path, Ok(Bytes::from(json.to_string())))
        }

        /// Registers a route answered only for the given cultural lens, after
        /// an artificial delay. Used with a paused tokio clock to script
        /// response-arrival order.
        pub fn route_for_lens(
            &self,
            path: &str,
            lens: &str,
            delay: Duration,
            json: serde_json::Value,
        ) -> &Self {
            self.route_with(
                path,
                Some(lens.to_string()),
                delay,
                Ok(Bytes::from(json.to_string())),
            )
        }

        fn route_with(
            &self,
            path: &str,
            lens: Option<String>,
            delay: Duration,
            response: Result<Bytes, ApiError>,
        ) -> &Self {
            self.routes.lock().push(MockRoute {
                path: path.to_string(),
                lens,
                delay,
                response,
                hits: 0,
            });
            self
        }

        /// Number of requests that matched the given path (any lens).
        pub fn hits(&self, path: &str) -> u64 {
            self.routes
                .lock()
                .iter()
                .filter(|route| route.path == path)
                .map(|route| route.hits)
                .sum()
        }

        fn answer(
            &self,
            url: &str,
            lens: Option<&str>,
        ) -> (Duration, Result<Bytes, ApiError>) {
            let mut routes = self.routes.lock();
            // Lens-qualified routes take precedence over plain path routes.
            let index = routes
                .iter()
                .position(|r| url.ends_with(&r.path) && r.lens.as_deref() == lens)
                .or_else(|| {
                    routes
                        .iter()
                        .position(|r| url.ends_with(&r.path) && r.lens.is_none())
                });
            match index {
                Some(i) => {
                    routes[i].hits += 1;
                    (routes[i].delay, routes[i].response.clone())
                }
                None => (
                    Duration::ZERO,
                    Err(ApiError::Transport(format!("no mock route for {}", url))),
                ),
            }
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        fn get(&self, url: &str) -> BoxFuture<'_, Result<Bytes, ApiError>> {
            let (delay, response) = self.answer(url, None);
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                response
            })
        }

        fn post_json(
            &self,
            url: &str,
            body: serde_json::Value,
        ) -> BoxFuture<'_, Result<Bytes, ApiError>> {
            let lens = body
                .get("cultural_lens")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let (delay, response) = self.answer(url, lens.as_deref());
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                response
            })
        }

        fn post_multipart(&self, url: &str, _file: Bytes) -> BoxFuture<'_, Result<Bytes, ApiError>> {
            let (delay, response) = self.answer(url, None);
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                response
            })
        }
    }

    fn client_with(mock: &MockHttpClient) -> ApiClient {
        ApiClient::new("http://localhost:8000", Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_analyze_image_decodes_recognition() {
        let mock = MockHttpClient::new();
        mock.route_json(
            "/analyze/image",
            serde_json::json!({
                "object_id": "colosseum",
                "confidence": 0.92,
                "visual_tags": ["roman", "amphitheater"]
            }),
        );

        let result = client_with(&mock)
            .analyze_image(Bytes::from_static(b"raw image"))
            .await
            .unwrap();
        assert_eq!(result.object_id, "colosseum");
        assert_eq!(result.confidence, Some(0.92));
        assert_eq!(result.visual_tags.len(), 2);
    }

    #[tokio::test]
    async fn test_backend_error_body_is_surfaced() {
        let mock = MockHttpClient::new();
        mock.route_json(
            "/analyze/image",
            serde_json::json!({"error": "Landmark not found"}),
        );

        let result = client_with(&mock)
            .analyze_image(Bytes::from_static(b"raw image"))
            .await;
        assert!(matches!(result, Err(ApiError::Backend(msg)) if msg.contains("not found")));
    }

    #[tokio::test]
    async fn test_interpret_posts_request_body() {
        let mock = MockHttpClient::new();
        mock.route_json(
            "/interpret",
            serde_json::json!({
                "object_id": "petra",
                "facts": {"name": "Petra", "location": "Jordan"},
                "interpretation": {
                    "perspective": "Academic/Neutral",
                    "narrative": "Carved city.",
                    "emotional_context": "Objective analysis"
                }
            }),
        );

        let request = InterpretationRequest {
            object_id: "petra".into(),
            cultural_lens: "neutral".into(),
            user_context: None,
        };
        let response = client_with(&mock).interpret(&request).await.unwrap();
        assert_eq!(response.facts.name, "Petra");
        assert_eq!(mock.hits("/interpret"), 1);
    }

    #[tokio::test]
    async fn test_narrate_returns_raw_bytes() {
        let mock = MockHttpClient::new();
        mock.route("/audio/narrate", Ok(Bytes::from_static(b"mp3 bytes")));

        let request = NarrationRequest {
            object_id: "petra".into(),
            language: "english".into(),
            cultural_lens: "neutral".into(),
        };
        let clip = client_with(&mock).narrate(&request).await.unwrap();
        assert_eq!(clip.as_ref(), b"mp3 bytes");
    }

    #[tokio::test]
    async fn test_narrate_error_body_is_not_a_clip() {
        // TTS failures come back as 200 with a JSON error body; those bytes
        // must never be treated as audio.
        let mock = MockHttpClient::new();
        mock.route_json(
            "/audio/narrate",
            serde_json::json!({"error": "Failed to generate audio", "text": "fallback text"}),
        );

        let request = NarrationRequest {
            object_id: "petra".into(),
            language: "english".into(),
            cultural_lens: "neutral".into(),
        };
        let result = client_with(&mock).narrate(&request).await;
        assert!(
            matches!(result, Err(ApiError::Backend(msg)) if msg.contains("generate audio"))
        );
    }

    #[tokio::test]
    async fn test_narrate_http_failure_is_error() {
        let mock = MockHttpClient::new();
        mock.route(
            "/audio/narrate",
            Err(ApiError::Http {
                status: 500,
                url: "http://localhost:8000/audio/narrate".into(),
            }),
        );

        let request = NarrationRequest {
            object_id: "petra".into(),
            language: "english".into(),
            cultural_lens: "neutral".into(),
        };
        let result = client_with(&mock).narrate(&request).await;
        assert!(matches!(result, Err(ApiError::Http { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_lens_listing() {
        let mock = MockHttpClient::new();
        mock.route_json(
            "/lenses",
            serde_json::json!({"lenses": [
                {"id": "neutral", "name": "Neutral/Academic"},
                {"id": "local", "name": "Local Community"}
            ]}),
        );

        let lenses = client_with(&mock).lenses().await.unwrap();
        assert_eq!(lenses.len(), 2);
        assert_eq!(lenses[0].id, "neutral");
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let mock = MockHttpClient::new();
        mock.route_json("/audio/languages", serde_json::json!({"languages": ["english"]}));

        let client = ApiClient::new("http://localhost:8000/", Arc::new(mock.clone()));
        let languages = client.audio_languages().await.unwrap();
        assert_eq!(languages, vec!["english".to_string()]);
    }
}
