//! Interpretation backend interface.
//!
//! Everything the client core knows about the remote service: wire types,
//! the transport trait, and the typed endpoint client. The backend itself is
//! an opaque collaborator; none of its interpretation logic lives here.

mod client;
mod error;
mod types;

pub use client::{ApiClient, AsyncHttpClient, BoxFuture, ReqwestClient};
pub use error::ApiError;
pub use types::{
    BiasReport, CommunitySentiment, Interpretation, InterpretationRequest,
    InterpretationResponse, LandmarkFacts, LensInfo, NarrationRequest, RecognitionResult,
    UserContext,
};

#[cfg(test)]
pub use client::tests::MockHttpClient;
