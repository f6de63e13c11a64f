//! CultureLens client core: capture-to-interpretation pipeline.
//!
//! The crate takes a user from a captured or uploaded landmark photo to a
//! culturally-situated interpretation with optional audio narration:
//!
//! - [`coord`] projects landmark coordinates onto the map canvas.
//! - [`landmarks`] carries the built-in world heritage catalog.
//! - [`api`] speaks to the interpretation backend over HTTP.
//! - [`capture`] manages the upload/live-camera acquisition session.
//! - [`interpret`] fetches and caches (object, lens) interpretations with
//!   protection against out-of-order responses.
//! - [`narration`] fetches and plays audio narration, one clip at a time.
//! - [`app`] assembles everything behind [`app::CultureLens`].

pub mod api;
pub mod app;
pub mod capture;
pub mod coord;
pub mod interpret;
pub mod landmarks;
pub mod narration;

pub use api::{ApiClient, ApiError};
pub use app::{AppConfig, AppError, CultureLens};
pub use capture::{CaptureError, CaptureMode, CaptureSession};
pub use coord::{project, PlotCoordinate};
pub use interpret::{InterpretationKey, InterpretationState, InterpretationStore};
pub use landmarks::{LandmarkCatalog, LandmarkGeo};
pub use narration::{Language, NarrationController, NarrationError};
