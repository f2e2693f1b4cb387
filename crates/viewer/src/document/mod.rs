//! Document state: the store with its three projections, the headless
//! editor buffer, and the throttled translation patch bridge.

mod editor;
mod patch;
mod store;

pub use editor::{EditorBuffer, HIGHLIGHT_DURATION};
pub use patch::{PatchBridge, PatchRequest, PATCH_THROTTLE};
pub use store::{DocumentStore, LoadToken};
