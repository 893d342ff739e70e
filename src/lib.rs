mod errors;
mod panel;
mod preferences;
mod store;
pub mod testing;
mod types;

pub use errors::*;
pub use panel::{ContextPanel, Phase, RenderView, LOAD_FAILED_MESSAGE};
pub use preferences::PreferenceSliders;
pub use store::{ContextStore, HttpContextStore, HttpContextStoreOptions};
pub use types::*;
