//! Resource merging, lookup and interpolation.

mod facade;
mod loader;
mod merge;
mod path;
mod store;
mod template;

use std::sync::Arc;

use parking_lot::RwLock;

pub use facade::{FacadeNode, FacadeValue};
pub use loader::{append_suffix, FileLoader, LoadError, MemoryLoader, ResourceLoader};
pub use merge::{merge, same_shape, MergePolicy};
pub use path::{nested_object, resolve};
pub use store::{LanguagePolicy, ResourceStore};
pub use template::{format_text, stringify, MISSING_PARAM};

/// Store handle shared between a context and the facades built from it.
///
/// Writers take the write lock for the whole merge, so concurrent
/// `set_resource` calls are applied one at a time.
pub type SharedStore = Arc<RwLock<ResourceStore>>;
