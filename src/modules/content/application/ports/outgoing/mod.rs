pub mod clock;
pub mod key_value_store;
pub mod markdown_renderer;
pub mod remote_store;

pub use clock::{Clock, SystemClock};
pub use key_value_store::{KeyValueStore, StorageError};
pub use markdown_renderer::{MarkdownRenderer, RenderError};
pub use remote_store::{RemoteStore, RemoteStoreError};
