//! Download directory access
//!
//! This crate owns the download root: resolving user-supplied names inside
//! it, listing what has been downloaded, and removing files.

mod error;
mod listing;
mod root;

pub use error::{StorageError, StorageResult};
pub use listing::{list_files, FileEntry, ListMode, LATEST_LIMIT};
pub use root::{DownloadRoot, COMPRESSED_PREFIX};
