pub mod record;
pub mod storage;
pub mod traits;

// Re-export
pub use record::{BlobRecordRepository, FileRecordRepository};
pub use storage::{BlobStorage, FileBlobStorage, MemoryBlobStorage};
pub use traits::RecordRepository;
