pub mod config;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use model::record::DailyRecord;
pub use model::history::{HistoryPeriod, Metric};
pub use repository::{RecordRepository, BlobStorage, FileRecordRepository, FileBlobStorage, MemoryBlobStorage};
pub use input::{is_numeric_input, parse_metric_value, expand_key};
pub use time::{date_key, parse_date_key, today};
pub use service::record_service::{RecordService, SaveOutcome};
pub use service::dto::{HistoryReport, PeriodStats, SeriesPoint};
pub use usecase::history::{aggregate, HistoryUseCase};
