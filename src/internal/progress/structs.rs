pub mod progress_report;
pub mod transfer_snapshot;

pub use progress_report::{ProgressReport, BYTES_PER_MB};
pub use transfer_snapshot::TransferSnapshot;
