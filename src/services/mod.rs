pub mod distribution;
pub mod file_copy;
pub mod reference_scanner;
pub mod text_shift;

pub use distribution::{build_distribution, normalize_main_document, DistributionReport};
pub use file_copy::{copy_all, prepare_output_root, FileCopyConfig, FileCopyReport};
pub use reference_scanner::{scan_document, FigureScan, ReferenceScanner, ScanReport};
pub use text_shift::{shift, DEFAULT_SHIFT};
