pub mod file;
pub mod sheet;
pub mod traits;

// Re-export
pub use file::FileSalesRepository;
pub use sheet::GoogleSheetRepository;
pub use traits::SalesRepository;
