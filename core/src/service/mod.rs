pub mod aggregate;
pub mod comparison;
pub mod export;
pub mod format;
