//! Data module - Download, parsing, cleaning, persistence and loading

mod cleaner;
pub mod fetcher;
pub mod frame;
pub mod loader;
pub mod parser;
mod record;
pub mod schema;
mod writer;

pub use cleaner::{truncate, CleanError, CleanTable, CleaningReport, DataCleaner};
pub use fetcher::{Fetcher, NetworkError};
pub use loader::{DataLoader, LoaderError};
pub use parser::{parse, ParseError};
pub use record::{CleanValue, RawTable, RawTaxRecord, RawValue, TaxRecord};
pub use schema::{Column, ColumnKind, FillDefaults, FillValue, MissingColumnError};
pub use writer::{persist, PersistError};
