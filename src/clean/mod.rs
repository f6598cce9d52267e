pub mod policy;
pub mod table;
pub mod value;

pub use policy::{PlausibleRange, RangePolicy, RangeTable, StatFamily};
pub use table::{clean_table, CleanReport, ColumnReport, ScrapedTable};
pub use value::{normalize_value, Normalizer, SplitPreference};
