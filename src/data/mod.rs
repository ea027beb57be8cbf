pub mod date;
pub mod loader;
pub mod record;

pub use loader::{load_dataset, load_from_reader};
pub use record::{month_abbrev, parse_month_label, Transaction};
