pub mod defaults;
pub mod loader;
pub mod types;

pub use defaults::{default_records, default_table};
pub use loader::{default_table_path, load_table, read_table, save_table_csv};
pub use types::{ReferenceTable, TableError, TechnologyRecord, COLUMNS};
