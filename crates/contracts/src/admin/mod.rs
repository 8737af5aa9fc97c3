pub mod list;
pub mod record;

pub use list::{parse_record_page, ListQuery, Page, SelectOption, SortDirection};
pub use record::{display_text, path_lookup, record_id, Record, ID_FIELD};
