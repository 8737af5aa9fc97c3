pub mod confirm_dialog;
pub mod pagination_controls;
pub mod search_input;
pub mod select_or_create;

pub use confirm_dialog::ConfirmDialog;
pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use select_or_create::SearchableSelectOrCreate;
