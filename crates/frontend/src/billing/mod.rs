pub mod api;
pub mod specifics;
pub mod view;
pub mod view_model;
