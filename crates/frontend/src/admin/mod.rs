//! Schema-driven admin tables: one generic data grid, configured per entity
//! through a declarative tab descriptor.

pub mod api;
pub mod descriptor;
pub mod form;
pub mod registry;
pub mod rows;
pub mod seq;
pub mod state;
pub mod table;
pub mod tabs;
