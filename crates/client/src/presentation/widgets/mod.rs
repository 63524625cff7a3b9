pub mod footer;
pub mod header;
pub mod map_grid;
pub mod side_panel;
