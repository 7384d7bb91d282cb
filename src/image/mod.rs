//! Conversion between 8-bit grayscale images and [`ScalarGrid`](crate::grid::ScalarGrid).

pub mod io;

pub use io::{
    grid_from_luma, grid_to_luma, load_grayscale_grid, save_grayscale_grid, write_json_file,
};
