pub mod color;
pub mod io;
pub mod models;
