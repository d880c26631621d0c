pub mod grammar;
pub mod io;
pub mod library;
pub mod models;
pub mod utils;
