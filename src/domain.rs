//! Domain module - chart entry entities
//!
//! Plain data shared by the parsing, crawling and export layers.

pub mod movie;

pub use movie::{MovieRecord, MovieRow, MOVIE_COLUMNS};
