//! Tile model tests.


/// Unit tests for tile descriptor words.
pub mod desc;
