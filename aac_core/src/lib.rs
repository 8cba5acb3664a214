//! Core of a two-level communication board: categories of images, each image
//! mapped to the text that is spoken when it is selected.

pub mod data;
pub mod page;
pub mod persist;

pub use data::{
    assoc::{AssocArray, AssocError, DEFAULT_CAPACITY},
    board::Board,
    category::Category,
    BoardError, ImageRef, Sentinel,
};
pub use page::Page;
pub use persist::{MalformedReason, PersistError};
