use std::{borrow::Borrow, fmt};

use thiserror::Error;

pub mod assoc;
pub mod board;
pub mod category;

/// Identifies a selectable image on the board, e.g. `img/food/plate.png`. Used
/// as the key at both levels of the board: for categories at the top, and for
/// the items within a category.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(location: impl Into<String>) -> Self {
        ImageRef(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(location: &str) -> Self {
        ImageRef(location.to_owned())
    }
}

impl From<String> for ImageRef {
    fn from(location: String) -> Self {
        ImageRef(location)
    }
}

impl Borrow<str> for ImageRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marks the designated "absent" value of a key type. Sentinel keys can never
/// be stored in an `AssocArray` and never match a lookup.
pub trait Sentinel {
    fn is_sentinel(&self) -> bool;
}

impl Sentinel for str {
    fn is_sentinel(&self) -> bool {
        self.is_empty()
    }
}

impl Sentinel for String {
    fn is_sentinel(&self) -> bool {
        self.is_empty()
    }
}

impl Sentinel for ImageRef {
    fn is_sentinel(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Sentinel for Option<T> {
    fn is_sentinel(&self) -> bool {
        self.is_none()
    }
}

impl<T: Sentinel + ?Sized> Sentinel for &T {
    fn is_sentinel(&self) -> bool {
        (**self).is_sentinel()
    }
}

/// Error type for selecting and adding items on a board or category.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BoardError {
    /// The image is not shown on the current page.
    #[error("no image `{0}` on the current page")]
    ItemNotFound(ImageRef),
    /// The image reference is empty and cannot name an item.
    #[error("an empty image reference cannot name an item")]
    InvalidKey,
}
