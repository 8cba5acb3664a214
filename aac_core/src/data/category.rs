use super::{
    assoc::{AssocArray, AssocError},
    BoardError, ImageRef,
};

/// A named group of items, each mapping an image to the text spoken when that
/// image is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// A short name for the category, e.g. "food"
    name: String,
    items: AssocArray<ImageRef, String>,
}

impl Category {
    /// Creates a category with the given name and no items.
    pub fn new(name: impl Into<String>) -> Self {
        Category { name: name.into(), items: AssocArray::new() }
    }

    /// Adds an item to the category, replacing the text of the item if the
    /// image is already present. Fails only if the image reference is empty;
    /// callers that never pass one may ignore the result.
    pub fn add_item(
        &mut self,
        image: impl Into<ImageRef>,
        text: impl Into<String>,
    ) -> Result<(), AssocError> {
        self.items.set(image.into(), text.into())
    }

    /// Returns the images of every item in the category, in storage order.
    pub fn image_locs(&self) -> Vec<&ImageRef> {
        self.items.keys()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the text associated with the given image.
    pub fn select(&self, image: &str) -> Result<&str, BoardError> {
        self.items
            .get(image)
            .map(String::as_str)
            .map_err(|_| BoardError::ItemNotFound(ImageRef::from(image)))
    }

    pub fn has_image(&self, image: &str) -> bool {
        self.items.has_key(image)
    }

    pub fn items(&self) -> &AssocArray<ImageRef, String> {
        &self.items
    }
}
