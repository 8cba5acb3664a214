use crate::data::{board::Board, category::Category, BoardError, ImageRef};

/// The operations that a display uses to drive a page of images: asking which
/// images to show, reacting to a selection, and adding new images.
pub trait Page {
    /// Handles the selection of an image, returning the text to speak (which
    /// is empty when the selection only changes what is shown).
    fn select(&mut self, image: &str) -> Result<&str, BoardError>;

    /// Returns the images to show.
    fn image_locs(&self) -> Vec<&ImageRef>;

    /// Adds an image to the page.
    fn add_item(&mut self, image: ImageRef, text: String) -> Result<(), BoardError>;

    /// Returns the name of what is shown, or the empty string for the top
    /// level of a board.
    fn category_name(&self) -> &str;

    fn has_image(&self, image: &str) -> bool;
}

impl Page for Category {
    fn select(&mut self, image: &str) -> Result<&str, BoardError> {
        Category::select(self, image)
    }

    fn image_locs(&self) -> Vec<&ImageRef> {
        Category::image_locs(self)
    }

    fn add_item(&mut self, image: ImageRef, text: String) -> Result<(), BoardError> {
        Category::add_item(self, image, text).map_err(|_| BoardError::InvalidKey)
    }

    fn category_name(&self) -> &str {
        self.name()
    }

    fn has_image(&self, image: &str) -> bool {
        Category::has_image(self, image)
    }
}

impl Page for Board {
    fn select(&mut self, image: &str) -> Result<&str, BoardError> {
        Board::select(self, image)
    }

    fn image_locs(&self) -> Vec<&ImageRef> {
        Board::image_locs(self)
    }

    fn add_item(&mut self, image: ImageRef, text: String) -> Result<(), BoardError> {
        Board::add_item(self, image, text)
    }

    fn category_name(&self) -> &str {
        Board::category_name(self)
    }

    fn has_image(&self, image: &str) -> bool {
        Board::has_image(self, image)
    }
}
