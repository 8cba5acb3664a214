use tracing::debug;

use super::{assoc::AssocArray, category::Category, BoardError, ImageRef};

/// A two-level communication board. The top level shows one image per
/// category; selecting one of them opens that category, whose images speak
/// their text when selected.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Board {
    categories: AssocArray<ImageRef, Category>,
    /// The key of the open category, or None when the top level is shown.
    /// Always a key of `categories` when set, since categories are never
    /// removed from a board.
    current: Option<ImageRef>,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    /// Creates a board showing the top level of the given categories.
    pub fn from_categories(categories: AssocArray<ImageRef, Category>) -> Self {
        Board { categories, current: None }
    }

    pub fn categories(&self) -> &AssocArray<ImageRef, Category> {
        &self.categories
    }

    /// Returns whether the top level is shown, rather than a category.
    pub fn is_top(&self) -> bool {
        self.current.is_none()
    }

    /// Handles the selection of an image. At the top level, the image must
    /// name a category, which is opened; nothing is to be spoken, so the
    /// result is the empty string. Within a category, returns the text of the
    /// selected item and stays in the category.
    pub fn select(&mut self, image: &str) -> Result<&str, BoardError> {
        if self.is_top() {
            if !self.categories.has_key(image) {
                return Err(BoardError::ItemNotFound(ImageRef::from(image)));
            }
            debug!(category = image, "opening category");
            self.current = Some(ImageRef::from(image));
            return Ok("");
        }

        self.current_category()
            .ok_or_else(|| BoardError::ItemNotFound(ImageRef::from(image)))?
            .select(image)
    }

    /// Returns the images shown on the current page.
    pub fn image_locs(&self) -> Vec<&ImageRef> {
        match self.current_category() {
            Some(category) => category.image_locs(),
            None => self.categories.keys(),
        }
    }

    /// Returns to the top level.
    pub fn reset(&mut self) {
        if let Some(current) = self.current.take() {
            debug!(category = %current, "returning to top level");
        }
    }

    /// Adds an image to the current page. At the top level this creates an
    /// empty category named `text`; an existing category under the same image
    /// is replaced along with all of its items. Within a category this adds
    /// (or replaces) an item.
    ///
    /// Fails with `InvalidKey` for an empty image reference, leaving the board
    /// unchanged. Callers that treat this as a harmless mistake may ignore the
    /// result.
    pub fn add_item(
        &mut self,
        image: impl Into<ImageRef>,
        text: impl Into<String>,
    ) -> Result<(), BoardError> {
        let image = image.into();
        let text = text.into();
        if self.is_top() {
            debug!(%image, name = %text, "adding category");
            return self
                .categories
                .set(image, Category::new(text))
                .map_err(|_| BoardError::InvalidKey);
        }

        let category = self.current_category_mut().ok_or(BoardError::InvalidKey)?;
        category.add_item(image, text).map_err(|_| BoardError::InvalidKey)
    }

    /// Returns the name of the open category, or the empty string at the top
    /// level.
    pub fn category_name(&self) -> &str {
        self.current_category().map_or("", Category::name)
    }

    /// Returns whether the image is shown on the current page.
    pub fn has_image(&self, image: &str) -> bool {
        match self.current_category() {
            Some(category) => category.has_image(image),
            None => self.categories.has_key(image),
        }
    }

    fn current_category(&self) -> Option<&Category> {
        let current = self.current.as_ref()?;
        self.categories.get(current.as_str()).ok()
    }

    fn current_category_mut(&mut self) -> Option<&mut Category> {
        let current = self.current.as_ref()?;
        self.categories.get_mut(current.as_str()).ok()
    }
}
