use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::data::{board::Board, category::Category, ImageRef};

use super::{PersistError, FIELD_DELIMITER, ITEM_MARKER};

impl Board {
    /// Writes every category of the board to the file at `path`, replacing
    /// its contents, and returns how many categories were written. The open
    /// category, if any, is not affected.
    ///
    /// Fails if the file cannot be created or flushed. A category that cannot
    /// be written is skipped; the others are still written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, PersistError> {
        let path = path.as_ref();
        let io_error = |source| PersistError::Io { path: path.to_path_buf(), source };

        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        let written = self.write_to(&mut writer);
        writer.flush().map_err(io_error)?;

        info!(path = %path.display(), categories = written, "saved board");
        Ok(written)
    }

    /// Writes every category of the board in its text format. See
    /// [`crate::persist`]. Returns how many categories were written.
    ///
    /// A category is skipped, and not counted, if it or one of its items
    /// cannot be represented in the format or if writing it fails. Nothing is
    /// written for an unrepresentable category, but a write that fails partway
    /// may leave a truncated record in `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> usize {
        let mut written = 0;
        for (image, category) in self.categories().iter() {
            match write_category(&mut writer, image, category) {
                Ok(()) => written += 1,
                Err(error) => {
                    warn!(%image, %error, "skipping category that could not be written")
                }
            }
        }
        written
    }
}

// Writes the category line followed by one line per item, all at once. Fails
// with `InvalidInput` before writing anything if a line would not read back as
// written.
fn write_category(
    writer: &mut impl Write,
    image: &ImageRef,
    category: &Category,
) -> io::Result<()> {
    if image.as_str().starts_with(ITEM_MARKER) {
        let message = format!("category image `{image}` starts with `{ITEM_MARKER}`");
        return Err(unrepresentable(message));
    }
    check_image(image)?;
    check_text(category.name())?;
    for (item, text) in category.items().iter() {
        check_image(item)?;
        check_text(text)?;
    }

    let mut record = format!("{image}{FIELD_DELIMITER}{}\n", category.name());
    for (item, text) in category.items().iter() {
        record.push(ITEM_MARKER);
        record.push_str(item.as_str());
        record.push(FIELD_DELIMITER);
        record.push_str(text);
        record.push('\n');
    }
    writer.write_all(record.as_bytes())
}

// An image reference ends at the first delimiter and must stay on one line.
fn check_image(image: &ImageRef) -> io::Result<()> {
    if image.as_str().contains([FIELD_DELIMITER, '\n', '\r']) {
        return Err(unrepresentable(format!("image `{image}` contains a space or line break")));
    }
    Ok(())
}

fn check_text(text: &str) -> io::Result<()> {
    if text.contains(['\n', '\r']) {
        return Err(unrepresentable(format!("text {text:?} contains a line break")));
    }
    Ok(())
}

fn unrepresentable(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}
