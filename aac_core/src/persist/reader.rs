use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, info, warn};

use crate::data::{assoc::AssocArray, board::Board, category::Category, ImageRef};

use super::{split_record, MalformedReason, PersistError, ITEM_MARKER};

// The category that item lines are currently attached to.
enum Context {
    /// No category line has been read yet.
    Start,
    Category(ImageRef),
    /// The last category line could not be stored, so its items are dropped.
    Skipped,
}

impl Board {
    /// Loads a board from the file at `path`. The board starts at the top
    /// level.
    ///
    /// Fails if the file cannot be opened or is malformed. A failure while
    /// reading is treated as the end of the file; whatever was read up to that
    /// point is kept.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| PersistError::Io { path: path.to_path_buf(), source })?;
        let board = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), categories = board.categories().size(), "loaded board");
        Ok(board)
    }

    /// Parses a board from its text format. See [`crate::persist`].
    pub fn from_reader(reader: impl BufRead) -> Result<Self, PersistError> {
        let mut categories = AssocArray::<ImageRef, Category>::new();
        let mut context = Context::Start;

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    warn!(line = line_number, %error, "stopped reading board early");
                    break;
                }
            };
            debug!(line = line_number, content = %line, "processing");

            if line.is_empty() {
                continue;
            }

            if let Some(record) = line.strip_prefix(ITEM_MARKER) {
                let (image, text) = split_record(record, line_number)?;
                let category = match &context {
                    Context::Start => {
                        return Err(PersistError::MalformedFile {
                            line: line_number,
                            reason: MalformedReason::ItemBeforeCategory,
                        });
                    }
                    Context::Skipped => {
                        warn!(line = line_number, image, "dropping item of skipped category");
                        continue;
                    }
                    Context::Category(key) => categories
                        .get_mut(key.as_str())
                        .expect("the context category was stored when its line was read"),
                };
                if category.add_item(image, text).is_err() {
                    warn!(line = line_number, "skipping item with empty image reference");
                }
            } else {
                let (image, name) = split_record(&line, line_number)?;
                let image = ImageRef::from(image);
                context = match categories.set(image.clone(), Category::new(name)) {
                    Ok(()) => Context::Category(image),
                    Err(_) => {
                        warn!(line = line_number, "skipping category with empty image reference");
                        Context::Skipped
                    }
                };
            }
        }

        Ok(Board::from_categories(categories))
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Cursor, Read};

    use super::*;

    const SAMPLE: &str = "img/food/plate.png food\n\
                          >img/food/fries.png french fries\n\
                          >img/food/watermelon.png watermelon\n\
                          img/clothing/hanger.png clothing\n\
                          >img/clothing/shirt.png collared shirt\n";

    fn parse(text: &str) -> Result<Board, PersistError> {
        Board::from_reader(Cursor::new(text))
    }

    fn locs(board: &Board) -> Vec<&str> {
        board.image_locs().into_iter().map(ImageRef::as_str).collect()
    }

    #[test]
    fn sample_file() {
        let mut board = parse(SAMPLE).unwrap();
        assert!(board.is_top());
        assert_eq!(locs(&board), vec!["img/food/plate.png", "img/clothing/hanger.png"]);

        assert_eq!(board.select("img/food/plate.png"), Ok(""));
        assert_eq!(board.category_name(), "food");
        assert_eq!(locs(&board), vec!["img/food/fries.png", "img/food/watermelon.png"]);
        assert_eq!(board.select("img/food/fries.png"), Ok("french fries"));

        board.reset();
        board.select("img/clothing/hanger.png").unwrap();
        assert_eq!(board.select("img/clothing/shirt.png"), Ok("collared shirt"));
    }

    #[test]
    fn blank_lines_and_crlf() {
        let board =
            parse("\nimg/a.png animals\r\n\r\n>img/a/cat.png a cat\r\n\n>img/a/dog.png dog\n")
                .unwrap();
        let animals = board.categories().get("img/a.png").unwrap();
        assert_eq!(animals.name(), "animals");
        assert_eq!(animals.select("img/a/cat.png"), Ok("a cat"));
        assert_eq!(animals.select("img/a/dog.png"), Ok("dog"));
    }

    #[test]
    fn item_before_category() {
        let result = parse(">img/x.png text\n");
        assert!(matches!(
            result,
            Err(PersistError::MalformedFile { line: 1, reason: MalformedReason::ItemBeforeCategory })
        ));
    }

    #[test]
    fn missing_delimiter_is_malformed() {
        let result = parse("img/a.png animals\n>img/a/cat.png\n");
        assert!(matches!(
            result,
            Err(PersistError::MalformedFile { line: 2, reason: MalformedReason::MissingDelimiter })
        ));
    }

    #[test]
    fn repeated_category_replaces_earlier_one() {
        let board = parse("img/a.png animals\n>img/a/cat.png cat\nimg/a.png pets\n>img/a/dog.png dog\n")
            .unwrap();
        assert_eq!(board.categories().size(), 1);
        let pets = board.categories().get("img/a.png").unwrap();
        assert_eq!(pets.name(), "pets");
        assert!(!pets.has_image("img/a/cat.png"));
        assert!(pets.has_image("img/a/dog.png"));
    }

    #[test]
    fn empty_image_references_are_skipped() {
        let board = parse(" nameless\n>img/x.png dropped\nimg/a.png animals\n> blank\n>img/a/cat.png cat\n")
            .unwrap();
        assert_eq!(board.categories().size(), 1);
        let animals = board.categories().get("img/a.png").unwrap();
        assert_eq!(animals.image_locs(), vec![&ImageRef::from("img/a/cat.png")]);
    }

    // Yields its data, then fails instead of reporting the end of input.
    struct FailingAfter<'a> {
        data: &'a [u8],
    }

    impl Read for FailingAfter<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "device unplugged"));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn read_failure_keeps_parsed_lines() {
        let reader = BufReader::new(FailingAfter { data: SAMPLE.as_bytes() });
        let board = Board::from_reader(reader).unwrap();
        assert_eq!(board.categories().size(), 2);
        let clothing = board.categories().get("img/clothing/hanger.png").unwrap();
        assert_eq!(clothing.select("img/clothing/shirt.png"), Ok("collared shirt"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(Board::load(&path), Err(PersistError::Io { .. })));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.txt");
        std::fs::write(&path, SAMPLE).unwrap();
        let board = Board::load(&path).unwrap();
        assert_eq!(board, parse(SAMPLE).unwrap());
    }
}
