//! Caller-side session state: the picture gallery and the title field.
//!
//! Pictures are append-only; insertion order doubles as display order and
//! as the download index. The title field keeps the placeholder strictly
//! separate from the user's text so the placeholder string can never end
//! up persisted as a real title.

use crate::error::{Error, Result};
use crate::rendering::encode;
use crate::CapturedPicture;

/// Prompt shown while the title field is untouched
pub const TITLE_PLACEHOLDER: &str = "slaaaaap!";

/// Explicit state machine for the picture title textbox
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TitleField {
    /// Never edited; the UI shows the placeholder
    #[default]
    EmptyUntouched,
    /// The user typed something (possibly later cleared back to "")
    UserEdited(String),
}

impl TitleField {
    /// Record user input
    pub fn edit(&mut self, text: impl Into<String>) {
        *self = TitleField::UserEdited(text.into());
    }

    /// Reset to the untouched state
    pub fn clear(&mut self) {
        *self = TitleField::EmptyUntouched;
    }

    /// The actual title text; never the placeholder
    pub fn text(&self) -> &str {
        match self {
            TitleField::EmptyUntouched => "",
            TitleField::UserEdited(text) => text,
        }
    }

    /// The placeholder to display, if any
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            TitleField::EmptyUntouched => Some(TITLE_PLACEHOLDER),
            TitleField::UserEdited(_) => None,
        }
    }
}

/// An ordered, append-only collection of captured pictures
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    pictures: Vec<CapturedPicture>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a picture; it keeps its position forever
    pub fn push(&mut self, picture: CapturedPicture) {
        self.pictures.push(picture);
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CapturedPicture> {
        self.pictures.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedPicture> {
        self.pictures.iter()
    }

    /// Download filename for the picture at `index` (1-based on disk)
    pub fn download_filename(index: usize) -> String {
        format!("slap-pic-{}.png", index + 1)
    }

    /// Decode the picture at `index` back into `(filename, PNG bytes)` for
    /// a download affordance
    pub fn export(&self, index: usize) -> Result<(String, Vec<u8>)> {
        let picture = self
            .get(index)
            .ok_or_else(|| Error::Config(format!("no picture at index {}", index)))?;
        let bytes = encode::from_data_uri(&picture.data_uri)?;
        Ok((Self::download_filename(index), bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture(title: &str) -> CapturedPicture {
        CapturedPicture {
            data_uri: "data:image/png;base64,aGVsbG8=".to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn gallery_preserves_insertion_order() {
        let mut gallery = Gallery::new();
        gallery.push(picture("first"));
        gallery.push(picture("second"));
        let titles: Vec<_> = gallery.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn download_filenames_are_one_based() {
        assert_eq!(Gallery::download_filename(0), "slap-pic-1.png");
        assert_eq!(Gallery::download_filename(11), "slap-pic-12.png");
    }

    #[test]
    fn export_recovers_the_encoded_bytes() {
        let mut gallery = Gallery::new();
        gallery.push(picture("pic"));
        let (name, bytes) = gallery.export(0).unwrap();
        assert_eq!(name, "slap-pic-1.png");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn export_out_of_range_is_an_error() {
        let gallery = Gallery::new();
        assert!(gallery.export(0).is_err());
    }

    #[test]
    fn placeholder_never_leaks_into_the_title() {
        let mut field = TitleField::default();
        assert_eq!(field.prompt(), Some(TITLE_PLACEHOLDER));
        assert_eq!(field.text(), "");

        field.edit("my slap");
        assert_eq!(field.prompt(), None);
        assert_eq!(field.text(), "my slap");

        field.clear();
        assert_eq!(field.prompt(), Some(TITLE_PLACEHOLDER));
        assert_eq!(field.text(), "");
    }
}
