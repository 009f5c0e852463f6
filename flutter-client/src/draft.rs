use flutter_common::model::post::{InvalidPostBodyError, PostBody};

/// Unsaved body text bound to an open edit form.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Draft {
    text: String,
}

impl Draft {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The body this draft would commit.
    pub fn validate(&self) -> Result<PostBody, InvalidPostBodyError> {
        PostBody::new(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::draft::Draft;

    #[test]
    fn validate_requires_text() {
        let mut draft = Draft::new("old");
        assert_eq!(draft.validate().unwrap().get(), "old");

        draft.set("");
        assert!(draft.validate().is_err());
        assert_eq!(draft.text(), "");
    }
}
