use super::error::PhraseError;

/// One row of learning material: a phrase and its translation.
///
/// Both sides are trimmed on construction and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePair {
    source_text: String,
    target_text: String,
}

impl PhrasePair {
    pub fn new(source_text: &str, target_text: &str) -> Result<Self, PhraseError> {
        let source_text = source_text.trim();
        let target_text = target_text.trim();

        if source_text.is_empty() {
            return Err(PhraseError::EmptySource);
        }
        if target_text.is_empty() {
            return Err(PhraseError::EmptyTarget);
        }

        Ok(Self {
            source_text: source_text.to_string(),
            target_text: target_text.to_string(),
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target_text(&self) -> &str {
        &self.target_text
    }
}
