#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhraseError {
    #[error("source phrase is empty")]
    EmptySource,
    #[error("target phrase is empty")]
    EmptyTarget,
}
