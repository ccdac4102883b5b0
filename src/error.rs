/// Errors raised while converting a Markdown document.
///
/// Every variant is terminal for the conversion that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An inline delimiter was opened but never closed.
    #[error("invalid Markdown syntax: unterminated `{delimiter}` in {text:?}")]
    MalformedMarkdown { delimiter: String, text: String },

    /// A node broke its structural contract.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("leaf node has no value")]
    ValueMissing,

    /// The first block of the document is not a level-1 heading.
    #[error("no title found: document must start with a `# ` heading")]
    TitleNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
