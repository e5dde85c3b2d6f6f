//! Error types for the Quire core library.

/// Errors that can occur while retrieving or processing a document.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Required identifiers or credentials are missing or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The document could not be retrieved.
    #[error("Retrieval error: {message}")]
    Retrieval {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The structured record parser rejected the text.
    #[error("Grammar error on line {line}: {message}")]
    Grammar {
        /// 1-based line number within the parsed text
        line: usize,
        /// What went wrong
        message: String,
    },

    /// The markup renderer failed.
    #[error("Render error: {message}")]
    Render {
        /// What went wrong
        message: String,
    },

    /// A single tab failed; wraps the underlying grammar or render error.
    #[error("Tab '{title}' ({id}) failed: {source}")]
    Tab {
        /// Tab identifier
        id: String,
        /// Tab title
        title: String,
        /// The failure inside the tab pipeline
        #[source]
        source: Box<Error>,
    },

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Quire operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error concerns a single tab only.
    ///
    /// Tab-scoped failures leave the other tabs of the document processable,
    /// so callers may log them and continue. Everything else is fatal for
    /// the whole run.
    pub fn is_tab_scoped(&self) -> bool {
        match self {
            Error::Grammar { .. } => true,
            Error::Render { .. } => true,
            Error::Tab { .. } => true,
            Error::Config { .. } => false,
            Error::Retrieval { .. } => false,
            Error::Io(_) => false,
            Error::Serialization(_) => false,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new retrieval error with a message.
    pub fn retrieval<S: Into<String>>(message: S) -> Self {
        Error::Retrieval {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new retrieval error with a message and source error.
    pub fn retrieval_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Retrieval {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new grammar error at a 1-based line number.
    pub fn grammar<S: Into<String>>(line: usize, message: S) -> Self {
        Error::Grammar {
            line,
            message: message.into(),
        }
    }

    /// Creates a new render error.
    pub fn render<S: Into<String>>(message: S) -> Self {
        Error::Render {
            message: message.into(),
        }
    }

    /// Wraps an error with the identity of the tab it occurred in.
    pub fn in_tab<I, T>(self, id: I, title: T) -> Self
    where
        I: Into<String>,
        T: Into<String>,
    {
        Error::Tab {
            id: id.into(),
            title: title.into(),
            source: Box::new(self),
        }
    }
}
