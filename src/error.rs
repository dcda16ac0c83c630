#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Line {line} out of range, text has {lines} line(s)")]
    LineOutOfRange { line: usize, lines: usize },

    #[error("Column {ch} out of range for line {line} of length {len}")]
    ColumnOutOfRange { line: usize, ch: usize, len: usize },

    #[error("Offset {offset} out of range, text has {len} character(s)")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl From<confique::Error> for Error {
    fn from(value: confique::Error) -> Self {
        Error::Config(value.to_string())
    }
}
