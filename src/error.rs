use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeaheadError {
    #[error("No dataset to search. Pass a JSON file, pipe one on stdin, or use --url.")]
    NoInput,

    #[error("Invalid JSON dataset: {0}")]
    InvalidDataset(String),

    #[error("Dataset has no usable records")]
    EmptyDataset,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
