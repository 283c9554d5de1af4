use thiserror::Error;

pub type ReceiptResult<T> = Result<T, ReceiptError>;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Spreadsheet format error: {0}")]
    Format(String),

    #[error("Sheet not found: '{0}'")]
    SheetNotFound(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Asset missing: {0}")]
    AssetMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl ReceiptError {
    /// True for errors caused by the uploaded table rather than the server
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ReceiptError::Format(_) | ReceiptError::SheetNotFound(_) | ReceiptError::SchemaMismatch(_)
        )
    }
}
