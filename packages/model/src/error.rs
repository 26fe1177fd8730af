use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown breakpoint: {0}")]
    UnknownBreakpoint(String),

    #[error("Columns blocks cannot be placed inside a column")]
    NestedColumns,

    #[error("Duplicate block id: {0}")]
    DuplicateId(String),

    #[error("Columns block {id} has {actual} columns, ratio {ratio} implies {expected}")]
    ColumnCountMismatch {
        id: String,
        ratio: String,
        expected: usize,
        actual: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn unknown_block_type(block_type: impl Into<String>) -> Self {
        Self::UnknownBlockType(block_type.into())
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }
}
