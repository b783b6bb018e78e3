use crate::model::{EntityKind, Id};

/// Failure of an admission operation.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    /// A referenced row does not exist or a query matched nothing.
    #[error("{0}")]
    NotFound(String),
    /// A uniqueness rule would be broken by the write.
    #[error("{0}")]
    AlreadyExists(String),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;

impl AdmissionError {
    pub fn missing(kind: EntityKind, id: Id) -> Self {
        AdmissionError::NotFound(format!("No {} found with Id {}", kind, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AdmissionError::NotFound(_))
    }
}

/// Turn the `Option` a store lookup returns into a NotFound naming the row.
pub(crate) fn require<T>(value: Option<T>, kind: EntityKind, id: Id) -> AdmissionResult<T> {
    value.ok_or_else(|| AdmissionError::missing(kind, id))
}

/// Empty result sets are reported as NotFound rather than returned.
pub(crate) fn non_empty<T>(items: Vec<T>, message: impl FnOnce() -> String) -> AdmissionResult<Vec<T>> {
    if items.is_empty() {
        return Err(AdmissionError::NotFound(message()));
    }
    Ok(items)
}
