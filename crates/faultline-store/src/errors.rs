use super::*;

#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("resource `{name}` not found")]
    NotFound { name: String },

    #[error("invalid resource name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("store root {root} is not a directory")]
    NotADirectory { root: PathBuf },

    #[error("File operation {operation} failed for {path}: {source} (kind: {kind:?})")]
    FileOperation {
        operation: &'static str,
        path: PathBuf,
        source: Arc<std::io::Error>,
        kind: std::io::ErrorKind,
    },

    #[error("UTF-8 decoding error in {path}: {source}")]
    Utf8 {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("store index corrupted: {0}")]
    Corrupted(String),
}

impl StoreError {
    pub(crate) fn file_operation(operation: &'static str, path: &Path, e: std::io::Error) -> Self {
        let kind = e.kind();
        StoreError::FileOperation {
            operation,
            path: path.to_path_buf(),
            source: Arc::new(e),
            kind,
        }
    }
}

impl Classify for StoreError {
    fn kind(&self) -> FailureKind {
        match self {
            StoreError::NotFound { .. }
            | StoreError::NotADirectory { .. }
            | StoreError::Utf8 { .. } => FailureKind::RecoverableExternal,
            StoreError::InvalidName { .. } => FailureKind::ProgrammingDefect,
            StoreError::FileOperation { kind, .. } => kind.kind(),
            StoreError::Corrupted(_) => FailureKind::Fatal,
        }
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(match self {
            StoreError::NotFound { .. } => Subkind::NOT_FOUND,
            StoreError::NotADirectory { .. } => Subkind::new("not-a-directory"),
            StoreError::Utf8 { .. } => Subkind::MALFORMED_INPUT,
            StoreError::InvalidName { .. } => Subkind::INVALID_ARGUMENT,
            StoreError::FileOperation { kind, .. } => return kind.subkind(),
            StoreError::Corrupted(_) => Subkind::CORRUPTED_INVARIANT,
        })
    }
}

impl From<StoreError> for Failure {
    fn from(e: StoreError) -> Failure {
        e.to_failure(Domain::STORAGE)
    }
}
