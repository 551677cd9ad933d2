/// Error categories surfaced by the library.
///
/// Each kind maps to a stable process exit code so scripts can distinguish
/// bad input (validation) from numerical failure (singular) from API misuse
/// (not fitted) from a failed hyperparameter search (optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid caller input: mismatched lengths, `c <= d`, bad ranges.
    Validation,
    /// `ΦᵀΦ + λI` could not be factorized (rank-deficient design, λ = 0).
    Singular,
    /// `predict`/`gcv` called before any successful `fit`.
    NotFitted,
    /// The hyperparameter search found no feasible candidate.
    Optimization,
    /// File or stream I/O failure (CSV, model JSON).
    Io,
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn singular(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Singular, message)
    }

    pub fn not_fitted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFitted, message)
    }

    pub fn optimization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Optimization, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::Validation => 2,
            ErrorKind::Singular => 3,
            ErrorKind::NotFitted => 4,
            ErrorKind::Optimization => 5,
            ErrorKind::Io => 2,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
