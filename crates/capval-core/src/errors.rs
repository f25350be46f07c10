use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CapValError
pub type Result<T> = std::result::Result<T, CapValError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    NotFound,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    ExternalService,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification fields used by `log_op_error!` plus enough
/// context (operation, entity, path) to explain what went wrong.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<PathBuf>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (element or relationship id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for CapVal operations
///
/// Input anomalies inside a well-formed model (missing level tags, empty
/// collections, broken hierarchies) are not errors: the generated rules
/// report them through the checker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapValError {
    // ===== Model input =====
    /// The model document could not be read or parsed
    #[error("Failed to parse model document {path}: {message}")]
    ModelParse { path: String, message: String },

    /// A relationship endpoint references an element that is not in the model
    #[error("Relationship {relationship_id} references unknown element {element_id}")]
    UnknownElementRef {
        relationship_id: String,
        element_id: String,
    },

    /// A selected id matches no element or relationship in the model
    #[error("Selection references unknown id: {id}")]
    UnknownSelectionId { id: String },

    // ===== Configuration =====
    /// The configuration file is unreadable or malformed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===== Persistence =====
    /// A generated file could not be written
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    // ===== External checker =====
    /// The checker process could not be started or its output could not be read
    #[error("Failed to run checker {program}: {message}")]
    CheckerLaunch { program: PathBuf, message: String },

    // ===== Generic =====
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<CapValError> for ExError {
    fn from(err: CapValError) -> Self {
        match err {
            CapValError::ModelParse { path, message } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_path(path)
                    .with_message(message)
            }

            CapValError::UnknownElementRef {
                relationship_id,
                element_id,
            } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(relationship_id)
                .with_message(format!("Endpoint {} is not a model element", element_id)),

            CapValError::UnknownSelectionId { id } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(id)
                .with_message("Selected id is not in the model"),

            CapValError::InvalidConfig { message } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }

            CapValError::WriteFailed { path, message } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),

            CapValError::CheckerLaunch { program, message } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_path(program)
                    .with_message(message)
            }

            CapValError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
