use thiserror::Error;

/// The main error type for parsing, coercing and interpreting settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RjsonError {
    /// Raised by the scanner on any symbol not valid in the current state.
    #[error("[RJSON] Parse Error at {line}:{column}: {message}{}", suffix(.hint, .code))]
    ParseError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[RJSON] value type mismatch, requested: {requested}, stored: {actual}{}", suffix(.hint, .code))]
    TypeMismatch {
        requested: String,
        actual: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[RJSON] Field not found: \"{key}\"{}", suffix(.hint, .code))]
    FieldNotFound {
        key: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[RJSON] Merge Error: {message}{}", suffix(&None, .code))]
    MergeError { message: String, code: Option<u32> },
    #[error("[RJSON] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for runtime issues, such as missing environment variables.
    #[error("[RJSON] Runtime Error: {message}{}", suffix(.hint, .code))]
    RuntimeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Interpreter-level failures: malformed commands, unresolved conditions.
    #[error("[RJSON] Settings Error: {message}{}", suffix(.hint, .code))]
    SettingsError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[RJSON] substitution not found: {pattern}{}", suffix(&None, .code))]
    SubstitutionNotFound { pattern: String, code: Option<u32> },
    #[error("[RJSON] substitution cycle: {text}{}", suffix(&None, .code))]
    SubstitutionCycle { text: String, code: Option<u32> },
    /// An error re-wrapped with the entry being applied when it surfaced.
    #[error("{source}\n    on applying {context}")]
    Context {
        context: String,
        source: Box<RjsonError>,
    },
}

pub type Result<T> = std::result::Result<T, RjsonError>;

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl RjsonError {
    pub(crate) fn settings(message: impl Into<String>, code: u32) -> Self {
        RjsonError::SettingsError {
            message: message.into(),
            hint: None,
            code: Some(code),
        }
    }

    /// Wrap the error with the entry that was being processed.
    pub fn context(self, context: impl Into<String>) -> Self {
        RjsonError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping every `Context` layer.
    pub fn root_cause(&self) -> &RjsonError {
        let mut current = self;
        while let RjsonError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn code(&self) -> Option<u32> {
        match self.root_cause() {
            RjsonError::ParseError { code, .. }
            | RjsonError::TypeMismatch { code, .. }
            | RjsonError::FieldNotFound { code, .. }
            | RjsonError::MergeError { code, .. }
            | RjsonError::FileError { code, .. }
            | RjsonError::RuntimeError { code, .. }
            | RjsonError::SettingsError { code, .. }
            | RjsonError::SubstitutionNotFound { code, .. }
            | RjsonError::SubstitutionCycle { code, .. } => *code,
            RjsonError::Context { .. } => None,
        }
    }
}
