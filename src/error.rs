// Client error types
use serde_json::Value;
use thiserror::Error;

/// Fallback shown when the server gives no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "Ocorreu um erro inesperado. Tente novamente.";

/// Everything a page can run into while talking to the Clarify backend.
///
/// Authentication outcomes (`LoginRequired`, `SessionExpired`) are terminal:
/// the session is already gone and navigation to login has been requested,
/// so callers must stop instead of retrying.
#[derive(Error, Debug)]
pub enum ClientError {
    // Authentication
    #[error("Sessão ausente. Faça login para continuar.")]
    LoginRequired,

    #[error("Sessão expirada. Faça login novamente.")]
    SessionExpired,

    // Client-side validation, no request issued
    #[error("{0}")]
    Validation(String),

    // Server answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Falha de comunicação com o servidor: {0}")]
    Transport(String),

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),

    // Dialog controller already showing a dialog
    #[error("Já existe um diálogo aberto")]
    DialogBusy,

    #[error("Erro de armazenamento local: {0}")]
    Storage(String),

    #[error("Configuração inválida: {0}")]
    Config(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// Build the error for a non-success response from its JSON body.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = detail_message(body).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
        ClientError::Api { status, message }
    }

    /// True when the session is gone and the page must stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClientError::LoginRequired | ClientError::SessionExpired)
    }

    /// HTTP status for server errors, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Get error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::LoginRequired => "LOGIN_REQUIRED",
            ClientError::SessionExpired => "SESSION_EXPIRED",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Api { .. } => "API_ERROR",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::DialogBusy => "DIALOG_BUSY",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Extract the human-readable message from a backend error body.
///
/// `detail` is either a plain string or a list of field-level validation
/// errors shaped `{ loc: [..., field], msg }`; only the first entry is shown.
pub fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(msg) if !msg.trim().is_empty() => Some(msg.clone()),
        Value::Array(errors) => {
            let first = errors.first()?;
            let msg = first.get("msg").and_then(Value::as_str)?;
            let field = first
                .get("loc")
                .and_then(Value::as_array)
                .and_then(|loc| loc.last())
                .map(|f| match f {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
            match field {
                Some(field) => Some(format!("{}: {}", field, msg)),
                None => Some(msg.to_string()),
            }
        }
        _ => None,
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
