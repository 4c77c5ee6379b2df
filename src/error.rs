use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("CrawlError: {0}")]
    Crawl(#[from] CrawlError),
    #[error("ExportError: {0}")]
    Export(#[from] ExportError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Input error: {0}")]
    Input(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to create HTTP client: {0}")]
    ClientInit(String),
    #[error("Failed to marshal request data for {endpoint}: {message}")]
    Marshal { endpoint: String, message: String },
    #[error("Failed to send request to {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Failed to read response from {endpoint}: {message}")]
    ReadBody { endpoint: String, message: String },
    #[error("authentication failed: {server_message} (status: {status})")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
    #[error("Failed to parse {what} from {endpoint}: {message}")]
    Parse {
        what: String,
        endpoint: String,
        message: String,
    },
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("authentication failed: {message} (status: {status})")]
    Failed { message: String, status: u16 },
}

impl AuthError {
    pub fn status(&self) -> u16 {
        match self {
            AuthError::Failed { status, .. } => *status,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No config file found at {path} - please run 'connect' command first")]
    ConfigNotFound { path: String },
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },
    #[error("Home directory not found")]
    HomeDirNotFound,
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("failed to fetch tables: {0}")]
    Tables(#[source] ApiError),
    #[error("failed to fetch fields for table {table}: {source}")]
    Fields { table: String, source: ApiError },
    #[error("failed to fetch relationships for table {table}: {source}")]
    Relationships { table: String, source: ApiError },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to create output file {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write {what}: {message}")]
    Write { what: String, message: String },
}

/// The three coarse failure classes surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Transport,
    Data,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

fn api_category(err: &ApiError) -> ErrorCategory {
    match err {
        ApiError::Unauthorized { .. } => ErrorCategory::Authentication,
        ApiError::ClientInit(_) | ApiError::Transport { .. } | ApiError::ReadBody { .. } => {
            ErrorCategory::Transport
        }
        ApiError::Marshal { .. } | ApiError::Parse { .. } => ErrorCategory::Data,
    }
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Auth(_) => ErrorCategory::Authentication,
            AppError::Api(api_error) => api_category(api_error),
            AppError::Crawl(
                CrawlError::Tables(source)
                | CrawlError::Fields { source, .. }
                | CrawlError::Relationships { source, .. },
            ) => api_category(source),
            AppError::Cli(_) | AppError::Storage(_) | AppError::Export(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::ClientInit(_) => ErrorSeverity::Critical,
                _ => ErrorSeverity::Medium,
            },
            AppError::Storage(StorageError::ConfigNotFound { .. }) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Crawl(_) => ErrorSeverity::Medium,
            AppError::Export(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::Failed { status: 404, .. }) => {
                Some("Check the username; no matching sys_user record exists".to_string())
            }
            AppError::Auth(_) => Some("Run 'sncli connect' to try again".to_string()),
            AppError::Storage(StorageError::ConfigNotFound { .. }) => {
                Some("Run 'sncli connect' to authenticate and save credentials".to_string())
            }
            AppError::Api(ApiError::Transport { .. }) => {
                Some("Check your network connection and the instance name".to_string())
            }
            AppError::Api(ApiError::Unauthorized { status: 401, .. }) => {
                Some("Saved credentials were rejected; run 'sncli connect' again".to_string())
            }
            _ => None,
        }
    }
}
