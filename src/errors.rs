use fractic_server_error::{define_client_error, define_internal_error};

// Durable storage.
define_internal_error!(
    StorageReadError,
    "Error reading key '{key}' from durable storage.",
    { key: &str }
);
define_internal_error!(
    StorageWriteError,
    "Error writing key '{key}' to durable storage.",
    { key: &str }
);
define_internal_error!(
    StorageRemoveError,
    "Error removing key '{key}' from durable storage.",
    { key: &str }
);
define_internal_error!(SecureTokenError, "Error accessing secure token storage.");

// Persisted snapshots and migrations.
define_client_error!(
    InvalidEnvelope,
    "Invalid persisted envelope under key '{key}'.",
    { key: &str }
);
define_client_error!(
    InvalidPersistedPayload,
    "Invalid persisted '{slice}' payload: {details}.",
    { slice: &str, details: &str }
);
define_internal_error!(
    MissingMigrationStep,
    "No '{chain}' migration registered from v{from} to v{to}.",
    { chain: &str, from: u32, to: u32 }
);
define_client_error!(
    PersistedVersionAhead,
    "Persisted '{chain}' payload is at v{persisted}, newer than the supported v{current}.",
    { chain: &str, persisted: u32, current: u32 }
);

// Network collaborator.
define_client_error!(RequestFailed, "{message}", { message: &str });
define_client_error!(
    Unauthorized,
    "Session token rejected by '{endpoint}'.",
    { endpoint: &str }
);
define_client_error!(
    InvalidResponse,
    "Invalid response from '{endpoint}'.",
    { endpoint: &str }
);
define_client_error!(MissingToken, "Login response did not include a token.");
define_internal_error!(HttpClientInit, "Failed to build HTTP client.");

// Configuration.
define_client_error!(InvalidConfig, "Invalid store configuration (invalid RON format).");
