//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and URLs so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "userdash";

/// Package version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple exported by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.userdash.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".userdash.toml";

/// Directory name under `~/.config/` for global config and persisted state.
pub const CONFIG_DIR: &str = "userdash";

/// Filename of the persisted key-value state inside the state directory.
pub const STATE_FILENAME: &str = "state.json";

/// Reference directory endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── Persistence keys ────────────────────────────────────────────────

pub const KEY_NAME: &str = "name";
pub const KEY_USERNAME: &str = "username";
pub const KEY_EMAIL: &str = "email";
pub const KEY_USER_DATA: &str = "userData";
pub const KEY_COMPANY_NAME: &str = "companyName";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_BASE_URL: &str = "USERDASH_BASE_URL";
pub const ENV_TIMEOUT: &str = "USERDASH_TIMEOUT";
pub const ENV_STATE_DIR: &str = "USERDASH_STATE_DIR";
pub const ENV_PERSIST: &str = "USERDASH_PERSIST";
