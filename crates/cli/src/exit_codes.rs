//! CLI Exit Code Registry
//!
//! Single source of truth for `bizlink` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | CLI usage error (bad args; emitted by clap)      |
//! | 3    | Config could not be parsed or failed validation  |
//! | 4    | Runtime failure: unreadable file, malformed CSV  |
//! | 5    | Run succeeded but produced no matches            |
//!
//! Codes 1 and 2 come from the runtime and clap respectively. Code 5 is
//! only used with `--fail-on-empty`.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Config parse or validation error.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// I/O or CSV error while reading inputs or writing results.
pub const EXIT_RUNTIME: u8 = 4;

/// No pair cleared the threshold (`--fail-on-empty`).
pub const EXIT_NO_MATCHES: u8 = 5;
