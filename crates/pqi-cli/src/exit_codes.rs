//! Process exit codes. Part of the CI contract: callers branch on these.

pub const SUCCESS: i32 = 0;
pub const GATE_FAILED: i32 = 1; // Score below the gate threshold
pub const FATAL: i32 = 2; // Unreadable input, missing setting or failed status post
