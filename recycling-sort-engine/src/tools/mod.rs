/// Pointer drag tool: gesture state machine and drop resolution.
pub mod drag;
