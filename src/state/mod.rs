//! State tracking module
//!
//! Contains the resume state machine that decides which requests of a batch
//! still need processing.

mod resume_state;

pub use resume_state::ResumeState;
