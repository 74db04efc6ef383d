//! Git operations used by the git source transport
//!
//! This module handles:
//! - Cloning repositories (HTTPS, SSH and `file://`)
//! - Checking out a branch, tag or commit after the clone
//!
//! Authentication is delegated to git's own mechanisms: the SSH agent, keys
//! in `~/.ssh/`, and configured credential helpers.

mod auth;
mod checkout;
mod clone;
mod error;

pub use checkout::checkout_ref;
pub use clone::clone;
