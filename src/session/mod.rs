//! Request/render sessions
//!
//! A session owns the state that outlives a single request:
//!
//! - [`TextSession`]: token palette for masked-text requests
//! - [`SketchSession`]: activity gate and timers for sketch uploads

mod gate;
mod sketch;
mod text;

pub use gate::ActivityGate;
pub use sketch::SketchSession;
pub use text::TextSession;

use thiserror::Error;

use crate::client::ClientError;

/// Errors raised while driving a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}
