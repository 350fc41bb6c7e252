//! Errors raised while attaching the game to its host page

use thiserror::Error;

/// Failure to bind the game to the page. The game stays inert; the rest of
/// the page keeps working.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing DOM element #{0}")]
    MissingElement(&'static str),
    #[error("element #{0} is not a {1}")]
    WrongElementType(&'static str, &'static str),
    #[error("canvas has no 2d context")]
    NoContext,
}
