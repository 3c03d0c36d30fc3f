use thiserror::Error;

use crate::settings::SettingsError;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum Error {
    /// The XML engine reported a syntax error; the message embeds the
    /// engine's own description, including the position it failed at.
    #[error("XML parser error: {0}")]
    MalformedDocument(String),

    #[error("appcast URL not specified")]
    MissingAppcastUrl,

    #[error("background parse task failed: {0}")]
    ParseTask(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
