use thiserror::Error;

/// User-action errors raised by matrix model operations.
///
/// These are rejected synchronously with state unchanged; the caller
/// surfaces the message through the notification sink and the user can
/// correct and retry. External-call failures (save, asset fetch) are not
/// represented here — they belong to the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("no template is selected")]
    NoTemplateSelected,

    #[error("cannot delete the last variation")]
    LastVariation,

    #[error("matrix name must not be empty")]
    EmptyName,
}
