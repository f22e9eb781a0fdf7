/// Errors from the tectonic optimizer.
#[derive(Debug, thiserror::Error)]
pub enum TectonicError {
    /// The baseline could not be established; the run aborts before any
    /// mutation is attempted.
    #[error("setup failed: {0}")]
    Setup(String),
}
