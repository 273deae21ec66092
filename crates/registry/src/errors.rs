use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum RegistryError {
    #[error("renderer not registered")]
    NotFound,
    #[error("internal error")]
    Internal,
}

impl RegistryError {
    pub fn into_spotlight_error(
        self,
        detail: impl Into<String>,
    ) -> spotlight_core_types::SpotlightError {
        let message = format!("{}: {}", self, detail.into());
        spotlight_core_types::SpotlightError::new(message)
    }
}
