pub mod gatherings;
pub mod links;

use std::collections::HashMap;
use thiserror::Error;

use crate::calendar::CalendarError;
use crate::error::ApiError;
use crate::store::StoreError;

pub use gatherings::{GatheringService, StatusFilter};
pub use links::LinkService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Invalid fields: {0:?}")]
    Invalid(HashMap<String, String>),

    #[error("{0}")]
    Conflict(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => e.into(),
            ServiceError::Calendar(e) => e.into(),
            ServiceError::Invalid(fields) => ApiError::invalid_fields(fields),
            ServiceError::Conflict(msg) => ApiError::conflict(msg),
        }
    }
}
