use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::OrderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("unknown column '{0}'; expected ordered, preparing or served")]
    UnknownColumn(String),
    #[error("order {0} not found")]
    OrderNotFound(OrderId),
    #[error("no order is selected for editing")]
    NoOrderSelected,
}

impl BoardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BoardError::UnknownColumn(_) => ErrorCode::Validation,
            BoardError::OrderNotFound(_) => ErrorCode::NotFound,
            BoardError::NoOrderSelected => ErrorCode::Conflict,
        }
    }
}
