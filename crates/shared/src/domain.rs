use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BoardError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// First eight hex digits, enough to tell cards apart on screen.
            pub fn short(&self) -> String {
                self.0.simple().to_string()[..8].to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(OrderId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Ordered,
    Preparing,
    Served,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Ordered, Column::Preparing, Column::Served];

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Ordered => "ordered",
            Column::Preparing => "preparing",
            Column::Served => "served",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::Ordered => "Ordered",
            Column::Preparing => "Preparing",
            Column::Served => "Served",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = BoardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(Column::Ordered),
            "preparing" => Ok(Column::Preparing),
            "served" => Ok(Column::Served),
            _ => Err(BoardError::UnknownColumn(value.to_string())),
        }
    }
}

/// Field values that go into a new order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub title: String,
    pub table: String,
    pub column: Column,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    pub table: String,
    pub column: Column,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_draft(id: OrderId, draft: OrderDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            table: draft.table,
            column: draft.column,
            created_at,
        }
    }
}
