use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A book borrowing event, the payload of every block.
///
/// Field order is part of the digest input: [`Checkout::canonical_bytes`]
/// serializes fields in declaration order, so reordering them changes every
/// digest in the chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checkout {
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub checkout_date: String,
    #[serde(default)]
    pub is_genesis: bool,
}

impl Checkout {
    /// A regular checkout of `book_id` by `user`.
    pub fn new(
        book_id: impl Into<String>,
        user: impl Into<String>,
        checkout_date: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            user: user.into(),
            checkout_date: checkout_date.into(),
            is_genesis: false,
        }
    }

    /// The distinguished payload of the genesis block.
    pub fn genesis() -> Self {
        Self {
            is_genesis: true,
            ..Self::default()
        }
    }

    /// Deterministic byte serialization used in digest computation.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}
