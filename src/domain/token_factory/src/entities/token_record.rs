use alloy::primitives::Address;
use serde::Serialize;

/// A token deployed through the factory.
///
/// Records built from an owner listing only carry the address: the factory
/// returns nothing else there, so `name` and `symbol` stay empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub name: String,
    pub symbol: String,
    pub address: Address,
}

impl TokenRecord {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, address: Address) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            address,
        }
    }

    pub fn from_address(address: Address) -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            address,
        }
    }
}
