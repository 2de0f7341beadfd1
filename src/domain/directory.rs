//! Payout address directory.

use std::collections::HashMap;

use super::AccountId;

/// Read-only mapping from account id to its registered payout address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDirectory {
    addresses: HashMap<String, String>,
}

impl AddressDirectory {
    #[must_use]
    pub fn new(addresses: HashMap<String, String>) -> Self {
        Self { addresses }
    }

    /// Destination address registered for `account_id`, if any.
    #[must_use]
    pub fn lookup(&self, account_id: &AccountId) -> Option<&str> {
        self.addresses.get(account_id.as_str()).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AddressDirectory
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
