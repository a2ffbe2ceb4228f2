use serde::{Deserialize, Serialize};

/// A secret/address pair usable as a balance-query subject or a transfer
/// signer. The secret is the identifier; the address is the display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    /// Secret key handed verbatim to the node when signing.
    pub id: String,
    /// On-chain address, shown in selectors and used for balance queries.
    pub name: String,
}

/// Outcome of trying to add a wallet to the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A new record was appended.
    Added,
    /// Either the address or the key matched an existing record; nothing
    /// changed. Not an error.
    AlreadyKnown,
}

/// The session's mutable wallet set. Grows when the user connects a wallet
/// the directory does not already hold.
#[derive(Clone, Debug, Default)]
pub struct WalletDirectory {
    entries: Vec<WalletRecord>,
}

impl WalletDirectory {
    pub fn new(entries: Vec<WalletRecord>) -> Self {
        let mut dir = Self::default();
        for entry in entries {
            let _ = dir.add(entry.name, entry.id);
        }
        dir
    }

    pub fn entries(&self) -> &[WalletRecord] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a stored selection against the current set.
    pub fn by_id(&self, id: &str) -> Option<&WalletRecord> {
        self.entries.iter().find(|w| w.id == id)
    }

    /// Append `address`/`secret` unless either field matches an existing
    /// record. Matching on both fields keeps the set free of aliased entries:
    /// one secret under two addresses or one address under two secrets.
    pub fn add(&mut self, address: String, secret: String) -> ConnectOutcome {
        let known = self
            .entries
            .iter()
            .any(|w| w.name == address || w.id == secret);
        if known {
            return ConnectOutcome::AlreadyKnown;
        }
        self.entries.push(WalletRecord {
            id: secret,
            name: address,
        });
        ConnectOutcome::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_new_record() {
        let mut dir = WalletDirectory::default();
        assert_eq!(dir.add("0xAAA".into(), "k1".into()), ConnectOutcome::Added);
        assert_eq!(dir.entries().len(), 1);
        assert_eq!(dir.by_id("k1").unwrap().name, "0xAAA");
    }

    #[test]
    fn duplicate_address_is_idempotent() {
        let mut dir = WalletDirectory::new(vec![WalletRecord {
            id: "k1".into(),
            name: "0xABC".into(),
        }]);
        assert_eq!(
            dir.add("0xABC".into(), "k2".into()),
            ConnectOutcome::AlreadyKnown
        );
        assert_eq!(dir.entries().len(), 1);
    }

    #[test]
    fn duplicate_key_is_idempotent() {
        let mut dir = WalletDirectory::new(vec![WalletRecord {
            id: "k1".into(),
            name: "0xABC".into(),
        }]);
        assert_eq!(
            dir.add("0xDEF".into(), "k1".into()),
            ConnectOutcome::AlreadyKnown
        );
        assert_eq!(dir.entries().len(), 1);
    }

    #[test]
    fn ids_stay_unique_through_construction() {
        let dir = WalletDirectory::new(vec![
            WalletRecord {
                id: "k1".into(),
                name: "0xAAA".into(),
            },
            WalletRecord {
                id: "k1".into(),
                name: "0xBBB".into(),
            },
        ]);
        assert_eq!(dir.entries().len(), 1);
        assert_eq!(dir.by_id("k1").unwrap().name, "0xAAA");
    }
}
