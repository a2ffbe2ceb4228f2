use serde::{Deserialize, Serialize};

/// A chain network reachable through one node endpoint.
///
/// The endpoint URL doubles as the identifier: two networks pointing at the
/// same node are the same network as far as the dialog is concerned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Node endpoint URL, unique across the list.
    pub id: String,
    /// Display name shown in the selector.
    pub name: String,
    /// Symbol of the chain's native asset, e.g. "ETH".
    pub token_name: String,
}

/// The networks available in this session. Seeded once at startup and
/// immutable afterwards.
#[derive(Clone, Debug, Default)]
pub struct NetworkList {
    entries: Vec<NetworkDescriptor>,
}

impl NetworkList {
    /// Build a list from descriptors, keeping only the first entry for each id.
    pub fn new(entries: Vec<NetworkDescriptor>) -> Self {
        let mut deduped: Vec<NetworkDescriptor> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !deduped.iter().any(|n| n.id == entry.id) {
                deduped.push(entry);
            }
        }
        Self { entries: deduped }
    }

    /// Networks baked into the build, overridable with `SALDO_NETWORKS`
    /// (comma-separated `url|name|token` triples) at compile time.
    pub fn seeded() -> Self {
        if let Some(raw) = option_env!("SALDO_NETWORKS") {
            let parsed = parse_network_list(raw);
            if !parsed.is_empty() {
                return Self::new(parsed);
            }
        }
        Self::new(vec![
            NetworkDescriptor {
                id: "https://node.mainnet.saldo.example".to_string(),
                name: "Mainnet".to_string(),
                token_name: "ETH".to_string(),
            },
            NetworkDescriptor {
                id: "https://node.testnet.saldo.example".to_string(),
                name: "Testnet".to_string(),
                token_name: "tETH".to_string(),
            },
            NetworkDescriptor {
                id: "http://127.0.0.1:8545".to_string(),
                name: "Local node".to_string(),
                token_name: "ETH".to_string(),
            },
        ])
    }

    pub fn entries(&self) -> &[NetworkDescriptor] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a stored selection against the current list.
    pub fn by_id(&self, id: &str) -> Option<&NetworkDescriptor> {
        self.entries.iter().find(|n| n.id == id)
    }
}

/// Parse `url|name|token` triples separated by commas. Malformed triples are
/// skipped rather than failing the whole list.
fn parse_network_list(raw: &str) -> Vec<NetworkDescriptor> {
    raw.split(',')
        .filter_map(|triple| {
            let mut parts = triple.splitn(3, '|');
            let id = parts.next()?.trim();
            let name = parts.next()?.trim();
            let token = parts.next()?.trim();
            if id.is_empty() || name.is_empty() || token.is_empty() {
                return None;
            }
            Some(NetworkDescriptor {
                id: id.to_string(),
                name: name.to_string(),
                token_name: token.to_string(),
            })
        })
        .collect()
}
