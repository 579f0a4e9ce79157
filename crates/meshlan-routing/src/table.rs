//! Derived route table.

use std::collections::BTreeMap;

use meshlan_core::{Address, NetworkPrefix, PortIndex};

use crate::registry::PortRegistry;

/// Ordered multimap from advertised prefix to owning ports.
///
/// Recompiled from the registry whenever ports or their advertisements
/// change; never mutated in place. Iteration follows the prefix order
/// (family, network address, longest prefix first), so [`find`](Self::find)
/// yields the most specific matches first; owners of an identical prefix
/// are kept in registry order.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: BTreeMap<NetworkPrefix, Vec<PortIndex>>,
}

impl RouteTable {
    /// Compile the table from every registered port's advertisements.
    ///
    /// The same prefix advertised twice by one port collapses to a single
    /// entry; advertised by several ports, every owner is kept.
    pub fn build(registry: &PortRegistry) -> Self {
        let mut routes: BTreeMap<NetworkPrefix, Vec<PortIndex>> = BTreeMap::new();
        for (index, port) in registry.iter() {
            for prefix in port.local_routes() {
                let owners = routes.entry(*prefix).or_default();
                if !owners.contains(&index) {
                    owners.push(index);
                }
            }
        }
        Self { routes }
    }

    /// All routes whose prefix contains `addr`, most specific first.
    ///
    /// Containment is family-checked, so a v4 destination only ever
    /// yields v4 routes and vice versa.
    pub fn find<'a>(
        &'a self,
        addr: &'a Address,
    ) -> impl Iterator<Item = (&'a NetworkPrefix, PortIndex)> + 'a {
        self.routes
            .iter()
            .filter(move |(prefix, _)| prefix.contains(addr))
            .flat_map(|(prefix, owners)| owners.iter().map(move |index| (prefix, *index)))
    }

    /// Every (prefix, owner) pair in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&NetworkPrefix, PortIndex)> {
        self.routes
            .iter()
            .flat_map(|(prefix, owners)| owners.iter().map(move |index| (prefix, *index)))
    }

    /// Number of (prefix, owner) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
