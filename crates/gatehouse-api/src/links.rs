// HAL-style link model
//
// Every resource the controller returns carries a `links` array of
// `{ rel, href }` pairs. Navigation is always by relation name, never
// by hardcoded path -- the server owns its URL space.

use serde::{Deserialize, Serialize};

/// Well-known link relations declared by the controller.
pub mod rel {
    /// Root resource -> doors entrypoint.
    pub const DOORS: &str = "doors";
    /// Entrypoint -> current door state.
    pub const STATE: &str = "state";
    /// Entrypoint -> toggle operation.
    pub const OPERATE: &str = "operate";
    /// Entrypoint -> open trigger.
    pub const OPEN: &str = "open";
    /// Entrypoint -> close trigger.
    pub const CLOSE: &str = "close";
    /// Entrypoint -> statistics resource.
    pub const STATS: &str = "stats";
    /// Entrypoint -> operation log.
    pub const LOGS: &str = "logs";
}

/// A single named link: a relation and the absolute URL it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// The set of links a resource declares.
///
/// Lookup by an undeclared relation yields `None`; callers decide
/// whether that is a hard error (it is, everywhere in gatehouse-core).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(Vec<Link>);

impl Links {
    pub fn new(links: Vec<Link>) -> Self {
        Self(links)
    }

    /// Find a link by its relation name.
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|l| l.rel == rel)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.0.iter()
    }
}

/// Capability interface for resources that carry hypermedia links.
///
/// Implemented by every concrete response type; consumers navigate the
/// API exclusively through this trait.
pub trait Linked {
    fn links(&self) -> &Links;

    /// Look up a link by relation; `None` if the resource does not
    /// declare it.
    fn link(&self, rel: &str) -> Option<&Link> {
        self.links().get(rel)
    }
}
