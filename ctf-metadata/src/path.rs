use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the six named compound field classes that anchor a layer's data
/// layout.
///
/// Declaration order is the fixed scope order used for cross-scope causality
/// (§4.7): `PacketHeader < PacketContext < EventHeader < EventCommonContext
/// < EventSpecificContext < EventPayload`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum RootScope {
    PacketHeader = 0,
    PacketContext = 1,
    EventHeader = 2,
    EventCommonContext = 3,
    EventSpecificContext = 4,
    EventPayload = 5,
}

impl RootScope {
    /// All six scopes, in fixed scope order.
    pub const ALL: [RootScope; 6] = [
        RootScope::PacketHeader,
        RootScope::PacketContext,
        RootScope::EventHeader,
        RootScope::EventCommonContext,
        RootScope::EventSpecificContext,
        RootScope::EventPayload,
    ];
}

impl fmt::Display for RootScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RootScope::PacketHeader => "packet-header",
            RootScope::PacketContext => "packet-context",
            RootScope::EventHeader => "event-header",
            RootScope::EventCommonContext => "event-common-context",
            RootScope::EventSpecificContext => "event-specific-context",
            RootScope::EventPayload => "event-payload",
        };
        f.write_str(name)
    }
}

/// The sentinel index stored for a descent through an array/sequence parent,
/// where there is exactly one child class rather than a named position.
pub const ELEMENT_INDEX: i32 = -1;

/// A root scope tag plus an ordered list of child indices locating a leaf or
/// compound field class within that scope.
///
/// For structure/variant parents the index is the member/option position
/// (`>= 0`); for array/sequence parents it is [`ELEMENT_INDEX`].
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct FieldPath {
    pub root: Option<RootScope>,
    pub indices: Vec<i32>,
}

impl FieldPath {
    /// An empty path rooted at `root` (matches a bare scope root, not yet a
    /// field within it).
    pub fn new(root: RootScope) -> Self {
        Self {
            root: Some(root),
            indices: Vec::new(),
        }
    }

    pub fn push(&mut self, index: i32) {
        self.indices.push(index);
    }

    /// §4.7 rule 1: a valid target path must name a field, not a bare scope
    /// root.
    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index at which `self` and `other` first diverge, i.e. the
    /// lowest-common-ancestor depth. `None` if one is a prefix of the other
    /// (including equal paths).
    pub fn divergence(&self, other: &FieldPath) -> Option<usize> {
        let shared = self.indices.len().min(other.indices.len());
        for i in 0..shared {
            if self.indices[i] != other.indices[i] {
                return Some(i);
            }
        }
        None
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => write!(f, "{root}")?,
            None => f.write_str("<relative>")?,
        }
        for index in &self.indices {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}
