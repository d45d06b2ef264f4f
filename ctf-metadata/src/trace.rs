use crate::FieldClass;
use serde::{Deserialize, Serialize};

/// The event-class layer: owns the event-specific-context and
/// event-payload scope roots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventClass {
    #[serde(default)]
    pub event_specific_context: Option<FieldClass>,
    #[serde(default)]
    pub event_payload: Option<FieldClass>,
    /// Once true, this layer's field classes are frozen; the resolver skips
    /// them.
    #[serde(default)]
    pub translated: bool,
}

/// The stream-class layer: owns the packet-context, event-header, and
/// event-common-context scope roots, plus its ordered event classes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamClass {
    #[serde(default)]
    pub packet_context: Option<FieldClass>,
    #[serde(default)]
    pub event_header: Option<FieldClass>,
    #[serde(default)]
    pub event_common_context: Option<FieldClass>,
    #[serde(default)]
    pub event_classes: Vec<EventClass>,
    #[serde(default)]
    pub translated: bool,
}

/// The trace-class layer: owns the packet-header scope root, plus its
/// ordered stream classes. The root of a resolver run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceClass {
    #[serde(default)]
    pub packet_header: Option<FieldClass>,
    #[serde(default)]
    pub stream_classes: Vec<StreamClass>,
    #[serde(default)]
    pub translated: bool,
}
