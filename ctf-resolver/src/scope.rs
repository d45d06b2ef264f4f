use ctf_metadata::RootScope;

/// The six absolute-path prefixes (§4.2), in match order, with the prefix
/// token count to skip before handing the remainder to the target locator.
const PREFIXES: &[(&str, RootScope, usize)] = &[
    ("trace.packet.header.", RootScope::PacketHeader, 3),
    ("stream.packet.context.", RootScope::PacketContext, 3),
    ("stream.event.header.", RootScope::EventHeader, 3),
    ("stream.event.context.", RootScope::EventCommonContext, 3),
    ("event.context.", RootScope::EventSpecificContext, 2),
    ("event.fields.", RootScope::EventPayload, 2),
];

/// Outcome of classifying a path expression as absolute or relative.
pub enum Classification {
    Absolute {
        scope: RootScope,
        prefix_tokens: usize,
    },
    Relative,
}

/// Tests `expression` against the six absolute prefixes in order; the first
/// match wins. No match means the expression is relative.
pub fn classify(expression: &str) -> Classification {
    for (prefix, scope, prefix_tokens) in PREFIXES {
        if expression.starts_with(prefix) {
            return Classification::Absolute {
                scope: *scope,
                prefix_tokens: *prefix_tokens,
            };
        }
    }
    Classification::Relative
}
