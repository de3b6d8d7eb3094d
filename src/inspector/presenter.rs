//! Value presentation
//!
//! Maps a [`RemoteValue`] to what a variables-view row shows: an icon class,
//! an optional type label, and a display string that is cut to the configured
//! maximum length. Presentations are derived on every request and never
//! stored on a node.

use super::config::InspectorConfig;
use super::constants::ELLIPSIS;
use super::enumerator::VariantKind;
use crate::term::RemoteValue;

/// Icon class shown next to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Atoms, numbers and opaque handles
    PrimitiveValue,
    /// Containers with an eagerly known size: lists, tuples, binaries
    Array,
    /// Everything else
    Value,
}

/// What the host draws for one value
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub icon: Icon,
    /// Short variant name; absent when the display string describes itself
    pub type_label: Option<String>,
    /// Display string, possibly truncated
    pub value: String,
    full_value: Option<String>,
}

impl Presentation {
    pub fn is_truncated(&self) -> bool {
        self.full_value.is_some()
    }

    /// The untruncated display string, for the host's "show full value" action
    pub fn full_value(&self) -> &str {
        self.full_value.as_deref().unwrap_or(&self.value)
    }
}

/// Present a value with the given configuration
pub fn present(value: &RemoteValue, config: &InspectorConfig) -> Presentation {
    let icon = VariantKind::of(value).enumerator().icon;
    let rendered = value.to_string();
    let (display, full_value) = match truncate_display(&rendered, config.max_value_length()) {
        Some(cut) => (cut, Some(rendered)),
        None => (rendered, None),
    };

    Presentation {
        icon,
        type_label: type_label(value),
        value: display,
        full_value,
    }
}

/// Present a value with the default configuration
pub fn present_default(value: &RemoteValue) -> Presentation {
    present(value, &InspectorConfig::default())
}

/// Cut `text` to `max_len` characters, ellipsis included.
///
/// Returns `None` when the text already fits.
pub fn truncate_display(text: &str, max_len: usize) -> Option<String> {
    if text.chars().count() <= max_len {
        return None;
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    Some(cut)
}

fn type_label(value: &RemoteValue) -> Option<String> {
    match value {
        RemoteValue::List(_) | RemoteValue::Tuple(_) | RemoteValue::Binary(_) => {
            Some(value.type_name().to_string())
        }
        RemoteValue::Map(_) => Some(
            value
                .struct_name()
                .unwrap_or_else(|| value.type_name())
                .to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::value::{Atom, Port};

    #[test]
    fn test_integer_is_primitive_without_type_label() {
        let presentation = present_default(&RemoteValue::Integer(42));

        assert_eq!(presentation.icon, Icon::PrimitiveValue);
        assert_eq!(presentation.type_label, None);
        assert_eq!(presentation.value, "42");
        assert!(!presentation.is_truncated());
        assert_eq!(presentation.full_value(), "42");
    }

    #[test]
    fn test_icon_buckets() {
        let port = RemoteValue::Port(Port {
            node: Atom::new("nonode@nohost"),
            id: 3,
        });
        assert_eq!(present_default(&port).icon, Icon::PrimitiveValue);
        assert_eq!(present_default(&RemoteValue::atom("ok")).icon, Icon::PrimitiveValue);
        assert_eq!(present_default(&RemoteValue::list(vec![])).icon, Icon::Array);
        assert_eq!(present_default(&RemoteValue::tuple(vec![])).icon, Icon::Array);
        assert_eq!(present_default(&RemoteValue::string("x")).icon, Icon::Array);
        assert_eq!(present_default(&RemoteValue::map(Vec::new())).icon, Icon::Value);
    }

    #[test]
    fn test_struct_type_label() {
        let uri = RemoteValue::map(vec![
            (RemoteValue::atom("__struct__"), RemoteValue::atom("Elixir.URI")),
            (RemoteValue::atom("port"), RemoteValue::Integer(443)),
        ]);
        assert_eq!(present_default(&uri).type_label.as_deref(), Some("URI"));
        assert_eq!(
            present_default(&RemoteValue::map(Vec::new())).type_label.as_deref(),
            Some("map")
        );
    }

    #[test]
    fn test_truncation_counts_characters() {
        assert_eq!(truncate_display("héllo", 5), None);
        assert_eq!(truncate_display("héllo!", 5).as_deref(), Some("hé..."));
    }

    #[test]
    fn test_presentation_is_idempotent() {
        let value = RemoteValue::list((0..2000).map(RemoteValue::Integer).collect());
        assert_eq!(present_default(&value), present_default(&value));
    }
}
