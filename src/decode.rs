use tracing::warn;

use crate::store::{Store, Value};
use crate::tagged::TaggedValue;

/// Deepest array nesting decoded by default. Matches the array nesting limit of the D-Bus wire
/// format.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Flattens tagged values into a [`Store`].
///
/// Every primitive reached is inserted under the key the decoder was invoked with. Arrays are
/// walked in order and every element, at any depth, is inserted under that same key. Values of an
/// unsupported kind are skipped with a warning without affecting their siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: Option<usize>,
}

impl Decoder {
    /// Creates a decoder that skips branches nested deeper than `max_depth` arrays. `None` means
    /// no limit.
    pub fn new(max_depth: Option<usize>) -> Self {
        Decoder { max_depth }
    }

    /// Deepest array nesting decoded, or `None` for no limit.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Decodes `value` into `store`, under `key`.
    pub fn decode(&self, value: TaggedValue, key: &str, store: &mut Store) {
        self.decode_at(value, key, store, 0);
    }

    fn decode_at(&self, value: TaggedValue, key: &str, store: &mut Store, depth: usize) {
        if let Some(max_depth) = self.max_depth {
            if depth > max_depth {
                warn!(key, max_depth, "metadata value nested too deeply; skipping");
                return;
            }
        }

        match value {
            TaggedValue::String(v) => store.insert(key, Value::String(v)),
            TaggedValue::Int32(v) => store.insert(key, Value::Int32(v)),
            TaggedValue::UInt64(v) => store.insert(key, Value::UInt64(v)),
            TaggedValue::Float64(v) => store.insert(key, Value::Float64(v)),
            TaggedValue::Array(elements) => {
                for element in elements {
                    self.decode_at(element, key, store, depth + 1);
                }
            }
            TaggedValue::Unsupported(signature) => {
                warn!(key, signature = %signature, "unhandled metadata value kind; skipping");
            }
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(Some(DEFAULT_MAX_DEPTH))
    }
}

/// Decodes `value` into `store` under `key`, using a [`Decoder`] with default settings.
pub fn decode(value: TaggedValue, key: &str, store: &mut Store) {
    Decoder::default().decode(value, key, store);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Kind;
    use tracing_test::traced_test;

    fn entries(store: &Store) -> Vec<(&str, Value)> {
        store
            .iter()
            .map(|entry| (entry.key(), entry.value().clone()))
            .collect()
    }

    #[test]
    fn it_inserts_primitives() {
        let mut store = Store::new();
        decode("Karma Police".into(), "xesam:title", &mut store);
        decode(TaggedValue::Int32(6), "xesam:trackNumber", &mut store);
        decode(TaggedValue::UInt64(264_066_000), "mpris:length", &mut store);
        decode(TaggedValue::Float64(0.8), "xesam:autoRating", &mut store);

        assert_eq!(
            entries(&store),
            vec![
                ("xesam:title", Value::from("Karma Police")),
                ("xesam:trackNumber", Value::Int32(6)),
                ("mpris:length", Value::UInt64(264_066_000)),
                ("xesam:autoRating", Value::Float64(0.8)),
            ]
        );
    }

    #[test]
    fn it_flattens_arrays_under_one_key() {
        let mut store = Store::new();
        let artists = TaggedValue::Array(vec![
            "Radiohead".into(),
            "Thom Yorke".into(),
            "Jonny".into(),
        ]);
        decode(artists, "xesam:artist", &mut store);

        assert_eq!(
            entries(&store),
            vec![
                ("xesam:artist", Value::from("Radiohead")),
                ("xesam:artist", Value::from("Thom Yorke")),
                ("xesam:artist", Value::from("Jonny")),
            ]
        );
        assert_eq!(store.get_str("xesam:artist"), Ok(String::from("Radiohead")));
    }

    #[test]
    fn it_flattens_nested_arrays() {
        let mut store = Store::new();
        let nested = TaggedValue::Array(vec![
            TaggedValue::Array(vec![
                TaggedValue::Int32(1),
                TaggedValue::Array(vec![TaggedValue::Int32(2)]),
            ]),
            TaggedValue::UInt64(3),
            TaggedValue::Array(vec![]),
            "four".into(),
        ]);
        decode(nested, "custom:numbers", &mut store);

        assert_eq!(
            entries(&store),
            vec![
                ("custom:numbers", Value::Int32(1)),
                ("custom:numbers", Value::Int32(2)),
                ("custom:numbers", Value::UInt64(3)),
                ("custom:numbers", Value::from("four")),
            ]
        );
    }

    #[test]
    fn it_keeps_accumulating_repeated_keys() {
        let mut store = Store::new();
        decode("first".into(), "xesam:comment", &mut store);
        decode("second".into(), "xesam:comment", &mut store);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_str("xesam:comment"), Ok(String::from("first")));
    }

    #[test]
    #[traced_test]
    fn it_skips_unsupported_values() {
        let mut store = Store::new();
        decode(TaggedValue::Unsupported(String::from("b")), "custom:liked", &mut store);

        assert!(store.is_empty());
        assert!(logs_contain("unhandled metadata value kind"));
    }

    #[test]
    fn it_keeps_siblings_of_unsupported_values() {
        let mut store = Store::new();
        let mixed = TaggedValue::Array(vec![
            "before".into(),
            TaggedValue::Unsupported(String::from("a{sv}")),
            "after".into(),
        ]);
        decode(mixed, "custom:mixed", &mut store);

        assert_eq!(
            entries(&store),
            vec![
                ("custom:mixed", Value::from("before")),
                ("custom:mixed", Value::from("after")),
            ]
        );
    }

    #[test]
    #[traced_test]
    fn it_skips_branches_past_the_depth_limit() {
        let mut store = Store::new();
        let decoder = Decoder::new(Some(1));
        let value = TaggedValue::Array(vec![
            TaggedValue::Int32(1),
            TaggedValue::Array(vec![TaggedValue::Int32(2)]),
            TaggedValue::Int32(3),
        ]);
        decoder.decode(value, "custom:deep", &mut store);

        assert_eq!(
            entries(&store),
            vec![
                ("custom:deep", Value::Int32(1)),
                ("custom:deep", Value::Int32(3)),
            ]
        );
        assert!(logs_contain("nested too deeply"));
    }

    #[test]
    fn it_decodes_any_depth_without_a_limit() {
        let mut value = TaggedValue::Int32(42);
        for _ in 0..100 {
            value = TaggedValue::Array(vec![value]);
        }

        let mut store = Store::new();
        Decoder::new(None).decode(value, "custom:deep", &mut store);

        assert_eq!(store.get("custom:deep", Kind::Int32), Ok(Value::Int32(42)));
    }
}
