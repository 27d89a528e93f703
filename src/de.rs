//! Decoding multimaps into records.

use std::collections::HashSet;

use crate::config::Config;
use crate::convert::{self, Leaf};
use crate::error::Result;
use crate::multimap::Multimap;
use crate::record::{FieldValue, Record, RecordValue};

/// Decodes a multimap into an existing record.
///
/// ```
/// use qs_form::{Multimap, record};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     struct Filter {
///         size: i64 = "IV",
///         exact: bool = "b_val",
///     }
/// }
///
/// let input: Multimap = [("IV", "1"), ("b_val", "true")].into_iter().collect();
/// let mut filter = Filter::default();
/// qs_form::decode(&mut filter, &input).unwrap();
/// assert_eq!(filter, Filter { size: 1, exact: true });
/// ```
pub fn decode<T: FieldValue + ?Sized>(output: &mut T, input: &Multimap) -> Result<()> {
    Config::default().decode(output, input)
}

/// Parses a flat querystring and decodes it into an existing record.
///
/// ```
/// use qs_form::record;
///
/// record! {
///     #[derive(Default)]
///     struct Query {
///         name: String,
///         tags: Vec<String> = "tag",
///     }
/// }
///
/// let mut q = Query::default();
/// qs_form::from_str(&mut q, "name=Alice+Smith&tag=a&tag=b%26c").unwrap();
/// assert_eq!(q.name, "Alice Smith");
/// assert_eq!(q.tags, ["a", "b&c"]);
/// ```
pub fn from_str<T: FieldValue + ?Sized>(output: &mut T, input: &str) -> Result<()> {
    Config::default().decode_str(output, input)
}

/// Reads fields out of a multimap.
///
/// Tracks every field name visited so far. Keys never claimed by a field are
/// what a catch-all map receives once the walk is over.
pub struct Decoder<'a> {
    input: &'a Multimap,
    config: Config,
    claimed: HashSet<&'static str>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(input: &'a Multimap, config: Config) -> Self {
        Self {
            input,
            config,
            claimed: HashSet::new(),
        }
    }

    /// The first value bound to `key`, or `""` when there is none.
    pub fn first(&self, key: &str) -> &'a str {
        self.input.first(key).unwrap_or_default()
    }

    /// All values bound to `key`.
    pub fn values(&self, key: &str) -> &'a [String] {
        self.input.get(key).unwrap_or_default()
    }

    /// Whether the first value bound to `key` is the null marker.
    pub fn is_null(&self, key: &str) -> bool {
        self.first(key) == self.config.marker()
    }

    pub fn unmarshal(&self, leaf: &mut dyn Leaf, src: &str) -> Result<()> {
        convert::unmarshal(leaf, src)
    }

    /// Parses the first value bound to `name` into `leaf`. An absent key is
    /// treated as the empty string.
    pub fn decode_leaf(&mut self, name: &str, leaf: &mut dyn Leaf) -> Result<()> {
        self.unmarshal(leaf, self.first(name))
    }

    /// Builds a fresh sequence from every value bound to `name`, in order.
    pub fn decode_sequence<T: Leaf + Default>(&mut self, name: &str) -> Result<Vec<T>> {
        self.values(name)
            .iter()
            .map(|src| {
                let mut element = T::default();
                self.unmarshal(&mut element, src)?;
                Ok(element)
            })
            .collect()
    }

    /// Decodes the fields of `record` from the same multimap.
    pub fn decode_record(&mut self, record: &mut dyn RecordValue) -> Result<()> {
        record.decode_fields(self)
    }

    pub(crate) fn claim(&mut self, name: &'static str) {
        self.claimed.insert(name);
    }

    /// Keys no field has claimed, each with its first value.
    pub fn unclaimed(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.input
            .iter()
            .filter(|(key, _)| !self.claimed.contains(*key))
            .map(|(key, values)| (key, values.first().map_or("", String::as_str)))
    }

    /// Converts unclaimed keys into catch-all entries, dropping any whose key
    /// or value does not convert.
    pub fn sweep_entries<K, V>(&self) -> impl Iterator<Item = (K, V)> + '_
    where
        K: Leaf + Default,
        V: Leaf + Default,
    {
        self.unclaimed().filter_map(|(raw_key, raw_value)| {
            let mut key = K::default();
            let mut value = V::default();
            let converted = self
                .unmarshal(&mut key, raw_key)
                .and_then(|()| self.unmarshal(&mut value, raw_value));
            match converted {
                Ok(()) => Some((key, value)),
                Err(err) => {
                    tracing::debug!(key = raw_key, error = %err, "dropping unclaimed entry");
                    None
                }
            }
        })
    }

    /// Hands the unclaimed keys to the first catch-all map reachable from
    /// `record`.
    pub(crate) fn sweep(&self, record: &mut dyn RecordValue) {
        if !record.sweep_fields(self) {
            tracing::trace!("no catch-all map to sweep into");
        }
    }
}

/// Walks the fields of `record` in declaration order, claiming each name.
pub(crate) fn decode_fields<R: Record>(record: &mut R, decoder: &mut Decoder<'_>) -> Result<()> {
    let descriptor = R::descriptor()?;
    for field in descriptor.fields() {
        let tag = field.tag();
        decoder.claim(tag.name());
        if tag.is_excluded() {
            continue;
        }
        field.get_mut(record).decode_field(tag.name(), decoder)?;
    }
    Ok(())
}

/// Finds the catch-all map among the fields of `record` and fills it.
pub(crate) fn sweep_fields<R: Record>(record: &mut R, decoder: &Decoder<'_>) -> bool {
    let Ok(descriptor) = R::descriptor() else {
        return false;
    };
    if descriptor.catch_all_fields() == 0 {
        return false;
    }
    descriptor
        .fields()
        .iter()
        .filter(|field| !field.tag().is_excluded())
        .any(|field| field.get_mut(record).sweep_catch_all(decoder))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    record! {
        #[derive(Default)]
        struct Known {
            known: String = "Known",
            ignored: String = "-",
            rest: HashMap<String, i32>,
        }
    }

    fn input(pairs: &[(&str, &str)]) -> Multimap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn unclaimed_keys_reach_the_catch_all() {
        let mut known = Known::default();
        decode(
            &mut known,
            &input(&[("Known", "x"), ("-", "5"), ("a", "1"), ("b", "nope"), ("c", "")]),
        )
        .unwrap();
        assert_eq!(known.known, "x");
        assert_eq!(known.ignored, "");
        assert_eq!(known.rest, HashMap::from([("a".to_owned(), 1), ("c".to_owned(), 0)]));
    }

    #[test]
    fn first_value_wins() {
        let mut known = Known::default();
        decode(&mut known, &input(&[("Known", "x"), ("Known", "y")])).unwrap();
        assert_eq!(known.known, "x");
    }

    #[test]
    fn unclaimed_skips_claimed_names() {
        let map = input(&[("a", "1"), ("b", "2")]);
        let mut decoder = Decoder::new(&map, Config::default());
        decoder.claim("a");
        assert_eq!(decoder.unclaimed().collect::<Vec<_>>(), [("b", "2")]);
    }
}
