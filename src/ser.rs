//! Encoding records into multimaps.

use crate::config::Config;
use crate::convert::{self, Leaf};
use crate::error::Result;
use crate::multimap::Multimap;
use crate::record::{FieldValue, Record, RecordValue};

/// Encodes a record into a new multimap.
///
/// ```
/// use qs_form::record;
///
/// record! {
///     struct Search {
///         query: String = "q",
///         page: u32 = "page,omitempty",
///         tags: Vec<String>,
///     }
/// }
///
/// let search = Search {
///     query: "rust".to_owned(),
///     page: 0,
///     tags: vec!["cli".to_owned(), "web".to_owned()],
/// };
///
/// let encoded = qs_form::encode(&search).unwrap();
/// assert_eq!(encoded.first("q"), Some("rust"));
/// assert!(!encoded.contains_key("page"));
/// assert_eq!(encoded.get("tags").map(<[String]>::len), Some(2));
/// ```
pub fn encode<T: FieldValue + ?Sized>(input: &T) -> Result<Multimap> {
    Config::default().encode(input)
}

/// Encodes a record straight to a flat querystring.
///
/// ```
/// use qs_form::record;
///
/// record! {
///     struct Query {
///         name: String,
///         age: u8,
///         occupation: String,
///     }
/// }
///
/// let q = Query {
///     name: "Alice".to_owned(),
///     age: 24,
///     occupation: "Student".to_owned(),
/// };
///
/// assert_eq!(
///     qs_form::to_string(&q).unwrap(),
///     "name=Alice&age=24&occupation=Student"
/// );
/// ```
pub fn to_string<T: FieldValue + ?Sized>(input: &T) -> Result<String> {
    Config::default().encode_string(input)
}

/// Accumulates encoded fields into a multimap.
///
/// Field types drive the encoder from [`FieldValue::encode_field`]; user code
/// normally goes through [`encode`] or [`Config::encode`] instead.
pub struct Encoder {
    output: Multimap,
    config: Config,
}

impl Encoder {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            output: Multimap::new(),
            config,
        }
    }

    /// Renders a leaf with the configured float format.
    pub fn marshal(&self, leaf: &dyn Leaf) -> Result<String> {
        convert::marshal(leaf, self.config.floats())
    }

    /// Appends the rendered leaf under `name`.
    pub fn encode_leaf(&mut self, name: &str, leaf: &dyn Leaf) -> Result<()> {
        let value = self.marshal(leaf)?;
        self.output.append(name, value);
        Ok(())
    }

    /// Appends the null marker under `name`.
    pub fn encode_null(&mut self, name: &str) {
        self.output.append(name, self.config.marker());
    }

    /// Binds `name` to exactly the rendered elements, even when there are
    /// none.
    pub fn encode_sequence<T: Leaf>(&mut self, name: &str, values: &[T]) -> Result<()> {
        let rendered = values
            .iter()
            .map(|value| self.marshal(value))
            .collect::<Result<Vec<_>>>()?;
        self.output.set(name, rendered);
        Ok(())
    }

    /// Appends one catch-all map entry, using the rendered key as the name.
    pub fn encode_entry(&mut self, key: &dyn Leaf, value: &dyn Leaf) -> Result<()> {
        let key = self.marshal(key)?;
        let value = self.marshal(value)?;
        self.output.append(&key, value);
        Ok(())
    }

    /// Encodes the fields of `record` inline.
    pub fn encode_record(&mut self, record: &dyn RecordValue) -> Result<()> {
        record.encode_fields(self)
    }

    pub fn finish(self) -> Multimap {
        self.output
    }
}

/// Walks the fields of `record` in declaration order.
pub(crate) fn encode_fields<R: Record>(record: &R, encoder: &mut Encoder) -> Result<()> {
    let descriptor = R::descriptor()?;
    for field in descriptor.fields() {
        let tag = field.tag();
        if tag.is_excluded() {
            continue;
        }
        let value = field.get(record);
        if tag.omit_empty() && value.is_zero() {
            tracing::trace!(field = field.ident(), "omitting empty field");
            continue;
        }
        value.encode_field(tag.name(), encoder)?;
    }
    Ok(())
}
