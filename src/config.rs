use crate::de::Decoder;
use crate::error::{Error, Result};
use crate::multimap::Multimap;
use crate::query;
use crate::record::FieldValue;
use crate::ser::Encoder;

/// Configuration for encoding and decoding behavior.
///
/// The `Config` struct allows you to customize how `qs_form` renders values
/// and which marker stands in for an absent pointer.
///
/// ## Null marker
///
/// An `Option` field that is `None` (and not tagged `omitempty`) is written
/// as its name bound to the null marker, and a decoded value equal to the
/// marker sets the field back to `None`. The default marker is `"null"`,
/// which collides with a string field holding the literal text `null`. Pick
/// a different marker when compatibility with existing producers does not
/// matter.
///
/// ```
/// use qs_form::{Config, record};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     struct Query {
///         limit: Option<u32>,
///     }
/// }
///
/// let config = Config::new().null_marker("~");
/// let encoded = config.encode(&Query::default()).unwrap();
/// assert_eq!(encoded.get("limit"), Some(&["~".to_string()][..]));
///
/// let mut query = Query { limit: Some(3) };
/// config.decode(&mut query, &encoded).unwrap();
/// assert_eq!(query.limit, None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    null_marker: &'static str,
    float_format: FloatFormat,
    use_form_encoding: bool,
}

/// How `f32`/`f64` fields are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FloatFormat {
    /// Shortest text that parses back to the same value.
    #[default]
    Shortest,
    /// Fixed precision: 16 fractional digits for `f32`, 32 for `f64`.
    ///
    /// Values smaller than the last printed digit come out as zero.
    Fixed,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            null_marker: "null",
            float_format: FloatFormat::Shortest,
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
        }
    }

    /// Specifies the text that marks an absent pointer. Default is `"null"`.
    pub const fn null_marker(mut self, null_marker: &'static str) -> Self {
        self.null_marker = null_marker;
        self
    }

    /// Specifies how floating point fields are rendered.
    ///
    /// The default is [`FloatFormat::Shortest`].
    pub const fn float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }

    /// Only affects [`Config::encode_string`]. By default keys and values are
    /// escaped with the minimal query-string set and spaces become `+`.
    /// Setting this to `true` switches to the stricter
    /// `application/x-www-form-urlencoded` set.
    ///
    /// The `default_to_form_encoding` Cargo feature makes `true` the default.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    pub(crate) fn marker(&self) -> &'static str {
        self.null_marker
    }

    pub(crate) fn floats(&self) -> FloatFormat {
        self.float_format
    }

    /// Encodes a record into a new multimap using this `Config`.
    pub fn encode<T: FieldValue + ?Sized>(self, input: &T) -> Result<Multimap> {
        let record = input
            .as_record()
            .ok_or_else(|| Error::Type(std::any::type_name::<T>()))?;
        tracing::trace!(record = record.record_name(), "encoding record");
        let mut encoder = Encoder::new(self);
        encoder.encode_record(record)?;
        Ok(encoder.finish())
    }

    /// Decodes a multimap into an existing record using this `Config`.
    ///
    /// Fields whose keys are absent keep their value, except strings, `Any`
    /// and sequences, which are reset. On error the record is left partially
    /// updated and should be discarded.
    pub fn decode<T: FieldValue + ?Sized>(self, output: &mut T, input: &Multimap) -> Result<()> {
        let record = output
            .as_record_mut()
            .ok_or_else(|| Error::Type(std::any::type_name::<T>()))?;
        tracing::trace!(record = record.record_name(), keys = input.len(), "decoding record");
        let mut decoder = Decoder::new(input, self);
        decoder.decode_record(record)?;
        decoder.sweep(record);
        Ok(())
    }

    /// Encodes a record straight to a flat querystring using this `Config`.
    pub fn encode_string<T: FieldValue + ?Sized>(self, input: &T) -> Result<String> {
        let encoded = self.encode(input)?;
        Ok(query::to_string(&encoded, self.use_form_encoding))
    }

    /// Parses a flat querystring and decodes it into a record using this
    /// `Config`.
    pub fn decode_str<T: FieldValue + ?Sized>(self, output: &mut T, input: &str) -> Result<()> {
        let parsed = query::parse(input)?;
        self.decode(output, &parsed)
    }
}
