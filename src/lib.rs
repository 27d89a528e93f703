//! Typed records to and from flat querystring-style multimaps.
//!
//! A [`Multimap`] is the shape of URL query parameters: string keys, each
//! bound to an ordered list of string values. `qs_form` moves data between a
//! multimap and a record declared with [`record!`], driven by per-field tags
//! of the form `"name,omitempty"`.
//!
//! ## Supported Types
//!
//! At the **top level** only records can be encoded and decoded. Fields may
//! be:
//!
//! * leaves: `bool`, the integer and float types, `String`, [`Any`], and any
//!   type given its own conversion through [`leaf!`];
//! * `Option<T>`, written as `T`'s form or as the null marker (`"null"` by
//!   default) when `None`;
//! * `Vec<T>` of leaves, one value per element under the same key;
//! * nested records, whose fields are inlined into the parent's keys;
//! * at most one map of leaves (`HashMap`, `BTreeMap` or `IndexMap`), the
//!   catch-all: every entry becomes its own key when encoding, and every key
//!   no field claims is collected into it when decoding.
//!
//! ## Usage
//!
//! ```
//! use std::collections::HashMap;
//!
//! use qs_form::record;
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     struct Address {
//!         city: String,
//!         postcode: String = "zip",
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default, PartialEq)]
//!     struct QueryParams {
//!         id: u8,
//!         name: String,
//!         address: Address,
//!         phone: Option<u32> = ",omitempty",
//!         user_ids: Vec<u8>,
//!         rest: HashMap<String, String>,
//!     }
//! }
//!
//! let params = QueryParams {
//!     id: 42,
//!     name: "Acme".to_string(),
//!     address: Address {
//!         city: "Springfield".to_string(),
//!         postcode: "12345".to_string(),
//!     },
//!     phone: Some(5550100),
//!     user_ids: vec![1, 2, 3, 4],
//!     rest: HashMap::new(),
//! };
//!
//! let encoded = qs_form::to_string(&params).unwrap();
//! assert_eq!(
//!     encoded,
//!     "id=42&name=Acme&city=Springfield&zip=12345&phone=5550100&\
//!      user_ids=1&user_ids=2&user_ids=3&user_ids=4"
//! );
//!
//! let mut decoded = QueryParams::default();
//! qs_form::from_str(&mut decoded, &encoded).unwrap();
//! assert_eq!(decoded, params);
//! ```
//!
//! Decoding writes into an existing value: fields whose keys are absent keep
//! what they held, except strings, [`Any`] and sequences, which are reset.
//! An `Option` field is set to `Some` unless its value is the null marker, so
//! an absent key yields `Some` of the default value.

#[macro_use]
mod macros;

mod config;
mod convert;
mod de;
mod error;
mod multimap;
pub mod query;
mod record;
mod ser;
mod tag;

#[doc(inline)]
pub use config::{Config, FloatFormat};
#[doc(inline)]
pub use convert::{Any, IntSlot, Leaf, Marshal, Scalar, ScalarMut, UintSlot, Unmarshal};
#[doc(inline)]
pub use de::{Decoder, decode, from_str};
pub use error::{BoxError, DescriptorError, Error, Result};
#[doc(inline)]
pub use multimap::{Iter, Multimap};
#[doc(inline)]
pub use record::{
    DescriptorBuilder, FieldDescriptor, FieldValue, Record, RecordDescriptor, RecordValue, Shape,
};
#[doc(inline)]
pub use ser::{Encoder, encode, to_string};
#[doc(inline)]
pub use tag::{EXCLUDED, OMIT_EMPTY, Tag, TagOptions};
