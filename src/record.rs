//! Record descriptors and the per-type traversal hooks.
//!
//! A record type describes itself once through a [`RecordDescriptor`]: the
//! ordered list of its fields, each with a resolved [`Tag`] and accessors
//! returning the field as a `&dyn FieldValue`. The [`record!`](crate::record)
//! macro builds the descriptor on first use and caches it for the lifetime of
//! the program.
//!
//! Every field type implements [`FieldValue`], which says how the value is
//! written to an [`Encoder`] and read back from a [`Decoder`]:
//!
//! | Rust type                  | shape      | multimap form                     |
//! |----------------------------|------------|-----------------------------------|
//! | leaf (`bool`, `i32`, ...)  | `Leaf`     | `name=value`                      |
//! | `Option<T>`                | `Pointer`  | `T`'s form, or `name=null`        |
//! | `Vec<T>` with `T: Leaf`    | `Sequence` | `name=v1&name=v2`                 |
//! | `HashMap<K, V>` and co.    | `CatchAll` | one key per entry, name unused    |
//! | another record             | `Record`   | its fields inline, name unused    |

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::convert::Leaf;
use crate::de::{self, Decoder};
use crate::error::{DescriptorError, Result};
use crate::ser::{self, Encoder};
use crate::tag::Tag;

/// Structural classification of a field type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Leaf,
    Pointer,
    Sequence,
    CatchAll,
    Record,
}

/// A type that can appear as a record field.
pub trait FieldValue {
    fn shape() -> Shape
    where
        Self: Sized,
    {
        Shape::Leaf
    }

    /// Number of catch-all maps reachable through this type.
    fn catch_all_fields() -> usize
    where
        Self: Sized,
    {
        0
    }

    /// Whether the value is its kind's zero value; consulted by `omitempty`.
    fn is_zero(&self) -> bool;

    fn encode_field(&self, name: &str, encoder: &mut Encoder) -> Result<()>;

    fn decode_field(&mut self, name: &str, decoder: &mut Decoder<'_>) -> Result<()>;

    /// Fills the catch-all map with the decoder's unclaimed keys. Returns
    /// `true` once a map has been filled.
    fn sweep_catch_all(&mut self, _decoder: &Decoder<'_>) -> bool {
        false
    }

    fn as_record(&self) -> Option<&dyn RecordValue> {
        None
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn RecordValue> {
        None
    }
}

/// A record type with a cached descriptor. Implemented by
/// [`record!`](crate::record).
pub trait Record: FieldValue + Sized + 'static {
    fn descriptor() -> Result<&'static RecordDescriptor<Self>>;
}

/// Object-safe view of a record, used by the traversal.
pub trait RecordValue {
    fn record_name(&self) -> &'static str;

    fn encode_fields(&self, encoder: &mut Encoder) -> Result<()>;

    fn decode_fields(&mut self, decoder: &mut Decoder<'_>) -> Result<()>;

    fn sweep_fields(&mut self, decoder: &Decoder<'_>) -> bool;

    /// Every field, excluded ones included, holds its zero value.
    fn fields_zero(&self) -> bool;
}

impl<R: Record> RecordValue for R {
    fn record_name(&self) -> &'static str {
        R::descriptor().map_or_else(|_| std::any::type_name::<R>(), |d| d.name())
    }

    fn encode_fields(&self, encoder: &mut Encoder) -> Result<()> {
        ser::encode_fields(self, encoder)
    }

    fn decode_fields(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
        de::decode_fields(self, decoder)
    }

    fn sweep_fields(&mut self, decoder: &Decoder<'_>) -> bool {
        de::sweep_fields(self, decoder)
    }

    fn fields_zero(&self) -> bool {
        R::descriptor().is_ok_and(|d| d.fields().iter().all(|f| f.get(self).is_zero()))
    }
}

/// The ordered field list of a record type.
pub struct RecordDescriptor<R> {
    name: &'static str,
    fields: Vec<FieldDescriptor<R>>,
    catch_all_fields: usize,
}

impl<R> RecordDescriptor<R> {
    pub fn builder(name: &'static str) -> DescriptorBuilder<R> {
        DescriptorBuilder {
            name,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    pub fn field(&self, ident: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.iter().find(|f| f.ident == ident)
    }

    pub fn catch_all_fields(&self) -> usize {
        self.catch_all_fields
    }
}

impl<R> fmt::Debug for RecordDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// One field of a record: its declared identifier, resolved tag, shape and
/// accessors.
pub struct FieldDescriptor<R> {
    ident: &'static str,
    tag: Tag<'static>,
    shape: Shape,
    catch_all_fields: usize,
    get: fn(&R) -> &dyn FieldValue,
    get_mut: fn(&mut R) -> &mut dyn FieldValue,
}

impl<R> FieldDescriptor<R> {
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn tag(&self) -> Tag<'static> {
        self.tag
    }

    pub fn name(&self) -> &'static str {
        self.tag.name()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn get<'r>(&self, record: &'r R) -> &'r dyn FieldValue {
        (self.get)(record)
    }

    pub fn get_mut<'r>(&self, record: &'r mut R) -> &'r mut dyn FieldValue {
        (self.get_mut)(record)
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("ident", &self.ident)
            .field("tag", &self.tag)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Collects fields in declaration order.
pub struct DescriptorBuilder<R> {
    name: &'static str,
    fields: Vec<FieldDescriptor<R>>,
}

impl<R> DescriptorBuilder<R> {
    /// Adds a field of type `T` declared as `ident` with optional raw tag.
    pub fn field<T: FieldValue>(
        mut self,
        ident: &'static str,
        tag: Option<&'static str>,
        get: fn(&R) -> &dyn FieldValue,
        get_mut: fn(&mut R) -> &mut dyn FieldValue,
    ) -> Self {
        self.fields.push(FieldDescriptor {
            ident,
            tag: Tag::resolve(ident, tag),
            shape: T::shape(),
            catch_all_fields: T::catch_all_fields(),
            get,
            get_mut,
        });
        self
    }

    /// Finishes the descriptor, rejecting records that reach more than one
    /// catch-all map.
    pub fn build(self) -> Result<RecordDescriptor<R>, DescriptorError> {
        let catch_all_fields = self
            .fields
            .iter()
            .filter(|f| !f.tag.is_excluded())
            .map(|f| f.catch_all_fields)
            .sum();
        if catch_all_fields > 1 {
            return Err(DescriptorError::DuplicateCatchAll {
                record: self.name,
                count: catch_all_fields,
            });
        }
        tracing::debug!(
            record = self.name,
            fields = self.fields.len(),
            "built record descriptor"
        );
        Ok(RecordDescriptor {
            name: self.name,
            fields: self.fields,
            catch_all_fields,
        })
    }
}

impl<T: FieldValue + Default> FieldValue for Option<T> {
    fn shape() -> Shape {
        Shape::Pointer
    }

    fn catch_all_fields() -> usize {
        T::catch_all_fields()
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn encode_field(&self, name: &str, encoder: &mut Encoder) -> Result<()> {
        match self {
            Some(inner) => inner.encode_field(name, encoder),
            None => {
                encoder.encode_null(name);
                Ok(())
            }
        }
    }

    fn decode_field(&mut self, name: &str, decoder: &mut Decoder<'_>) -> Result<()> {
        if decoder.is_null(name) {
            *self = None;
            return Ok(());
        }
        self.insert(T::default()).decode_field(name, decoder)
    }

    fn sweep_catch_all(&mut self, decoder: &Decoder<'_>) -> bool {
        self.as_mut()
            .is_some_and(|inner| inner.sweep_catch_all(decoder))
    }

    fn as_record(&self) -> Option<&dyn RecordValue> {
        self.as_ref().and_then(|inner| inner.as_record())
    }
}

impl<T: Leaf + Default> FieldValue for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn encode_field(&self, name: &str, encoder: &mut Encoder) -> Result<()> {
        encoder.encode_sequence(name, self)
    }

    fn decode_field(&mut self, name: &str, decoder: &mut Decoder<'_>) -> Result<()> {
        *self = decoder.decode_sequence(name)?;
        Ok(())
    }
}

macro_rules! catch_all_map {
    ($($map:ident: $($bound:ident),+;)*) => {
        $(
            impl<K, V> FieldValue for $map<K, V>
            where
                K: Leaf + Default $(+ $bound)+,
                V: Leaf + Default,
            {
                fn shape() -> Shape {
                    Shape::CatchAll
                }

                fn catch_all_fields() -> usize {
                    1
                }

                fn is_zero(&self) -> bool {
                    self.is_empty()
                }

                fn encode_field(&self, _name: &str, encoder: &mut Encoder) -> Result<()> {
                    for (key, value) in self {
                        encoder.encode_entry(key, value)?;
                    }
                    Ok(())
                }

                fn decode_field(&mut self, _name: &str, _decoder: &mut Decoder<'_>) -> Result<()> {
                    Ok(())
                }

                fn sweep_catch_all(&mut self, decoder: &Decoder<'_>) -> bool {
                    *self = decoder.sweep_entries().collect();
                    true
                }
            }
        )*
    };
}

catch_all_map! {
    HashMap: Eq, Hash;
    BTreeMap: Ord;
    IndexMap: Eq, Hash;
}
