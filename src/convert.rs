//! String conversion for leaf values.
//!
//! A leaf is anything that becomes a single string in the multimap. Each leaf
//! type picks its conversion through the [`Leaf`] trait, in this order:
//!
//! 1. its own [`Marshal`] / [`Unmarshal`] capability, if it exposes one;
//! 2. the native scalar table, if it maps onto a primitive kind
//!    ([`Scalar`] / [`ScalarMut`]);
//! 3. otherwise the conversion fails with [`Error::ConversionNotFound`].
//!
//! The two directions are independent: a type may only know how to render
//! itself, in which case decoding it reports `ConversionNotFound`.

mod any;
mod native;

pub use any::Any;

use crate::config::FloatFormat;
use crate::error::{Error, Result};

/// Serialize-to-string capability.
pub trait Marshal {
    fn marshal(&self) -> Result<String>;
}

/// Deserialize-from-string capability. Implementations mutate `self` in
/// place and may leave it untouched.
pub trait Unmarshal {
    fn unmarshal(&mut self, src: &str) -> Result<()>;
}

/// A value that converts to and from a single string.
///
/// Primitive types implement this through the native table. Custom types
/// usually implement it with the [`leaf!`](crate::leaf) macro.
pub trait Leaf {
    /// Whether the value equals its kind's zero value; consulted by
    /// `omitempty`.
    fn is_zero(&self) -> bool;

    fn marshaler(&self) -> Option<&dyn Marshal> {
        None
    }

    fn unmarshaler(&mut self) -> Option<&mut dyn Unmarshal> {
        None
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        None
    }

    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        None
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Borrowed view of a primitive value, widened to its 64-bit kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    Any(&'a Any),
}

/// Mutable slot of a primitive value.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    Bool(&'a mut bool),
    Int(IntSlot<'a>),
    Uint(UintSlot<'a>),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    Any(&'a mut Any),
}

macro_rules! slots {
    ($slot:ident($wide:ty) { $($variant:ident($ty:ty)),* $(,)? }) => {
        /// Integer slot; values are parsed at 64 bits and narrowed on store.
        #[derive(Debug)]
        pub enum $slot<'a> {
            $($variant(&'a mut $ty),)*
        }

        impl $slot<'_> {
            #[allow(clippy::unnecessary_cast)]
            pub fn set(self, value: $wide) {
                match self {
                    $(Self::$variant(slot) => *slot = value as $ty,)*
                }
            }
        }
    };
}

slots!(IntSlot(i64) {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
});

slots!(UintSlot(u64) {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
});

/// Renders a leaf to its string form.
pub fn marshal(leaf: &dyn Leaf, float_format: FloatFormat) -> Result<String> {
    if let Some(marshaler) = leaf.marshaler() {
        return marshaler.marshal();
    }
    match leaf.scalar() {
        Some(scalar) => Ok(native::format(scalar, float_format)),
        None => Err(Error::ConversionNotFound(leaf.type_name())),
    }
}

/// Parses `src` into a leaf.
pub fn unmarshal(leaf: &mut dyn Leaf, src: &str) -> Result<()> {
    let type_name = leaf.type_name();
    if let Some(unmarshaler) = leaf.unmarshaler() {
        return unmarshaler.unmarshal(src);
    }
    match leaf.scalar_mut() {
        Some(slot) => native::parse(slot, src),
        None => Err(Error::ConversionNotFound(type_name)),
    }
}

macro_rules! int_leaf {
    ($($ty:ty => $kind:ident($slot:ident::$variant:ident) as $wide:ty,)*) => {
        $(
            impl Leaf for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                #[allow(clippy::unnecessary_cast)]
                fn scalar(&self) -> Option<Scalar<'_>> {
                    Some(Scalar::$kind(*self as $wide))
                }

                fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
                    Some(ScalarMut::$kind($slot::$variant(self)))
                }
            }
        )*
        crate::__leaf_field!($($ty),*);
    };
}

int_leaf! {
    i8 => Int(IntSlot::I8) as i64,
    i16 => Int(IntSlot::I16) as i64,
    i32 => Int(IntSlot::I32) as i64,
    i64 => Int(IntSlot::I64) as i64,
    isize => Int(IntSlot::Isize) as i64,
    u8 => Uint(UintSlot::U8) as u64,
    u16 => Uint(UintSlot::U16) as u64,
    u32 => Uint(UintSlot::U32) as u64,
    u64 => Uint(UintSlot::U64) as u64,
    usize => Uint(UintSlot::Usize) as u64,
}

impl Leaf for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Bool(*self))
    }

    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::Bool(self))
    }
}

impl Leaf for f32 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::F32(*self))
    }

    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::F32(self))
    }
}

impl Leaf for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::F64(*self))
    }

    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::F64(self))
    }
}

impl Leaf for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self))
    }

    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::Str(self))
    }
}

impl Leaf for Any {
    fn is_zero(&self) -> bool {
        matches!(self, Any::String(s) if s.is_empty())
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Any(self))
    }

    fn scalar_mut(&mut self) -> Option<ScalarMut<'_>> {
        Some(ScalarMut::Any(self))
    }
}

crate::__leaf_field!(bool, f32, f64, String, Any);
