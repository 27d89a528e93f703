/// Declares a struct and implements [`Record`](crate::Record) for it.
///
/// Each field may carry a tag after `=`: a string of the form
/// `"name,opt1,opt2"`. The name is the multimap key (an empty name keeps the
/// field identifier) and `omitempty` skips the field while it holds its zero
/// value. A field named `"-"` is never encoded or decoded, though its name is
/// still known to the decoder and so never lands in a catch-all map.
///
/// Field types must implement [`FieldValue`](crate::FieldValue): leaves,
/// `Option`, `Vec` of leaves, maps of leaves (the catch-all) and other
/// records. Nested records and `Option`s of records need `Default`.
///
/// ```
/// use std::collections::BTreeMap;
///
/// use qs_form::record;
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Page {
///         pub title: String = "t",
///         pub limit: Option<u32> = ",omitempty",
///         pub draft: bool = "-",
///         pub extra: BTreeMap<String, String>,
///     }
/// }
///
/// let mut page = Page::default();
/// qs_form::from_str(&mut page, "t=Intro&limit=10&lang=en").unwrap();
/// assert_eq!(page.title, "Intro");
/// assert_eq!(page.limit, Some(10));
/// assert_eq!(page.extra.get("lang").map(String::as_str), Some("en"));
///
/// page.limit = None;
/// assert_eq!(qs_form::to_string(&page).unwrap(), "t=Intro&lang=en");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn descriptor() -> $crate::Result<&'static $crate::RecordDescriptor<Self>> {
                static DESCRIPTOR: ::std::sync::OnceLock<
                    ::std::result::Result<$crate::RecordDescriptor<$name>, $crate::DescriptorError>,
                > = ::std::sync::OnceLock::new();
                DESCRIPTOR
                    .get_or_init(|| {
                        $crate::RecordDescriptor::<$name>::builder(::std::stringify!($name))
                            $(
                                .field::<$ty>(
                                    ::std::stringify!($field),
                                    $crate::__tag!($($tag)?),
                                    |record| &record.$field,
                                    |record| &mut record.$field,
                                )
                            )*
                            .build()
                    })
                    .as_ref()
                    .map_err(|err| $crate::Error::Descriptor(err.clone()))
            }
        }

        impl $crate::FieldValue for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::Record
            }

            fn catch_all_fields() -> usize {
                <$name as $crate::Record>::descriptor()
                    .map_or(0, |descriptor| descriptor.catch_all_fields())
            }

            fn is_zero(&self) -> bool {
                $crate::RecordValue::fields_zero(self)
            }

            fn encode_field(&self, _name: &str, encoder: &mut $crate::Encoder) -> $crate::Result<()> {
                encoder.encode_record(self)
            }

            fn decode_field(
                &mut self,
                _name: &str,
                decoder: &mut $crate::Decoder<'_>,
            ) -> $crate::Result<()> {
                decoder.decode_record(self)
            }

            fn sweep_catch_all(&mut self, decoder: &$crate::Decoder<'_>) -> bool {
                $crate::RecordValue::sweep_fields(self, decoder)
            }

            fn as_record(&self) -> ::std::option::Option<&dyn $crate::RecordValue> {
                ::std::option::Option::Some(self)
            }

            fn as_record_mut(&mut self) -> ::std::option::Option<&mut dyn $crate::RecordValue> {
                ::std::option::Option::Some(self)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tag {
    () => {
        ::std::option::Option::None
    };
    ($tag:literal) => {
        ::std::option::Option::Some($tag)
    };
}

/// Implements [`Leaf`](crate::Leaf) and [`FieldValue`](crate::FieldValue)
/// for a type with its own string conversion.
///
/// List the capabilities the type implements, [`Marshal`](crate::Marshal)
/// and/or [`Unmarshal`](crate::Unmarshal); without a list both are assumed.
/// An empty list (`leaf!(Id:)`) declares a leaf with no conversion at all,
/// which fails with [`Error::ConversionNotFound`](crate::Error) when used.
/// The type must be `Default + PartialEq`, its zero value being the default.
///
/// ```
/// use qs_form::{Marshal, Result, Unmarshal, leaf, record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Csv(Vec<String>);
///
/// impl Marshal for Csv {
///     fn marshal(&self) -> Result<String> {
///         Ok(self.0.join(","))
///     }
/// }
///
/// impl Unmarshal for Csv {
///     fn unmarshal(&mut self, src: &str) -> Result<()> {
///         self.0 = src.split(',').map(str::to_owned).collect();
///         Ok(())
///     }
/// }
///
/// leaf!(Csv);
///
/// record! {
///     #[derive(Default)]
///     struct Query {
///         fields: Csv,
///     }
/// }
///
/// let mut query = Query::default();
/// qs_form::from_str(&mut query, "fields=id,name").unwrap();
/// assert_eq!(query.fields, Csv(vec!["id".into(), "name".into()]));
/// let encoded = qs_form::encode(&query).unwrap();
/// assert_eq!(encoded.first("fields"), Some("id,name"));
/// ```
#[macro_export]
macro_rules! leaf {
    ($ty:ty: $($capability:ident),* $(,)?) => {
        impl $crate::Leaf for $ty {
            fn is_zero(&self) -> bool {
                *self == <$ty as ::std::default::Default>::default()
            }

            $($crate::__leaf_capability!($capability);)*
        }

        $crate::__leaf_field!($ty);
    };
    ($ty:ty) => {
        $crate::leaf!($ty: Marshal, Unmarshal);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __leaf_capability {
    (Marshal) => {
        fn marshaler(&self) -> ::std::option::Option<&dyn $crate::Marshal> {
            ::std::option::Option::Some(self)
        }
    };
    (Unmarshal) => {
        fn unmarshaler(&mut self) -> ::std::option::Option<&mut dyn $crate::Unmarshal> {
            ::std::option::Option::Some(self)
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __leaf_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::FieldValue for $ty {
                fn is_zero(&self) -> bool {
                    $crate::Leaf::is_zero(self)
                }

                fn encode_field(
                    &self,
                    name: &str,
                    encoder: &mut $crate::Encoder,
                ) -> $crate::Result<()> {
                    encoder.encode_leaf(name, self)
                }

                fn decode_field(
                    &mut self,
                    name: &str,
                    decoder: &mut $crate::Decoder<'_>,
                ) -> $crate::Result<()> {
                    decoder.decode_leaf(name, self)
                }
            }
        )*
    };
}
