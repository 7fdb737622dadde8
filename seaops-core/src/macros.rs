//! Provides some useful macros to avoid repetitive code.

/// A macro to define a typed record of optional numeric attributes together with an enum which
/// names every attribute. Names are contract strings used by input files and rule expressions.
macro_rules! attribute_record {
    (
        $(#[$record_meta:meta])* $record:ident,
        $(#[$attr_meta:meta])* $attr:ident {
            $($(#[$field_meta:meta])* $field:ident => $variant:ident : $text:literal,)+
        }
    ) => {
        $(#[$record_meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $record {
            $($(#[$field_meta])* pub $field: Option<Float>,)+
        }

        impl $record {
            /// Returns a value of the given attribute.
            pub fn get(&self, attr: $attr) -> Option<Float> {
                match attr {
                    $($attr::$variant => self.$field,)+
                }
            }

            /// Sets a value of the given attribute.
            pub fn set(&mut self, attr: $attr, value: Float) -> &mut Self {
                match attr {
                    $($attr::$variant => self.$field = Some(value),)+
                }
                self
            }
        }

        $(#[$attr_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $attr {
            $($(#[$field_meta])* $variant,)+
        }

        impl $attr {
            /// Lists all attributes.
            pub const ALL: &'static [$attr] = &[$($attr::$variant,)+];

            /// Returns attribute name as used in input files and rule expressions.
            pub fn name(&self) -> &'static str {
                match self {
                    $($attr::$variant => $text,)+
                }
            }

            /// Finds attribute by its name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some($attr::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $attr {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}
