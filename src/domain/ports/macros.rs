//! Macro behind the driven-port error enums.
//!
//! Every port error in this crate is a struct variant carrying context
//! fields. The macro expands a variant list into the enum, its `thiserror`
//! display messages, and a snake_case constructor per variant that takes
//! `impl Into<T>` for each field.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $( $field : $ty, )*);
            )*
        }
    };

    // All fields consumed: emit the constructor.
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    // Fold one field into the parameter and initialiser lists.
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Rejected { attempts: u32 } => "rejected after {attempts} attempts",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::unreachable("host down");
        assert_eq!(err.to_string(), "unreachable: host down");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExamplePortError::rejected(3_u32);
        assert_eq!(err.to_string(), "rejected after 3 attempts");
    }
}
