//! Helper macro generating port error enums with snake_case constructors.
//!
//! Every variant carries named fields; each generated constructor accepts
//! `impl Into<T>` per field so call sites can pass `&str` for `String`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
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
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum ExamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Elapsed { seconds: u64 } => "elapsed after {seconds}s",
            Both { message: String, seconds: u64 } => "{message} ({seconds}s)",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::unreachable("refused");
        assert_eq!(err.to_string(), "unreachable: refused");
    }

    #[test]
    fn constructors_widen_numeric_fields() {
        let err = ExamplePortError::elapsed(10_u32);
        assert_eq!(err.to_string(), "elapsed after 10s");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::both("probe", 5_u64);
        assert_eq!(err, ExamplePortError::Both { message: "probe".to_owned(), seconds: 5 });
    }
}
