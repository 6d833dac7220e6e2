//! Macro generating port error enums with `thiserror` messages and
//! snake_case constructors that accept anything convertible into each field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated error enums.
    define_port_error! {
        pub enum LookupError {
            Missing { message: String } => "missing: {message}",
            Rejected { status: u16 } => "rejected with {status}",
            Upstream { status: u16, message: String } => "upstream {status}: {message}",
            Offline => "offline",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_text() {
        assert_eq!(LookupError::missing("order 9").to_string(), "missing: order 9");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(LookupError::rejected(404_u16).to_string(), "rejected with 404");
    }

    #[test]
    fn mixed_fields_follow_declaration_order() {
        let err = LookupError::upstream(502_u16, "bad gateway");
        assert_eq!(err, LookupError::Upstream { status: 502, message: "bad gateway".to_owned() });
        assert_eq!(err.to_string(), "upstream 502: bad gateway");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LookupError::offline(), LookupError::Offline);
    }
}
