//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `UserStoreError::query("timeout")` instead of spelling out the
//! struct variant.

macro_rules! define_port_error {
    (@ctor $name:ident $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct [`" $name "::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $name:ident $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = "Construct [`" $name "::" $variant "`]."]
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
                define_port_error!(@ctor $name $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors.

    define_port_error! {
        pub enum LookupError {
            Unreachable { host: String } => "cannot reach {host}",
            Throttled { retry_after_secs: u64 } => "throttled for {retry_after_secs}s",
            Rejected { field: String, attempts: u8 } => "{field} rejected after {attempts} attempts",
            Conflict => "conflicting write",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(
            LookupError::unreachable("db:5432").to_string(),
            "cannot reach db:5432"
        );
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = LookupError::throttled(30_u64);
        assert_eq!(
            err,
            LookupError::Throttled {
                retry_after_secs: 30
            }
        );
    }

    #[test]
    fn mixed_fields_follow_declaration_order() {
        assert_eq!(
            LookupError::rejected("email", 3_u8).to_string(),
            "email rejected after 3 attempts"
        );
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LookupError::conflict(), LookupError::Conflict);
    }
}
