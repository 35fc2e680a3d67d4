//! `define_port_error!`: error enums for driven ports.
//!
//! Every variant is struct-like. The macro derives `thiserror::Error`, adds a
//! snake-case constructor per variant whose parameters take `impl Into<_>`,
//! and a `kind()` accessor naming the variant for structured log fields.

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
                $variant { $($field: $ty),* },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build a `" $variant "` error."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*

                /// Snake-case variant name.
                pub fn kind(&self) -> &'static str {
                    match self {
                        $( Self::$variant { .. } => stringify!([<$variant:snake>]), )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerError {
            Offline {} => "ledger offline",
            WriteRejected { message: String } => "write rejected: {message}",
            StaleRevision { expected: u64, found: u64 } =>
                "expected revision {expected}, found {found}",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerError::write_rejected("duplicate email");
        assert_eq!(err.to_string(), "write rejected: duplicate email");
    }

    #[test]
    fn several_fields_keep_their_order() {
        let err = LedgerError::stale_revision(3_u64, 5_u64);
        assert_eq!(err, LedgerError::StaleRevision { expected: 3, found: 5 });
        assert_eq!(err.kind(), "stale_revision");
    }

    #[test]
    fn fieldless_variants_still_get_constructors() {
        assert_eq!(LedgerError::offline().kind(), "offline");
    }
}
