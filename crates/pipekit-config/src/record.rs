/// Generate a configuration record type from a constructor parameter list.
///
/// Each entry is a parameter of the form `name: Type` (required) or
/// `name: Type = default` (optional). The macro generates a struct with one
/// public field per parameter, in declaration order, and a `new` constructor
/// that takes the required parameters in declaration order and fills the
/// defaulted ones with their declared defaults.
///
/// The generated struct derives `Clone`, `Debug`, `PartialEq`,
/// `serde::Serialize` and `serde::Deserialize` so records can be persisted as
/// hyperparameter files. Crates invoking the macro need `serde` with the
/// `derive` feature in their dependencies.
///
/// Doc comments and other attributes on the struct and on individual
/// parameters pass through to the generated items.
///
/// # Examples
///
/// ```
/// use pipekit_config::define_config;
///
/// define_config! {
///     /// Hyperparameters for a two-layer MLP.
///     pub struct MlpConfig {
///         in_features: usize,
///         out_features: usize,
///         hidden: usize = 128,
///         dropout: f64 = 0.1,
///     }
/// }
///
/// let config = MlpConfig::new(784, 10);
/// assert_eq!(config.hidden, 128);
/// assert_eq!(config.dropout, 0.1);
///
/// // Defaulted fields are overridden with plain struct update syntax.
/// let config = MlpConfig { dropout: 0.5, ..config };
/// assert_eq!(config.dropout, 0.5);
/// ```
#[macro_export]
macro_rules! define_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::define_config!(@munch
            meta [$(#[$meta])*]
            vis [$vis]
            name [$name]
            fields []
            required []
            defaulted []
            rest [$($body)*]
        );
    };

    // Defaulted parameter.
    (@munch
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        fields [$($fields:tt)*]
        required [$($required:tt)*]
        defaulted [$($defaulted:tt)*]
        rest [$(#[$fmeta:meta])* $field:ident : $ty:ty = $default:expr, $($rest:tt)*]
    ) => {
        $crate::define_config!(@munch
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            fields [$($fields)* { $(#[$fmeta])* $field : $ty }]
            required [$($required)*]
            defaulted [$($defaulted)* { $field = $default }]
            rest [$($rest)*]
        );
    };
    (@munch
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        fields [$($fields:tt)*]
        required [$($required:tt)*]
        defaulted [$($defaulted:tt)*]
        rest [$(#[$fmeta:meta])* $field:ident : $ty:ty = $default:expr]
    ) => {
        $crate::define_config!(@munch
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            fields [$($fields)* { $(#[$fmeta])* $field : $ty }]
            required [$($required)*]
            defaulted [$($defaulted)* { $field = $default }]
            rest []
        );
    };

    // Required parameter.
    (@munch
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        fields [$($fields:tt)*]
        required [$($required:tt)*]
        defaulted [$($defaulted:tt)*]
        rest [$(#[$fmeta:meta])* $field:ident : $ty:ty, $($rest:tt)*]
    ) => {
        $crate::define_config!(@munch
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            fields [$($fields)* { $(#[$fmeta])* $field : $ty }]
            required [$($required)* { $field : $ty }]
            defaulted [$($defaulted)*]
            rest [$($rest)*]
        );
    };
    (@munch
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        fields [$($fields:tt)*]
        required [$($required:tt)*]
        defaulted [$($defaulted:tt)*]
        rest [$(#[$fmeta:meta])* $field:ident : $ty:ty]
    ) => {
        $crate::define_config!(@munch
            meta [$($meta)*]
            vis [$vis]
            name [$name]
            fields [$($fields)* { $(#[$fmeta])* $field : $ty }]
            required [$($required)* { $field : $ty }]
            defaulted [$($defaulted)*]
            rest []
        );
    };

    // All parameters consumed: emit the record and its constructor.
    (@munch
        meta [$($meta:tt)*]
        vis [$vis:vis]
        name [$name:ident]
        fields [$({ $(#[$fmeta:meta])* $ffield:ident : $fty:ty })*]
        required [$({ $rfield:ident : $rty:ty })*]
        defaulted [$({ $dfield:ident = $ddefault:expr })*]
        rest []
    ) => {
        $($meta)*
        #[derive(Clone, Debug, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $ffield : $fty, )*
        }

        impl $name {
            /// Create a record from the required parameters, filling the
            /// defaulted fields with their declared defaults.
            #[allow(clippy::too_many_arguments)]
            pub fn new( $($rfield : $rty),* ) -> Self {
                Self {
                    $($rfield,)*
                    $($dfield : $ddefault,)*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    define_config! {
        /// Hyperparameters for a small test network.
        pub struct SmallNetConfig {
            a: i64,
            b: f32,
            c: Option<Vec<i64>> = None,
            d: i64 = 4,
        }
    }

    define_config! {
        struct AllDefaultsConfig {
            lr: f64 = 1e-3,
            epochs: usize = 10,
        }
    }

    #[test]
    fn required_and_defaulted_fields() {
        let config = SmallNetConfig::new(1, 2.0);
        assert_eq!(config.a, 1);
        assert_eq!(config.b, 2.0);
        assert_eq!(config.c, None);
        assert_eq!(config.d, 4);
    }

    #[test]
    fn defaults_overridable_by_struct_update() {
        let config = SmallNetConfig {
            d: 8,
            ..SmallNetConfig::new(1, 2.0)
        };
        assert_eq!(config.d, 8);
        assert_eq!(config.c, None);
    }

    #[test]
    fn no_required_fields() {
        let config = AllDefaultsConfig::new();
        assert_eq!(config.lr, 1e-3);
        assert_eq!(config.epochs, 10);
    }

    #[test]
    fn field_order_matches_declaration() -> Result<(), serde_json::Error> {
        // serde emits fields in declaration order, which pins the record
        // layout to the parameter list.
        let config = SmallNetConfig::new(1, 2.0);
        let json = serde_json::to_string(&config)?;
        assert_eq!(json, r#"{"a":1,"b":2.0,"c":null,"d":4}"#);
        Ok(())
    }

    #[test]
    fn serde_round_trip() -> Result<(), serde_json::Error> {
        let config = SmallNetConfig::new(7, 0.5);
        let json = serde_json::to_string(&config)?;
        let back: SmallNetConfig = serde_json::from_str(&json)?;
        assert_eq!(back, config);
        Ok(())
    }
}
