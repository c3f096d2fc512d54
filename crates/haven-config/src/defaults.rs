//! Default value functions for serde deserialization.
//!
//! These functions forward to constants defined in `haven_core::defaults`.

use haven_core::defaults;

/// Generate default value functions that forward to haven_core::defaults constants.
macro_rules! default_fns {
    ($($fn_name:ident => $const_name:ident : $ty:ty),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> $ty {
                defaults::$const_name
            }
        )*
    };
}

/// Generate default value functions that return String from &str constants.
macro_rules! default_string_fns {
    ($($fn_name:ident => $const_name:ident),* $(,)?) => {
        $(
            pub(crate) fn $fn_name() -> String {
                defaults::$const_name.to_string()
            }
        )*
    };
}

default_fns! {
    default_free_daily_messages => DEFAULT_FREE_DAILY_MESSAGES: u32,
}

default_string_fns! {
    default_listen    => DEFAULT_LISTEN,
    default_redis_url => DEFAULT_REDIS_URL,
}
