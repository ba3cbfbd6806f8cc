// src/macros.rs

#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Parse a CSS selector literal once and cache it for the life of the program.
/// All selector strings in this crate are static, so parse failure is a bug.
#[macro_export]
macro_rules! sel {
    ($css:expr) => {{
        static SEL: ::std::sync::OnceLock<::scraper::Selector> = ::std::sync::OnceLock::new();
        SEL.get_or_init(|| ::scraper::Selector::parse($css).expect("static css selector"))
    }};
}
