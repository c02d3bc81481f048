pub(crate) const DEFAULT_USER_AGENT: &str = concat!("overload/", env!("CARGO_PKG_VERSION"));
