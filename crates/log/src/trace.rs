//! Trace level gate
//!
//! Trace records are only produced when `FANLOG_TRACE` is set to something
//! other than empty or `0`. The variable is read once, on first use.

use std::sync::LazyLock;

/// Environment variable opening the trace gate
pub const TRACE_ENV: &str = "FANLOG_TRACE";

static TRACE_ENABLED: LazyLock<bool> =
    LazyLock::new(|| gate_from(std::env::var(TRACE_ENV).ok().as_deref()));

/// Whether trace records are produced
#[inline]
pub fn trace_enabled() -> bool {
    *TRACE_ENABLED
}

/// Interpret a raw environment value
pub fn gate_from(value: Option<&str>) -> bool {
    !matches!(value, None | Some("" | "0"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, false)]
    #[case(Some(""), false)]
    #[case(Some("0"), false)]
    #[case(Some("1"), true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), true)]
    fn gate_values(#[case] value: Option<&str>, #[case] expected: bool) {
        assert_eq!(gate_from(value), expected);
    }
}
