pub mod attendance;
pub mod company;

pub use attendance::AttendanceService;
pub use company::CompanyService;

/// Trims `value`, treating blank text the same as an absent field.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::present;

    #[test]
    fn present_trims_and_rejects_blank() {
        assert_eq!(present(Some("  Acme ".into())), Some("Acme".into()));
        assert_eq!(present(Some("   ".into())), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(None), None);
    }
}
