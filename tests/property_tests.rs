//! Property-based tests using proptest

use proptest::prelude::*;
use supermarket_sales_logging::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    proptest::sample::select(LogLevel::ALL.to_vec())
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse regardless of letter case
    #[test]
    fn test_level_parse_ignores_case(
        level in any_level(),
        mask in proptest::collection::vec(any::<bool>(), 8)
    ) {
        let mixed: String = level
            .to_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        prop_assert_eq!(mixed.parse::<LogLevel>().unwrap(), level);
    }

    /// Ordering agrees with the numeric level
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.number() <= b.number());
        prop_assert_eq!(a.cmp(&b), a.number().cmp(&b.number()));
    }

    /// Anything that isn't a level name is rejected
    #[test]
    fn test_unknown_level_rejected(name in "[a-z]{1,12}") {
        let known = ["debug", "info", "warning", "warn", "error", "critical", "fatal"];
        prop_assume!(!known.contains(&name.as_str()));
        let is_invalid = matches!(name.parse::<LogLevel>(), Err(LoggerError::InvalidLevel { .. }));
        prop_assert!(is_invalid);
    }
}

// ============================================================================
// Accessor Tests
// ============================================================================

proptest! {
    #[test]
    fn test_logger_names_are_prefixed(name in "[a-zA-Z_][a-zA-Z0-9_.]{0,40}") {
        let handle = get_logger(&name);
        prop_assert!(handle.name().starts_with("supermarket_sales."));
        prop_assert_eq!(&handle.name()["supermarket_sales.".len()..], name.as_str());
    }
}

// ============================================================================
// Format Tests
// ============================================================================

proptest! {
    /// Rendered records always fit on one line
    #[test]
    fn test_message_renders_on_one_line(message in ".*", level in any_level()) {
        let entry = LogEntry::new("supermarket_sales.prop", level, &message);
        let line = LogFormat::default().format(&entry);
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
        let suffix = format!(" - supermarket_sales.prop - {} - {}", level, entry.message);
        prop_assert!(line.ends_with(&suffix));
    }

    /// Literal text without '%' survives compilation unchanged
    #[test]
    fn test_literal_text_preserved(text in "[^%]{0,40}") {
        let format = LogFormat::parse(&text).unwrap();
        let entry = LogEntry::new("supermarket_sales", LogLevel::Info, "ignored");
        prop_assert_eq!(format.format(&entry), text);
    }

    /// Unknown placeholder names never compile
    #[test]
    fn test_unknown_fields_rejected(field in "[a-z]{1,10}") {
        let known = [
            "asctime", "msecs", "created", "name", "levelname", "levelno", "message", "thread",
            "process",
        ];
        prop_assume!(!known.contains(&field.as_str()));
        let pattern = format!("%({})s", field);
        prop_assert!(LogFormat::parse(&pattern).is_err());
    }
}
