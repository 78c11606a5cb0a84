//! Integration tests for types

#[cfg(test)]
mod tests {
    use pkgv_types::*;
    use proptest::prelude::*;

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&FileKind::Socket).unwrap();
        assert_eq!(json, r#""socket""#);
        let kind: FileKind = serde_json::from_str(r#""fifo""#).unwrap();
        assert_eq!(kind, FileKind::Fifo);
    }

    #[test]
    fn test_output_format_serialization() {
        let json = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(json, r#""json""#);
        assert_eq!(ColorChoice::default(), ColorChoice::Auto);
    }

    #[test]
    fn test_stat_error_policy() {
        assert_eq!(StatErrorPolicy::default(), StatErrorPolicy::Abort);
        assert_eq!("report".parse::<StatErrorPolicy>(), Ok(StatErrorPolicy::Report));
        assert!("ignore".parse::<StatErrorPolicy>().is_err());
        let json = serde_json::to_string(&StatErrorPolicy::Report).unwrap();
        assert_eq!(json, r#""report""#);
    }

    proptest! {
        #[test]
        fn timestamp_text_matches_integer_pair(secs in 0i64..4_000_000_000, nanos in 0u32..1_000_000_000) {
            let text = format!("{secs}.{nanos:09}");
            let parsed: Timestamp = text.parse().unwrap();
            prop_assert_eq!(parsed, Timestamp::new(secs, nanos));
            prop_assert_eq!(parsed.to_string(), text);
        }

        #[test]
        fn every_kind_round_trips_through_its_keyword(index in 0usize..7) {
            let kind = FileKind::ALL[index];
            prop_assert_eq!(kind.as_str().parse::<FileKind>().unwrap(), kind);
            prop_assert_eq!(FileKind::from_mode(kind.mode_bits() | 0o644), Some(kind));
        }
    }
}
