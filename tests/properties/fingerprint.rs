//! Property tests for fingerprint parsing.

use proptest::prelude::*;

use schema_sync::Fingerprint;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A fingerprint parses back from its own text form, however
    /// it is decorated.
    #[test]
    fn property_parse_accepts_decorated_digest(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        prefixed in any::<bool>(),
        upper in any::<bool>(),
        padding in "[ \t\n]{0,3}",
    ) {
        let fingerprint = Fingerprint::of(&bytes);
        let mut text = fingerprint.to_string();
        if upper {
            text = text.to_uppercase();
        }
        if prefixed {
            text = format!("sha256:{}", text);
        }
        let text = format!("{padding}{text}{padding}");

        prop_assert_eq!(Fingerprint::parse(&text).unwrap(), fingerprint);
    }

    /// PROPERTY: Text of the wrong length is always rejected.
    #[test]
    fn property_parse_rejects_wrong_length(text in "[0-9a-f]{0,63}|[0-9a-f]{65,80}") {
        prop_assert!(Fingerprint::parse(&text).is_err());
    }

    /// PROPERTY: Distinct contents get distinct fingerprints.
    #[test]
    fn property_distinct_bytes_distinct_fingerprints(
        a in proptest::collection::vec(any::<u8>(), 0..64),
        b in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
    }
}
