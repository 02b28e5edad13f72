//! Parsing ISBNs against the range message fixture.

mod common;

use chk_isbn::{IsbnError, RangeStore};
use common::loaded_store;

#[test]
fn test_parse_before_load_fails() {
    let store = RangeStore::new();
    for input in ["88 04 47328 2", "978-0547928241", "089686281x"] {
        assert!(
            matches!(store.parse_isbn(input), Err(IsbnError::NoRangeData)),
            "ParseISBN({input:?}) should need range data"
        );
    }
    // Malformed input is rejected before range data is consulted
    assert!(matches!(
        store.parse_isbn("9780590d32053"),
        Err(IsbnError::InvalidCharacter { .. })
    ));
    assert!(matches!(
        store.parse_isbn(""),
        Err(IsbnError::InvalidLength { length: 0 })
    ));
}

#[test]
fn test_parse_success_and_failure() {
    let store = loaded_store();
    let cases = [
        ("88 04 47328 2", true),
        ("978-8804473282", true),
        ("0547928246", true),
        ("978-0547928241", true),
        ("978 0670013951", true),
        ("089686281x", true),
        ("9780822527602", true),
        ("9780590d32053", false),
        ("978-8891230195", true),
        ("9780590132053F", false),
        ("9780590732053", false),
        ("081666303x", false),
        ("", false),
    ];
    for (input, want) in cases {
        let got = store.parse_isbn(input);
        assert_eq!(got.is_ok(), want, "ParseISBN({input:?}) == {got:?}");
    }
}

#[test]
fn test_error_kinds() {
    let store = loaded_store();
    assert!(matches!(
        store.parse_isbn("9780590132053F"),
        Err(IsbnError::InvalidLength { length: 14 })
    ));
    assert!(matches!(
        store.parse_isbn("0816bad66303x"),
        Err(IsbnError::InvalidCharacter {
            position: 4,
            character: 'B'
        })
    ));
    assert!(matches!(
        store.parse_isbn("081666303x"),
        Err(IsbnError::InvalidCheckDigit {
            expected: '3',
            found: 'X'
        })
    ));
}

#[test]
fn test_display() {
    let store = loaded_store();
    let cases = [
        ("88 04 47328 2", "978-88-04-47328-2 (88-04-47328-2)"),
        ("978-8804473282", "978-88-04-47328-2 (88-04-47328-2)"),
        ("0547928246", "978-0-547-92824-1 (0-547-92824-6)"),
        ("978-0547928241", "978-0-547-92824-1 (0-547-92824-6)"),
        ("978 0670013951", "978-0-670-01395-1 (0-670-01395-1)"),
        ("089686281x", "978-0-89686-281-4 (0-89686-281-X)"),
        ("9780822527602", "978-0-8225-2760-2 (0-8225-2760-X)"),
        ("9780590132053", "978-0-590-13205-3 (0-590-13205-9)"),
        ("978-8891230195", "978-88-912-3019-5 (88-912-3019-7)"),
        ("9780590132053F", ""),
        ("9780590732053", ""),
        ("081666303x", ""),
        ("0816bad66303x", ""),
        ("", ""),
    ];
    for (input, want) in cases {
        let got = store
            .parse_isbn(input)
            .map(|isbn| isbn.to_string())
            .unwrap_or_default();
        assert_eq!(got, want, "Display for {input:?}");
    }
}

#[test]
fn test_isbn10_isbn13_conversion() {
    let store = loaded_store();
    let cases = [
        ("88 04 47328 2", "9788804473282", "8804473282"),
        ("978-8804473282", "9788804473282", "8804473282"),
        ("0547928246", "9780547928241", "0547928246"),
        ("978-0547928241", "9780547928241", "0547928246"),
        ("978 0670013951", "9780670013951", "0670013951"),
        ("089686281x", "9780896862814", "089686281X"),
        ("9780822527602", "9780822527602", "082252760X"),
        ("9780590132053", "9780590132053", "0590132059"),
        ("978-8891230195", "9788891230195", "8891230197"),
        ("9780590132053F", "", ""),
        ("9780590732053", "", ""),
        ("081666303x", "", ""),
        ("", "", ""),
    ];
    for (input, want13, want10) in cases {
        let isbn = store.parse_isbn(input).unwrap_or_default();
        assert_eq!(isbn.to_isbn13().unwrap_or_default(), want13, "ISBN-13 of {input:?}");
        assert_eq!(isbn.to_isbn10().unwrap_or_default(), want10, "ISBN-10 of {input:?}");
    }
}

#[test]
fn test_check_digits_filled_in() {
    let store = loaded_store();

    let isbn = store.parse_isbn("0547928246").unwrap();
    assert!(isbn.is_valid);
    assert_eq!(isbn.check_digit10, Some('6'));
    assert_eq!(isbn.check_digit13, Some('1'));
    assert_eq!(isbn.agency, "English language");

    let isbn = store.parse_isbn("978-8891230195").unwrap();
    assert_eq!(isbn.check_digit10, Some('7'));
    assert_eq!(isbn.check_digit13, Some('5'));
    assert_eq!(isbn.agency, "Italy");
}

#[test]
fn test_979_prefixes() {
    let store = loaded_store();

    let france = store.parse_isbn("979-10-90636-07-1").unwrap();
    assert_eq!(france.agency, "France");
    assert_eq!(france.registrant, "90636");
    assert_eq!(france.check_digit10, None);
    assert_eq!(france.to_isbn10(), None);
    assert_eq!(france.to_string(), "979-10-90636-07-1");

    let us = store.parse_isbn("9798220123456").unwrap();
    assert_eq!(us.registration_group, "8");
    assert_eq!(us.registrant, "220");
    assert_eq!(us.to_string(), "979-8-220-12345-6");

    let us = store.parse_isbn("9798850123451").unwrap();
    assert_eq!(us.registrant, "8501");
    assert_eq!(us.publication, "2345");
}

#[test]
fn test_unassigned_registrant_is_still_valid() {
    let store = loaded_store();

    // Bhutan's only one-digit range has an upper bound of zero and is dropped
    let isbn = store.parse_isbn("9789993601234").unwrap();
    assert!(isbn.is_valid);
    assert!(!isbn.is_fully_resolved());
    assert_eq!(isbn.registration_group, "99936");
    assert_eq!(isbn.registrant, "");
    assert_eq!(isbn.publication, "0123");
    assert_eq!(isbn.to_isbn10().as_deref(), Some("9993601233"));

    // 6xx is a zero-length rule in the range message
    let isbn = store.parse_isbn("9993661236").unwrap();
    assert_eq!(isbn.registrant, "");
    assert_eq!(isbn.publication, "6123");
    assert_eq!(isbn.to_isbn13().as_deref(), Some("9789993661238"));

    let isbn = store.parse_isbn("9789993671237").unwrap();
    assert!(isbn.is_fully_resolved());
    assert_eq!(isbn.registrant, "712");
    assert_eq!(isbn.publication, "3");
}

#[test]
fn test_elements_partition_digits() {
    let store = loaded_store();
    for input in [
        "9780547928241",
        "9788804473282",
        "9791090636071",
        "9789993601234",
        "9771234567898",
        "9784123456784",
    ] {
        let isbn = store.parse_isbn(input).unwrap();
        let body = format!(
            "{}{}{}{}",
            isbn.prefix, isbn.registration_group, isbn.registrant, isbn.publication
        );
        assert_eq!(body, input[..12], "elements of {input}");
    }
}

#[test]
fn test_parse_batch_matches_single_parses() {
    let store = loaded_store();
    let inputs = vec![
        "88 04 47328 2",
        "9780590d32053",
        "089686281x",
        "979-10-90636-07-1",
        "081666303x",
    ];
    let batch = store.parse_batch(inputs.as_slice());
    for (input, result) in inputs.iter().zip(batch) {
        let single = store.parse_isbn(input);
        assert_eq!(
            result.as_ref().ok(),
            single.as_ref().ok(),
            "batch and single parse of {input:?} differ"
        );
        assert_eq!(result.is_err(), single.is_err());
    }
}
