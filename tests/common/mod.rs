//! Common test helpers and utilities shared across test suite.

use std::path::PathBuf;

use chk_isbn::RangeStore;

/// Path to the trimmed range message used by the integration tests.
///
/// It holds the groups 978-0, 978-1, 978-88, 978-99936, 979-10 and 979-8.
pub fn range_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/RangeMessage.xml")
}

/// Creates a store with the test range message loaded.
pub fn loaded_store() -> RangeStore {
    let store = RangeStore::new();
    store
        .load_range_data(range_file())
        .expect("Failed to load test range data");
    store
}

/// Builds a range message document around the given `<Group>` records.
#[allow(dead_code)]
pub fn range_message(groups: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <ISBNRangeMessage>\n\
         <MessageSource>International ISBN Agency</MessageSource>\n\
         <MessageSerialNumber>test</MessageSerialNumber>\n\
         <MessageDate>Tue, 1 Oct 2024 00:00:00 BST</MessageDate>\n\
         <RegistrationGroups>\n{groups}\n</RegistrationGroups>\n\
         </ISBNRangeMessage>\n"
    )
}
