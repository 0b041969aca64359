//! Sample registry files used across integration tests.

/// One valid person with the default separators.
pub const ALICE_FILE: &str = "Name:Number,Email\nAlice:0630/1234567,alice@x.com\n";

/// Custom separators, blank lines and one unparseable row.
#[allow(dead_code)]
pub const MIXED_FILE: &str = "\n\nName;Number|Email\n\nAnn;+36 30 123 4567|ann@x.com\nnot a row\nBen;06-30-765-4321|bad@\n\n";

/// A file whose first non-blank line is not a header.
#[allow(dead_code)]
pub const HEADERLESS_FILE: &str = "\nAlice:06301234567,alice@x.com\n";

/// A registry file with `count` valid rows using the default separators.
#[allow(dead_code)]
pub fn large_file(count: usize) -> String {
    let mut content = String::from("Name:Number,Email\n");
    for i in 0..count {
        content.push_str(&format!("Person{}:0630{:07},p{}@x.com\n", i, i, i));
    }
    content
}
