//! Library domain models

use serde::{Deserialize, Serialize};

// == Library Record ==
/// One library branch as the catalog describes it. Identity is `lib_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRecord {
    #[serde(rename = "libCode")]
    pub lib_code: String,
    #[serde(rename = "libName")]
    pub lib_name: String,
    pub address: String,
    pub tel: String,
    pub fax: String,
    pub latitude: String,
    pub longitude: String,
    pub homepage: String,
    pub closed: String,
    #[serde(rename = "operatingTime")]
    pub operating_time: String,
}

// == Annotated Library ==
/// A roster library annotated with whether it holds a given book.
///
/// Produced only by the region/holdings join; serializes as the library's
/// own fields with `hasBook` alongside them, keeping the catalog's "Y"/"N"
/// flag convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedLibrary {
    #[serde(rename = "hasBook")]
    pub has_book: String,
    #[serde(flatten)]
    pub library: LibraryRecord,
}
