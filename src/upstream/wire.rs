//! Upstream wire shapes
//!
//! Raw payload structures as the providers actually send them, and their
//! conversions into the gateway's models. The catalog nests everything under
//! `response` and wraps list elements (`docs[].doc`, `libs[].lib`); numeric
//! fields arrive as strings or numbers depending on the endpoint, so the
//! flexible ones go through a tolerant deserializer.

use serde::{Deserialize, Deserializer};

use crate::models::{BookRecord, LibraryRecord, LoanStatus};

/// Accepts a JSON string or number and yields a String either way.
fn stringish<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

// == Book Shapes ==

/// A book as any of the catalog's book-listing endpoints emit it.
#[derive(Debug, Deserialize)]
pub struct BookWire {
    #[serde(default)]
    pub bookname: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default, deserialize_with = "stringish")]
    pub publication_year: String,
    #[serde(default, deserialize_with = "stringish")]
    pub isbn13: String,
    #[serde(default, deserialize_with = "stringish")]
    pub vol: String,
    #[serde(rename = "bookImageURL", default)]
    pub book_image_url: String,
}

impl From<BookWire> for BookRecord {
    fn from(wire: BookWire) -> Self {
        BookRecord {
            bookname: wire.bookname,
            authors: wire.authors,
            publisher: wire.publisher,
            publication_year: wire.publication_year,
            isbn: wire.isbn13,
            vol: wire.vol,
            book_image_url: wire.book_image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DocEntry {
    pub doc: BookWire,
}

/// Envelope of `srchBooks` and `loanItemSrch`.
#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    pub response: Option<SearchBody>,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    pub docs: Option<Vec<DocEntry>>,
}

/// Envelope of `srchDtlList`.
#[derive(Debug, Deserialize)]
pub struct DetailPayload {
    pub response: Option<DetailBody>,
}

#[derive(Debug, Deserialize)]
pub struct DetailBody {
    pub detail: Option<Vec<DetailEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct DetailEntry {
    pub book: BookWire,
}

/// Envelope of `hotTrend`: one bucket of books per date.
#[derive(Debug, Deserialize)]
pub struct TrendPayload {
    pub response: Option<TrendBody>,
}

#[derive(Debug, Deserialize)]
pub struct TrendBody {
    pub results: Option<Vec<TrendEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct TrendEntry {
    pub result: TrendBucket,
}

#[derive(Debug, Deserialize)]
pub struct TrendBucket {
    #[serde(default)]
    pub docs: Vec<DocEntry>,
}

// == Library Shapes ==

#[derive(Debug, Deserialize)]
pub struct LibraryWire {
    #[serde(rename = "libCode", default, deserialize_with = "stringish")]
    pub lib_code: String,
    #[serde(rename = "libName", default)]
    pub lib_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "stringish")]
    pub tel: String,
    #[serde(default, deserialize_with = "stringish")]
    pub fax: String,
    #[serde(default, deserialize_with = "stringish")]
    pub latitude: String,
    #[serde(default, deserialize_with = "stringish")]
    pub longitude: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub closed: String,
    #[serde(rename = "operatingTime", default)]
    pub operating_time: String,
}

impl From<LibraryWire> for LibraryRecord {
    fn from(wire: LibraryWire) -> Self {
        LibraryRecord {
            lib_code: wire.lib_code,
            lib_name: wire.lib_name,
            address: wire.address,
            tel: wire.tel,
            fax: wire.fax,
            latitude: wire.latitude,
            longitude: wire.longitude,
            homepage: wire.homepage,
            closed: wire.closed,
            operating_time: wire.operating_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LibEntry {
    pub lib: LibraryWire,
}

/// Envelope of `libSrch` and `libSrchByBook`.
#[derive(Debug, Deserialize)]
pub struct LibrariesPayload {
    pub response: Option<LibrariesBody>,
}

#[derive(Debug, Deserialize)]
pub struct LibrariesBody {
    pub libs: Option<Vec<LibEntry>>,
}

// == Loan Status Shape ==

/// Envelope of `bookExist`; the result object matches our model directly.
#[derive(Debug, Deserialize)]
pub struct LoanPayload {
    pub response: Option<LoanBody>,
}

#[derive(Debug, Deserialize)]
pub struct LoanBody {
    pub result: Option<LoanStatus>,
}

// == Fallback Provider Shapes ==

/// Body of the fallback book search.
#[derive(Debug, Deserialize)]
pub struct FallbackPayload {
    #[serde(default)]
    pub items: Vec<FallbackItem>,
}

#[derive(Debug, Deserialize)]
pub struct FallbackItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub pubdate: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub image: String,
}

impl FallbackItem {
    /// Remaps the fallback's fields onto the catalog-shaped record. The
    /// fallback has no volume field, and its `pubdate` is `YYYYMMDD`.
    pub fn into_record(self) -> BookRecord {
        let publication_year = self.pubdate.get(..4).unwrap_or_default().to_string();
        BookRecord {
            bookname: self.title,
            authors: self.author,
            publisher: self.publisher,
            publication_year,
            isbn: self.isbn,
            vol: String::new(),
            book_image_url: self.image,
        }
    }
}
