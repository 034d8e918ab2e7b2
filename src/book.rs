//! Book records

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    pub bookname: String,
    pub author: String,
    pub publisher: String,
    pub location: String,
    pub library: String,
}

impl Book {
    /// Arguments for `createBook`, in [`crate::schema::BOOK`] order.
    pub fn into_args(self) -> Vec<String> {
        vec![
            self.bookname,
            self.author,
            self.publisher,
            self.location,
            self.library,
        ]
    }
}

/// Number of holdings seeded by `initLedger`.
pub const DEFAULT_CATALOG_SIZE: usize = 9;

/// Holdings of one title across the Baekseok libraries.
pub fn default_catalog() -> Vec<Book> {
    (0..DEFAULT_CATALOG_SIZE)
        .map(|ix| Book {
            bookname: "연금술사".into(),
            author: "파울로 코엘료".into(),
            publisher: "문학동네".into(),
            location: "고양시".into(),
            library: format!("백석 도서관{ix}"),
        })
        .collect()
}

#[cfg(test)]
mod test_book {
    use crate::book::{default_catalog, Book, DEFAULT_CATALOG_SIZE};

    #[test]
    fn catalog_keys_are_unique() {
        let books: Vec<Book> = default_catalog();
        assert_eq!(DEFAULT_CATALOG_SIZE, books.len());
        let mut libs: Vec<&str> = books.iter().map(|b| b.library.as_str()).collect();
        libs.dedup();
        assert_eq!(DEFAULT_CATALOG_SIZE, libs.len());
    }

    #[test]
    fn json_line() {
        let line = r#"{"bookname":"Alchemist","author":"Paulo Coelho","publisher":"HarperOne","location":"CityA","library":"Lib0"}"#;
        let b: Book = serde_json::from_str(line).unwrap();
        assert_eq!(
            vec!["Alchemist", "Paulo Coelho", "HarperOne", "CityA", "Lib0"],
            b.into_args()
        );
    }
}
