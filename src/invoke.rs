//! Invocation entry point: an operation name plus string arguments.

use core::fmt;
use core::str::FromStr;

use crate::error::BookError;
use crate::ledger::Ledger;
use crate::schema::Schema;
use crate::store::BookStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Books by a key prefix: bookname, then optional location and library.
    QueryBook,

    /// One book by its full key.
    QueryBookByKey,

    InitLedger,

    CreateBook,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::QueryBook,
        Operation::QueryBookByKey,
        Operation::InitLedger,
        Operation::CreateBook,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::QueryBook => "queryBook",
            Self::QueryBookByKey => "queryBookByKey",
            Self::InitLedger => "initLedger",
            Self::CreateBook => "createBook",
        }
    }

    /// Checks the number of arguments for this operation against the record
    /// schema.
    pub fn check_arity(&self, got: usize, schema: &Schema) -> Result<(), BookError> {
        let key_arity: usize = schema.key.len();
        let (ok, expected): (bool, String) = match self {
            Self::QueryBook => ((1..=key_arity).contains(&got), format!("1 to {key_arity}")),
            Self::QueryBookByKey => (key_arity == got, key_arity.to_string()),
            Self::InitLedger => (0 == got, "0".into()),
            Self::CreateBook => (schema.arity() == got, schema.arity().to_string()),
        };
        match ok {
            true => Ok(()),
            false => Err(BookError::Arity { expected, got }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BookError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|op| op.name() == name)
            .copied()
            .ok_or_else(|| BookError::UnknownOperation(name.into()))
    }
}

/// Result of an invocation; errors are flattened to their message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(Vec<u8>),
    Error(String),
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Gets the success payload.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success(p) => Some(p.as_slice()),
            Self::Error(_) => None,
        }
    }
}

impl From<Result<Vec<u8>, BookError>> for Response {
    fn from(r: Result<Vec<u8>, BookError>) -> Self {
        match r {
            Ok(payload) => Self::Success(payload),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

impl<L> BookStore<L>
where
    L: Ledger,
{
    /// Runs an operation by name; never fails, errors become [`Response::Error`].
    pub async fn invoke(&self, name: &str, args: &[String]) -> Response {
        let rslt: Result<Vec<u8>, BookError> = self.dispatch(name, args).await;
        if let Err(e) = &rslt {
            log::warn!("{name} failed: {e}");
        }
        rslt.into()
    }

    async fn dispatch(&self, name: &str, args: &[String]) -> Result<Vec<u8>, BookError> {
        let op: Operation = str::parse(name)?;
        op.check_arity(args.len(), self.schema())?;
        log::debug!("{op}: {args:?}");
        match op {
            Operation::QueryBook => self.query_by_prefix(&args[0], &args[1..]).await,
            Operation::QueryBookByKey => {
                let found: Option<Vec<u8>> = self.query_book(args).await?;
                Ok(found.unwrap_or_default())
            }
            Operation::InitLedger => self.init_ledger().await.map(|_| vec![]),
            Operation::CreateBook => self.create_book(args).await.map(|_| vec![]),
        }
    }
}

#[cfg(test)]
mod test_invoke {
    mod operation {
        use crate::error::BookError;
        use crate::invoke::Operation;
        use crate::schema::{Field, FieldType, Schema, BOOK};

        #[test]
        fn parse_all() {
            for op in Operation::ALL {
                let parsed: Operation = str::parse(op.name()).unwrap();
                assert_eq!(op, parsed);
            }
        }

        #[test]
        fn unknown() {
            let got = str::parse::<Operation>("deleteBook");
            assert_eq!(Err(BookError::UnknownOperation("deleteBook".into())), got);
            assert!(str::parse::<Operation>("querybook").is_err());
        }

        #[test]
        fn arity() {
            assert!(Operation::QueryBook.check_arity(0, &BOOK).is_err());
            assert!(Operation::QueryBook.check_arity(2, &BOOK).is_ok());
            assert!(Operation::QueryBook.check_arity(4, &BOOK).is_err());
            assert!(Operation::QueryBookByKey.check_arity(3, &BOOK).is_ok());
            assert!(Operation::InitLedger.check_arity(1, &BOOK).is_err());
            assert!(Operation::CreateBook.check_arity(5, &BOOK).is_ok());
            assert_eq!(
                Err(BookError::Arity {
                    expected: "5".into(),
                    got: 6
                }),
                Operation::CreateBook.check_arity(6, &BOOK)
            );
        }

        #[test]
        fn key_arity_follows_schema() {
            const TITLE: Schema = Schema {
                fields: &[
                    Field {
                        name: "title",
                        ty: FieldType::Text,
                    },
                    Field {
                        name: "copies",
                        ty: FieldType::Integer,
                    },
                ],
                key: &[0],
            };
            assert!(Operation::QueryBookByKey.check_arity(1, &TITLE).is_ok());
            assert!(Operation::QueryBookByKey.check_arity(3, &TITLE).is_err());
            assert!(Operation::QueryBook.check_arity(2, &TITLE).is_err());
            assert!(Operation::CreateBook.check_arity(2, &TITLE).is_ok());
        }
    }

    mod invoke {
        use crate::book::DEFAULT_CATALOG_SIZE;
        use crate::invoke::Response;
        use crate::ledger::mem::MemLedger;
        use crate::store::BookStore;

        fn strings(s: &[&str]) -> Vec<String> {
            s.iter().map(|x| x.to_string()).collect()
        }

        #[tokio::test]
        async fn unknown_operation() {
            let store = BookStore::new(MemLedger::new());
            let got = store.invoke("deleteBook", &strings(&["x"])).await;
            assert_eq!(
                Response::Error("Invalid Smart Contract function name: deleteBook".into()),
                got
            );
        }

        #[tokio::test]
        async fn create_then_query() {
            let store = BookStore::new(MemLedger::new());
            let created = store
                .invoke(
                    "createBook",
                    &strings(&["Alchemist", "Paulo Coelho", "HarperOne", "CityA", "Lib0"]),
                )
                .await;
            assert_eq!(Response::Success(vec![]), created);

            let got = store.invoke("queryBook", &strings(&["Alchemist", "CityA"])).await;
            let v: serde_json::Value = serde_json::from_slice(got.payload().unwrap()).unwrap();
            assert_eq!(1, v.as_array().unwrap().len());
            assert_eq!("Lib0", v[0]["library"]);

            let one = store
                .invoke("queryBookByKey", &strings(&["Alchemist", "CityA", "Lib0"]))
                .await;
            let b: serde_json::Value = serde_json::from_slice(one.payload().unwrap()).unwrap();
            assert_eq!("Paulo Coelho", b["author"]);
        }

        #[tokio::test]
        async fn arity_before_state_access() {
            let store = BookStore::new(MemLedger::new());
            let got = store
                .invoke("createBook", &strings(&["Alchemist", "CityA", "Lib0"]))
                .await;
            assert_eq!(
                Response::Error("Incorrect number of arguments. Expecting 5".into()),
                got
            );
            assert!(store.ledger().is_empty().unwrap());

            let absent = store
                .invoke("queryBookByKey", &strings(&["Alchemist", "CityA", "Lib0"]))
                .await;
            assert_eq!(Response::Success(vec![]), absent);
        }

        #[tokio::test]
        async fn init_ledger() {
            let store = BookStore::new(MemLedger::new());
            assert!(store.invoke("initLedger", &[]).await.is_success());
            let got = store.invoke("queryBook", &strings(&["연금술사"])).await;
            let v: serde_json::Value = serde_json::from_slice(got.payload().unwrap()).unwrap();
            assert_eq!(DEFAULT_CATALOG_SIZE, v.as_array().unwrap().len());

            let none = store.invoke("queryBook", &strings(&["연금술사", "서울시"])).await;
            assert_eq!(Response::Success(b"[]".to_vec()), none);
        }

        #[tokio::test]
        async fn invalid_component() {
            let store = BookStore::new(MemLedger::new());
            let got = store.invoke("queryBook", &strings(&["Alchemist", ""])).await;
            assert!(!got.is_success());
            let got = store
                .invoke(
                    "createBook",
                    &strings(&["Alch\0emist", "Paulo Coelho", "HarperOne", "CityA", "Lib0"]),
                )
                .await;
            assert!(!got.is_success());
            assert!(store.ledger().is_empty().unwrap());
        }
    }
}
