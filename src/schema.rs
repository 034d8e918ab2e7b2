//! Record schema: an ordered list of typed fields.
//!
//! Records are written as JSON objects whose members follow the schema order.
//! The same schema names the fields which make up the composite key.

use serde_json::{Map, Value};

use crate::error::BookError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub fields: &'static [Field],

    /// Indices of the fields forming the composite key, in key order.
    pub key: &'static [usize],
}

const fn text(name: &'static str) -> Field {
    Field {
        name,
        ty: FieldType::Text,
    }
}

/// The book record: 5 text fields keyed by bookname, location, library.
pub const BOOK: Schema = Schema {
    fields: &[
        text("bookname"),
        text("author"),
        text("publisher"),
        text("location"),
        text("library"),
    ],
    key: &[0, 3, 4],
};

impl Field {
    fn parse(&self, raw: &str) -> Result<Value, BookError> {
        match self.ty {
            FieldType::Text => Ok(Value::String(raw.into())),
            FieldType::Integer => raw.trim().parse::<i64>().map(Value::from).map_err(|e| {
                BookError::InvalidField(format!("{}: not an integer({raw}): {e}", self.name))
            }),
            FieldType::Boolean => raw.trim().parse::<bool>().map(Value::Bool).map_err(|e| {
                BookError::InvalidField(format!("{}: not a boolean({raw}): {e}", self.name))
            }),
        }
    }

    fn accepts(&self, v: &Value) -> bool {
        match self.ty {
            FieldType::Text => v.is_string(),
            FieldType::Integer => v.is_i64() || v.is_u64(),
            FieldType::Boolean => v.is_boolean(),
        }
    }

    fn to_arg(&self, v: &Value) -> Result<String, BookError> {
        if !self.accepts(v) {
            return Err(BookError::InvalidField(format!(
                "{}: unexpected value {v}",
                self.name
            )));
        }
        match v {
            Value::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

impl Schema {
    /// Number of arguments needed to create a record.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn check_arity<S>(&self, args: &[S]) -> Result<(), BookError> {
        let got: usize = args.len();
        match got == self.arity() {
            true => Ok(()),
            false => Err(BookError::Arity {
                expected: self.arity().to_string(),
                got,
            }),
        }
    }

    /// Picks the key components out of the (arity checked) arguments.
    pub fn key_components<'a, S>(&self, args: &'a [S]) -> Result<Vec<&'a str>, BookError>
    where
        S: AsRef<str>,
    {
        self.check_arity(args)?;
        Ok(self.key.iter().map(|ix| args[*ix].as_ref()).collect())
    }

    /// Creates the canonical JSON form of a record.
    pub fn encode<S>(&self, args: &[S]) -> Result<Vec<u8>, BookError>
    where
        S: AsRef<str>,
    {
        self.check_arity(args)?;
        let obj: Map<String, Value> = self
            .fields
            .iter()
            .zip(args)
            .try_fold(Map::new(), |mut m, pair| {
                let (field, raw) = pair;
                let v: Value = field.parse(raw.as_ref())?;
                m.insert(field.name.into(), v);
                Ok::<_, BookError>(m)
            })?;
        serde_json::to_vec(&Value::Object(obj))
            .map_err(|e| BookError::InvalidField(format!("unable to serialize: {e}")))
    }

    fn check_object(&self, v: Value) -> Result<Map<String, Value>, BookError> {
        let obj: Map<String, Value> = match v {
            Value::Object(m) => m,
            other => return Err(BookError::InvalidField(format!("expected an object: {other}"))),
        };
        if let Some(unknown) = obj
            .keys()
            .find(|k| !self.fields.iter().any(|f| f.name == k.as_str()))
        {
            return Err(BookError::InvalidField(format!("unknown field: {unknown}")));
        }
        self.fields.iter().try_for_each(|f| {
            let v: &Value = obj
                .get(f.name)
                .ok_or_else(|| BookError::InvalidField(format!("{}: missing", f.name)))?;
            f.to_arg(v).map(|_| ())
        })?;
        Ok(obj)
    }

    /// Converts a JSON object into arguments in schema order.
    pub fn args_from_json(&self, v: Value) -> Result<Vec<String>, BookError> {
        let obj: Map<String, Value> = self.check_object(v)?;
        self.fields
            .iter()
            .map(|f| {
                let v: &Value = obj
                    .get(f.name)
                    .ok_or_else(|| BookError::InvalidField(format!("{}: missing", f.name)))?;
                f.to_arg(v)
            })
            .collect()
    }
}
