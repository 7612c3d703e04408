use std::fmt;
use std::slice;

use crate::errors::{FatalError, LexingError};
use crate::lexer::Position;

/// One entry in a `.bib` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// entry type in lowercase, e.g. “article”
    pub kind: String,
    /// entry key, e.g. “DBLP:books/lib/Knuth97”
    pub key: String,
    /// fields in order of appearance, e.g. “author” mapped to “Donald Ervin Knuth”
    pub fields: Fields,
}

impl Record {
    pub fn new(kind: String, key: String, fields: Fields) -> Record {
        Record { kind, key, fields }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Record {
    /// An entry becomes one flat object: `ENTRYTYPE` and `ID` first,
    /// then the fields in order of appearance.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        map.serialize_entry("ENTRYTYPE", &self.kind)?;
        map.serialize_entry("ID", &self.key)?;
        for (name, data) in self.fields.iter() {
            map.serialize_entry(name, data)?;
        }
        map.end()
    }
}

/// Field names mapped to their data, remembering insertion order.
/// Names are case-sensitive. Inserting a name again replaces the data
/// but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    pub fn new() -> Fields {
        Fields {
            entries: Vec::new(),
        }
    }

    /// Returns the data previously stored under `name`, if any.
    pub fn insert(&mut self, name: String, data: String) -> Option<String> {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => Some(std::mem::replace(old, data)),
            None => {
                self.entries.push((name, data));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> FieldsIter<'_> {
        FieldsIter {
            inner: self.entries.iter(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl<'f> IntoIterator for &'f Fields {
    type Item = (&'f str, &'f str);
    type IntoIter = FieldsIter<'f>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(name, data)` pairs of [`Fields`]
pub struct FieldsIter<'f> {
    inner: slice::Iter<'f, (String, String)>,
}

impl<'f> Iterator for FieldsIter<'f> {
    type Item = (&'f str, &'f str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, data)| (name.as_str(), data.as_str()))
    }
}

/// Replace every run of line breaks by a single space. Line breaks before
/// the first other character are dropped, and a run directly following a
/// space does not add another one. For example, “\nDeep\r\nLearning”
/// becomes “Deep Learning”.
pub fn flatten_line_breaks(src: &str) -> String {
    let mut result = String::with_capacity(src.len());
    for chr in src.chars() {
        if chr == '\n' || chr == '\r' {
            if !result.is_empty() && !result.ends_with(' ') {
                result.push(' ');
            }
        } else {
            result.push(chr);
        }
    }
    result
}

/// Why an entry was skipped and where its parsing attempt began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip {
    pub reason: LexingError,
    pub position: Position,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped entry at {}: {}", self.position, self.reason)
    }
}

/// Result of one attempt to read an entry
#[derive(Debug)]
pub enum ParseOutcome {
    /// a complete entry
    Record(Record),
    /// malformed input; the stream was resynchronized at an entry boundary
    Skipped(Skip),
    /// no more entries
    EndOfInput,
    /// reading cannot continue
    Fatal(FatalError),
}

impl ParseOutcome {
    pub fn is_record(&self) -> bool {
        matches!(self, ParseOutcome::Record(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ParseOutcome::Skipped(_))
    }
}

/// Running totals of a parse. At the end, `processed == valid + skipped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counters {
    pub processed: u64,
    pub valid: u64,
    pub skipped: u64,
}
