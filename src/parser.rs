use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::io;
use std::io::Read;
use std::path;
use std::str;

use log::{error, info, warn};

use crate::errors::{FatalError, LexingError, ReadError};
use crate::lexer::{Lexer, Position};
use crate::types::{flatten_line_breaks, Counters, Fields, ParseOutcome, Record, Skip};

/// Progress is logged whenever this many entries have been processed.
const PROGRESS_INTERVAL: u64 = 1000;

/// Parser reading a `.bib` source entry by entry, skipping malformed
/// entries instead of giving up on the whole source
pub struct Parser<R> {
    pub(crate) lexer: Lexer<R>,
    pub(crate) counters: Counters,
    pub(crate) finished: bool,
}

impl Parser<fs::File> {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Self, io::Error> {
        let lexer = Lexer::from_file(path)?;
        Ok(Parser::with_lexer(lexer))
    }
}

impl Parser<io::Cursor<String>> {
    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Self {
        Parser::with_lexer(Lexer::from_string(data))
    }
}

impl str::FromStr for Parser<io::Cursor<String>> {
    type Err = Infallible;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

impl<R: Read> Parser<R> {
    /// Use any reader as source for the parsing process.
    pub fn new(reader: R) -> Self {
        Parser::with_lexer(Lexer::new(reader))
    }

    fn with_lexer(lexer: Lexer<R>) -> Self {
        Parser {
            lexer,
            counters: Counters::default(),
            finished: false,
        }
    }

    /// Totals of all outcomes returned so far
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Attempt to read the next entry. Once `EndOfInput` or `Fatal` has been
    /// returned, every further call returns `EndOfInput`.
    pub fn next_outcome(&mut self) -> ParseOutcome {
        if self.finished {
            return ParseOutcome::EndOfInput;
        }

        let outcome = match parse_record(&mut self.lexer) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("stopped reading at {}: {}", self.lexer.position(), err);
                self.finished = true;
                return ParseOutcome::Fatal(err);
            }
        };

        match outcome {
            ParseOutcome::Record(_) => self.counters.valid += 1,
            ParseOutcome::Skipped(_) => self.counters.skipped += 1,
            ParseOutcome::EndOfInput | ParseOutcome::Fatal(_) => {
                self.finished = true;
                return outcome;
            }
        }
        self.counters.processed += 1;
        if self.counters.processed % PROGRESS_INTERVAL == 0 {
            info!("processed {} entries", self.counters.processed);
        }

        outcome
    }

    /// Iterate over all outcomes until the end of input (which is not yielded).
    pub fn iter(&mut self) -> Outcomes<'_, R> {
        Outcomes { parser: self }
    }

    /// Iterate over the complete entries, silently passing over skipped ones.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { parser: self }
    }

    /// Read the whole source, handing every complete entry to `handle`.
    /// Stops at the first error returned by `handle` or the first fatal error,
    /// otherwise returns the final counters.
    pub fn run<F, E>(&mut self, mut handle: F) -> Result<Counters, E>
    where
        F: FnMut(Record) -> Result<(), E>,
        E: From<FatalError>,
    {
        loop {
            match self.next_outcome() {
                ParseOutcome::Record(record) => handle(record)?,
                ParseOutcome::Skipped(_) => {}
                ParseOutcome::EndOfInput => return Ok(self.counters),
                ParseOutcome::Fatal(err) => return Err(err.into()),
            }
        }
    }
}

/// A stateful iterator yielding one `ParseOutcome` after another
pub struct Outcomes<'p, R> {
    parser: &'p mut Parser<R>,
}

impl<'p, R: Read> Iterator for Outcomes<'p, R> {
    type Item = ParseOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        match self.parser.next_outcome() {
            ParseOutcome::EndOfInput => None,
            outcome => Some(outcome),
        }
    }
}

/// A stateful iterator yielding one `Record` after another
pub struct Records<'p, R> {
    parser: &'p mut Parser<R>,
}

impl<'p, R: Read> Iterator for Records<'p, R> {
    type Item = Result<Record, FatalError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.parser.next_outcome() {
                ParseOutcome::Record(record) => return Some(Ok(record)),
                ParseOutcome::Skipped(_) => continue,
                ParseOutcome::EndOfInput => return None,
                ParseOutcome::Fatal(err) => return Some(Err(err)),
            }
        }
    }
}

/// What the parser was doing when it had to give up on an entry or field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    ReadingType,
    WaitForOpen,
    ReadingKey,
    ReadingName,
    WaitForAssign,
    ReadingData,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::ReadingType => "reading entry type",
                Self::WaitForOpen => "expecting '{' for entry data",
                Self::ReadingKey => "reading entry key",
                Self::ReadingName => "reading field name",
                Self::WaitForAssign => "expecting '=' for field assignment",
                Self::ReadingData => "reading field data",
            }
        )
    }
}

/// Where a recovery scan stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Recovery {
    /// an `@` is next
    EntryStart,
    /// the closing brace of the entry was consumed
    EntryClosed,
    /// a `,` on field level is next
    NextField,
    /// the closing brace of the entry is next
    EntryEnd,
    /// the input ended first
    EndOfInput,
}

/// Skip to the next `@`, which stays unread.
pub(crate) fn recover_entry_start<R: Read>(lexer: &mut Lexer<R>) -> Result<Recovery, FatalError> {
    while let Some(chr) = lexer.next_char()? {
        if chr == '@' {
            lexer.unread(chr);
            return Ok(Recovery::EntryStart);
        }
    }
    Ok(Recovery::EndOfInput)
}

/// Skip to the brace closing the current entry and consume it.
/// Balanced braces on the way are passed over.
pub(crate) fn recover_entry<R: Read>(lexer: &mut Lexer<R>) -> Result<Recovery, FatalError> {
    let mut level = 0usize;
    while let Some(chr) = lexer.next_char()? {
        match chr {
            '{' => level += 1,
            '}' if level == 0 => return Ok(Recovery::EntryClosed),
            '}' => level -= 1,
            _ => {}
        }
    }
    Ok(Recovery::EndOfInput)
}

/// Skip to the `,` starting the next field or the `}` closing the entry.
/// Either one stays unread, so the field loop sees it next.
pub(crate) fn recover_field<R: Read>(lexer: &mut Lexer<R>) -> Result<Recovery, FatalError> {
    let mut level = 0usize;
    while let Some(chr) = lexer.next_char()? {
        match chr {
            '{' => level += 1,
            '}' if level == 0 => {
                lexer.unread(chr);
                return Ok(Recovery::EntryEnd);
            }
            '}' => level -= 1,
            ',' if level == 0 => {
                lexer.unread(chr);
                return Ok(Recovery::NextField);
            }
            _ => {}
        }
    }
    Ok(Recovery::EndOfInput)
}

fn skipped(reason: LexingError, position: Position) -> ParseOutcome {
    ParseOutcome::Skipped(Skip { reason, position })
}

// Gives up on the entry started at `start` and moves past its closing brace.
fn abandon_entry<R: Read>(
    lexer: &mut Lexer<R>,
    state: State,
    reason: LexingError,
    start: Position,
) -> Result<ParseOutcome, FatalError> {
    warn!(
        "{} while {} at {}, skipping entry starting at {}",
        reason,
        state,
        lexer.position(),
        start
    );
    if recover_entry(lexer)? == Recovery::EndOfInput {
        warn!("end of input while skipping entry starting at {}", start);
    }
    Ok(skipped(reason, start))
}

// Gives up on the current field only, the rest of the entry survives.
fn abandon_field<R: Read>(
    lexer: &mut Lexer<R>,
    state: State,
    reason: LexingError,
    key: &str,
) -> Result<(), FatalError> {
    warn!(
        "{} while {} at {} in entry '{}', skipping field",
        reason,
        state,
        lexer.position(),
        key
    );
    if recover_field(lexer)? == Recovery::EndOfInput {
        warn!("end of input while skipping field in entry '{}'", key);
    }
    Ok(())
}

/// Read one entry like `@type{key, name = {data}, name = "data"}`.
/// Format errors are turned into `Skipped` after resynchronizing;
/// only a `FatalError` is returned as error.
pub(crate) fn parse_record<R: Read>(lexer: &mut Lexer<R>) -> Result<ParseOutcome, FatalError> {
    lexer.skip_whitespace_and_comments()?;
    let start = lexer.position();

    // expecting '@'
    match lexer.next_char()? {
        None => return Ok(ParseOutcome::EndOfInput),
        Some('@') => {}
        Some(found) => {
            warn!(
                "expected '@' at {}, found '{}', skipping to next entry",
                start, found
            );
            recover_entry_start(lexer)?;
            return Ok(skipped(
                LexingError::MissingDelimiter { expected: '@', found },
                start,
            ));
        }
    }

    // expecting entry type, e.g. “book”
    lexer.skip_whitespace_and_comments()?;
    let kind = match lexer.read_token('{') {
        Ok(kind) => kind.to_lowercase(),
        Err(ReadError::Lexing(reason)) => {
            return abandon_entry(lexer, State::ReadingType, reason, start)
        }
        Err(ReadError::Fatal(err)) => return Err(err),
    };

    // expecting “{”
    lexer.skip_whitespace_and_comments()?;
    match lexer.next_char()? {
        Some('{') => {}
        Some(found) => {
            let reason = LexingError::MissingDelimiter { expected: '{', found };
            return abandon_entry(lexer, State::WaitForOpen, reason, start);
        }
        None => {
            let reason = LexingError::UnexpectedEndOfInput;
            return abandon_entry(lexer, State::WaitForOpen, reason, start);
        }
    }

    // expecting e.g. “DBLP:books/lib/Knuth97”
    lexer.skip_whitespace_and_comments()?;
    let key = match lexer.read_token(',') {
        Ok(key) => key,
        Err(ReadError::Lexing(reason)) => {
            return abandon_entry(lexer, State::ReadingKey, reason, start)
        }
        Err(ReadError::Fatal(err)) => return Err(err),
    };

    let mut fields = Fields::new();
    loop {
        lexer.skip_whitespace_and_comments()?;
        match lexer.next_char()? {
            None => {
                warn!("unexpected end of input inside entry '{}'", key);
                return Ok(skipped(LexingError::UnexpectedEndOfInput, start));
            }
            Some('}') => break,
            Some(',') => {
                lexer.skip_whitespace_and_comments()?;
                if lexer.peek_char()? == Some('}') {
                    lexer.next_char()?;
                    break;
                }
                continue;
            }
            Some(chr) => lexer.unread(chr),
        }

        if let Some((name, data)) = parse_field(lexer, &key)? {
            fields.insert(name, data);
        }
    }

    Ok(ParseOutcome::Record(Record::new(kind, key, fields)))
}

// Reads `name = {data}`. A malformed field is skipped and yields `None`.
fn parse_field<R: Read>(
    lexer: &mut Lexer<R>,
    key: &str,
) -> Result<Option<(String, String)>, FatalError> {
    let name = match lexer.read_token('=') {
        Ok(name) => name,
        Err(ReadError::Lexing(reason)) => {
            abandon_field(lexer, State::ReadingName, reason, key)?;
            return Ok(None);
        }
        Err(ReadError::Fatal(err)) => return Err(err),
    };

    lexer.skip_whitespace_and_comments()?;
    match lexer.next_char()? {
        Some('=') => {}
        Some(found) => {
            let reason = LexingError::MissingDelimiter { expected: '=', found };
            abandon_field(lexer, State::WaitForAssign, reason, key)?;
            return Ok(None);
        }
        None => {
            let reason = LexingError::UnexpectedEndOfInput;
            abandon_field(lexer, State::WaitForAssign, reason, key)?;
            return Ok(None);
        }
    }

    lexer.skip_whitespace_and_comments()?;
    match lexer.read_value() {
        Ok(data) => Ok(Some((name, flatten_line_breaks(&data)))),
        Err(ReadError::Lexing(reason)) => {
            abandon_field(lexer, State::ReadingData, reason, key)?;
            Ok(None)
        }
        Err(ReadError::Fatal(err)) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::str::FromStr;

    fn outcomes(src: &str) -> (Vec<ParseOutcome>, Counters) {
        let mut p = Parser::from_str(src).unwrap();
        let outcomes = p.iter().collect();
        (outcomes, p.counters())
    }

    fn record(outcome: &ParseOutcome) -> &Record {
        match outcome {
            ParseOutcome::Record(record) => record,
            other => panic!("expected a record, got {:?}", other),
        }
    }

    #[test]
    fn test_tolkien() -> Result<(), Box<dyn error::Error>> {
        let mut p = Parser::from_str("@book{tolkien1937, author = {J. R. R. Tolkien}}")?;
        let mut count = 0;
        for e in p.records() {
            let entry = e?;
            assert_eq!(entry.kind, "book");
            assert_eq!(entry.key, "tolkien1937");
            assert_eq!(entry.fields.get("author"), Some("J. R. R. Tolkien"));
            count += 1;
        }
        assert_eq!(count, 1);
        Ok(())
    }

    #[test]
    fn test_taocp() -> Result<(), Box<dyn error::Error>> {
        let src = r#"@Book{DBLP:books/lib/Knuth97,
  author    = {Donald Ervin Knuth},
  title     = {The art of computer programming, Volume {I:} Fundamental Algorithms,
               3rd Edition},
  publisher = "Addison-Wesley",
  year      = {1997},
  url       = {https://www.worldcat.org/oclc/312910844},
  isbn      = {0201896834},
  timestamp = {Fri, 17 Jul 2020 16:12:39 +0200},
  biburl    = {https://dblp.org/rec/books/lib/Knuth97.bib},
  bibsource = {{dblp computer science bibliography}, https://dblp.org}
}"#;
        let mut p = Parser::from_str(src)?;
        let mut iter = p.records();
        let entry = iter.next().unwrap()?;
        assert!(iter.next().is_none());
        assert_eq!(entry.kind, "book");
        assert_eq!(entry.key, "DBLP:books/lib/Knuth97");
        assert_eq!(entry.fields.len(), 9);
        assert_eq!(entry.fields.get("year"), Some("1997"));
        assert_eq!(entry.fields.get("publisher"), Some("Addison-Wesley"));
        assert_eq!(
            entry.fields.get("title"),
            Some("The art of computer programming, Volume {I:} Fundamental Algorithms,                3rd Edition")
        );
        assert_eq!(
            entry.fields.get("bibsource"),
            Some("{dblp computer science bibliography}, https://dblp.org")
        );
        Ok(())
    }

    #[test]
    fn test_well_formed_counts() {
        let src = "% exported\n@article{a, title={A}}\n\n@misc{b, note = \"B\"}\n@Book {c ,year={1999},}";
        let (outcomes, counters) = outcomes(src);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(ParseOutcome::is_record));
        assert_eq!(
            counters,
            Counters {
                processed: 3,
                valid: 3,
                skipped: 0
            }
        );
        assert_eq!(record(&outcomes[2]).kind, "book");
        assert_eq!(record(&outcomes[2]).key, "c");
    }

    #[test]
    fn test_nested_braces_are_kept() {
        let (outcomes, _) = outcomes("@misc{k, note = {see {Smith, 2020}}}");
        assert_eq!(
            record(&outcomes[0]).fields.get("note"),
            Some("see {Smith, 2020}")
        );
    }

    #[test]
    fn test_line_breaks_are_flattened() {
        let (outcomes, _) = outcomes("@misc{k, title = {Deep\nLearning}, abstract = {\nText}}");
        let fields = &record(&outcomes[0]).fields;
        assert_eq!(fields.get("title"), Some("Deep Learning"));
        assert_eq!(fields.get("abstract"), Some("Text"));
    }

    #[test]
    fn test_trailing_comma() {
        let (outcomes, counters) = outcomes("@article{k1, author = {A}, }");
        assert_eq!(outcomes.len(), 1);
        let entry = record(&outcomes[0]);
        assert_eq!(entry.fields.len(), 1);
        assert_eq!(entry.fields.get("author"), Some("A"));
        assert_eq!(counters.skipped, 0);
    }

    #[test]
    fn test_consecutive_separators() {
        let (outcomes, _) = outcomes("@article{k1,, a = {1},,, b = {2}}");
        let entry = record(&outcomes[0]);
        assert_eq!(entry.fields.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_field_overwrites() {
        let (outcomes, _) = outcomes("@article{k1, a = {1}, b = {2}, a = {3}}");
        let entry = record(&outcomes[0]);
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields.get("a"), Some("3"));
    }

    #[test]
    fn test_resync_after_garbage() {
        let (outcomes, counters) = outcomes("garbage@article{k1, a = {b}}");
        assert_eq!(outcomes.len(), 2);
        match &outcomes[0] {
            ParseOutcome::Skipped(skip) => {
                assert_eq!(
                    skip.reason,
                    LexingError::MissingDelimiter {
                        expected: '@',
                        found: 'g'
                    }
                );
                assert_eq!(skip.position, Position::default());
            }
            other => panic!("expected a skip, got {:?}", other),
        }
        let entry = record(&outcomes[1]);
        assert_eq!(entry.key, "k1");
        assert_eq!(entry.fields.get("a"), Some("b"));
        assert_eq!(
            counters,
            Counters {
                processed: 2,
                valid: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_unterminated_value_at_end() {
        let mut p = Parser::from_str("@article{k1, a = {b").unwrap();
        assert!(p.next_outcome().is_skipped());
        assert!(matches!(p.next_outcome(), ParseOutcome::EndOfInput));
        assert!(matches!(p.next_outcome(), ParseOutcome::EndOfInput));
        assert_eq!(
            p.counters(),
            Counters {
                processed: 1,
                valid: 0,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_missing_closing_brace() {
        let (outcomes, counters) = outcomes("@article{k1, a = {b},\n  c = {d}\n");
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            ParseOutcome::Skipped(skip) => {
                assert_eq!(skip.reason, LexingError::UnexpectedEndOfInput)
            }
            other => panic!("expected a skip, got {:?}", other),
        }
        assert_eq!(counters.processed, counters.skipped);
        assert_eq!(counters.valid, 0);
    }

    #[test]
    fn test_bad_field_keeps_entry() {
        let src = "@article{k1, year = 1999, title = {T}, bad - x, author = \"A\"}\n@misc{k2, a = {b}}";
        let (outcomes, counters) = outcomes(src);
        assert_eq!(outcomes.len(), 2);
        let entry = record(&outcomes[0]);
        assert_eq!(
            entry.fields.iter().collect::<Vec<_>>(),
            vec![("title", "T"), ("author", "A")]
        );
        assert_eq!(record(&outcomes[1]).key, "k2");
        assert_eq!(counters.valid, 2);
    }

    #[test]
    fn test_bad_field_before_closing_brace() {
        let (outcomes, _) = outcomes("@article{k1, a = {b}, c = 12}@misc{k2, d = {e}}");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(record(&outcomes[0]).fields.len(), 1);
        assert_eq!(record(&outcomes[1]).fields.get("d"), Some("e"));
    }

    #[test]
    fn test_missing_open_brace() {
        let (outcomes, counters) = outcomes("@article (k1, a = {b}) x}\n@misc{k2, a = {b}}");
        assert_eq!(outcomes.len(), 2);
        match &outcomes[0] {
            ParseOutcome::Skipped(skip) => assert_eq!(
                skip.reason,
                LexingError::MissingDelimiter {
                    expected: '{',
                    found: '('
                }
            ),
            other => panic!("expected a skip, got {:?}", other),
        }
        assert_eq!(record(&outcomes[1]).key, "k2");
        assert_eq!(counters.skipped, 1);
    }

    #[test]
    fn test_escapes_in_data() {
        let (outcomes, _) = outcomes(r#"@misc{k, title = "Say \"hi\"", note = {100\% \}}}"#);
        let fields = &record(&outcomes[0]).fields;
        assert_eq!(fields.get("title"), Some(r#"Say "hi""#));
        assert_eq!(fields.get("note"), Some("100% }"));
    }

    #[test]
    fn test_comments_between_fields() {
        let src = "@misc{k, % the key\n  a = % data follows\n {b} % done\n}";
        let (outcomes, _) = outcomes(src);
        assert_eq!(record(&outcomes[0]).fields.get("a"), Some("b"));
    }

    #[test]
    fn test_idempotent() {
        let src = "junk @a{k1, x = {1}} @b{k2, y = {2} @c{k3 z = {3}}";
        let first: Vec<String> = outcomes(src).0.iter().map(|o| format!("{:?}", o)).collect();
        let second: Vec<String> = outcomes(src).0.iter().map(|o| format!("{:?}", o)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_hands_over_records() -> Result<(), Box<dyn error::Error>> {
        let mut p = Parser::from_str("@a{k1, x = {1}} oops @b{k2, y = {2}}")?;
        let mut keys = Vec::new();
        let counters = p.run(|record| -> Result<(), FatalError> {
            keys.push(record.key);
            Ok(())
        })?;
        assert_eq!(keys, vec!["k1", "k2"]);
        assert_eq!(
            counters,
            Counters {
                processed: 3,
                valid: 2,
                skipped: 1
            }
        );
        Ok(())
    }

    #[test]
    fn test_fatal_stops_stream() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }

        let mut p = Parser::new(Broken);
        assert!(matches!(
            p.next_outcome(),
            ParseOutcome::Fatal(FatalError::Io(_))
        ));
        assert!(matches!(p.next_outcome(), ParseOutcome::EndOfInput));
        assert_eq!(p.counters(), Counters::default());

        let mut p = Parser::new(Broken);
        let result = p.run(|_| -> Result<(), FatalError> { Ok(()) });
        assert!(matches!(result, Err(FatalError::Io(_))));
    }

    #[test]
    fn test_recover_entry() -> Result<(), Box<dyn error::Error>> {
        let mut l = Lexer::from_string("a = {b {c}}, d}@next".to_string());
        assert_eq!(recover_entry(&mut l)?, Recovery::EntryClosed);
        assert_eq!(l.next_char()?, Some('@'));

        let mut l = Lexer::from_string("a = {b".to_string());
        assert_eq!(recover_entry(&mut l)?, Recovery::EndOfInput);
        Ok(())
    }

    #[test]
    fn test_recover_field() -> Result<(), Box<dyn error::Error>> {
        let mut l = Lexer::from_string("1999 {a, b}, next = {x}}".to_string());
        assert_eq!(recover_field(&mut l)?, Recovery::NextField);
        assert_eq!(l.next_char()?, Some(','));

        let mut l = Lexer::from_string("oops {}}@next".to_string());
        assert_eq!(recover_field(&mut l)?, Recovery::EntryEnd);
        assert_eq!(l.next_char()?, Some('}'));

        let mut l = Lexer::from_string("{,".to_string());
        assert_eq!(recover_field(&mut l)?, Recovery::EndOfInput);
        Ok(())
    }

    #[test]
    fn test_recover_entry_start() -> Result<(), Box<dyn error::Error>> {
        let mut l = Lexer::from_string("} trailing junk\n@book{".to_string());
        assert_eq!(recover_entry_start(&mut l)?, Recovery::EntryStart);
        assert_eq!(l.next_char()?, Some('@'));

        let mut l = Lexer::from_string("no entries at all".to_string());
        assert_eq!(recover_entry_start(&mut l)?, Recovery::EndOfInput);
        Ok(())
    }
}
