use std::fmt;
use std::fs;
use std::io;
use std::io::{BufRead, BufReader, Read};
use std::path;
use std::str;

use crate::errors::{FatalError, LexingError, ReadError};

/// Character forcing the following character to be taken literally
pub(crate) const ESCAPE: char = '\\';
/// Character starting a comment which extends to the end of the line
pub(crate) const COMMENT: char = '%';

/// Location of a character in the source, counted from zero.
/// `Display` shows it one-based, the way editors do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub lineno: usize,
    pub colno: usize,
}

impl Position {
    fn advance(self, chr: char) -> Position {
        if chr == '\n' {
            Position {
                lineno: self.lineno + 1,
                colno: 0,
            }
        } else {
            Position {
                lineno: self.lineno,
                colno: self.colno + 1,
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} col {}", self.lineno + 1, self.colno + 1)
    }
}

/// Character cursor over a byte stream with room for exactly one
/// character of pushback. There is no other way to rewind: every larger
/// lookahead is tracked as explicit state by the callers.
pub(crate) struct Lexer<R> {
    reader: BufReader<R>,
    pushback: Option<char>,
    position: Position,
    previous: Position, // position of the character returned last
}

impl Lexer<fs::File> {
    /// Use a file stored at a `path` as source for the lexing process.
    pub(crate) fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Self, io::Error> {
        let fd = fs::File::open(path)?;
        Ok(Lexer::new(fd))
    }
}

impl Lexer<io::Cursor<String>> {
    /// Use a string as source for the lexing process.
    pub(crate) fn from_string(data: String) -> Self {
        Lexer::new(io::Cursor::new(data))
    }
}

impl<R: Read> Lexer<R> {
    pub(crate) fn new(reader: R) -> Self {
        Lexer {
            reader: BufReader::new(reader),
            pushback: None,
            position: Position::default(),
            previous: Position::default(),
        }
    }

    /// Position of the character `next_char` returns next
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Consume one character. `None` signals end of input.
    pub(crate) fn next_char(&mut self) -> Result<Option<char>, FatalError> {
        let chr = match self.pushback.take() {
            Some(chr) => chr,
            None => match self.decode_char()? {
                Some(chr) => chr,
                None => return Ok(None),
            },
        };
        self.previous = self.position;
        self.position = self.position.advance(chr);
        Ok(Some(chr))
    }

    /// Push back the character returned by the last `next_char` call.
    pub(crate) fn unread(&mut self, chr: char) {
        debug_assert!(self.pushback.is_none(), "only one character of pushback");
        self.pushback = Some(chr);
        self.position = self.previous;
    }

    pub(crate) fn peek_char(&mut self) -> Result<Option<char>, FatalError> {
        let next = self.next_char()?;
        if let Some(chr) = next {
            self.unread(chr);
        }
        Ok(next)
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, FatalError> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FatalError::Io(e)),
            }
        }
    }

    // Decodes UTF-8 one character at a time. Malformed sequences become
    // U+FFFD, so broken encodings are just more malformed data.
    fn decode_char(&mut self) -> Result<Option<char>, FatalError> {
        let first = match self.peek_byte()? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        self.reader.consume(1);

        let width = match first {
            0x00..=0x7F => return Ok(Some(char::from(first))),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        };

        let mut seq = [first, 0, 0, 0];
        for slot in seq.iter_mut().take(width).skip(1) {
            match self.peek_byte()? {
                Some(byte) if byte & 0xC0 == 0x80 => {
                    *slot = byte;
                    self.reader.consume(1);
                }
                _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }

        let chr = str::from_utf8(&seq[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Some(chr))
    }

    /// Advance past whitespace and `%` comments. Afterwards the cursor
    /// points to a significant character or the end of input.
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> Result<(), FatalError> {
        while let Some(chr) = self.next_char()? {
            if chr.is_whitespace() {
                continue;
            }
            if chr == COMMENT {
                while let Some(chr) = self.next_char()? {
                    if chr == '\n' {
                        break;
                    }
                }
                continue;
            }
            self.unread(chr);
            break;
        }
        Ok(())
    }

    /// Read an undelimited token like an entry type, entry key or field name.
    /// The token ends before `stop` or any whitespace, which stay unread.
    /// A preceding `\` makes even those part of the token.
    pub(crate) fn read_token(&mut self, stop: char) -> Result<String, ReadError> {
        let mut token = String::new();
        let mut escaped = false;

        while let Some(chr) = self.next_char()? {
            if escaped {
                escaped = false;
                push_char(&mut token, chr)?;
                continue;
            }
            if chr == ESCAPE {
                escaped = true;
                continue;
            }
            if chr == stop || chr.is_whitespace() {
                self.unread(chr);
                return Ok(token);
            }
            push_char(&mut token, chr)?;
        }

        Err(LexingError::UnexpectedEndOfInput.into())
    }

    /// Read field data enclosed in `{curly braces}` or `"double quotes"`.
    /// The outer delimiters are dropped, nested braces are kept verbatim.
    /// An escaped character is kept, the `\` in front of it is not.
    pub(crate) fn read_value(&mut self) -> Result<String, ReadError> {
        let quoted = match self.next_char()? {
            Some('"') => true,
            Some('{') => false,
            Some(chr) => {
                self.unread(chr);
                return Err(LexingError::InvalidValueStart(chr).into());
            }
            None => return Err(LexingError::UnexpectedEndOfInput.into()),
        };

        let mut data = String::new();
        let mut curlybrace_level = 1usize; // only meaningful if !quoted
        let mut escaped = false;

        while let Some(chr) = self.next_char()? {
            if escaped {
                escaped = false;
                push_char(&mut data, chr)?;
                continue;
            }
            if chr == ESCAPE {
                escaped = true;
                continue;
            }

            if quoted {
                if chr == '"' {
                    return Ok(data);
                }
            } else if chr == '{' {
                curlybrace_level += 1;
            } else if chr == '}' {
                curlybrace_level -= 1;
                if curlybrace_level == 0 {
                    return Ok(data);
                }
            }
            push_char(&mut data, chr)?;
        }

        Err(LexingError::UnterminatedValue.into())
    }
}

// Grows `buf` fallibly; the allocator's refusal is reported, not aborted on.
fn push_char(buf: &mut String, chr: char) -> Result<(), FatalError> {
    buf.try_reserve(chr.len_utf8())?;
    buf.push(chr);
    Ok(())
}
