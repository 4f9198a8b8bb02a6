//! Lenient, push-based HTML tokenizer.
//!
//! [`scan`] walks a document once and reports start tags, end tags and text
//! runs to a [`MarkupSink`]. It never rejects input: unknown tags are passed
//! through, comments and declarations are skipped, a `<` that does not open
//! a tag is ordinary text, and an unterminated construct at the end of input
//! is dropped.
//!
//! Text runs are reported once per run between two pieces of markup, with
//! character references decoded. Empty runs are never reported. Named
//! references outside the built-in table (most of the HTML5 list, such as
//! `&alpha;`) stay as written.
//! `<script>` and `<style>` contents are reported as a single raw text run.
//! Self-closing tags (`<br/>`) produce a start event followed by an end event.

use std::borrow::Cow;

/// Whether the scan should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The whole input was consumed.
    Completed,
    /// A sink handler returned [`Flow::Halt`].
    Halted,
}

/// A single `name="value"` pair on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    /// Decoded value, `None` for a bare attribute such as `hidden`.
    pub value: Option<String>,
}

/// A start tag with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Lower-cased tag name.
    pub name: String,
    pub attrs: Vec<Attribute>,
}

impl Tag {
    /// Value of the named attribute. When the attribute repeats, the last
    /// occurrence wins.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .rev()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    /// Returns `true` if the `class` attribute is exactly `class`.
    ///
    /// This is a whole-value comparison, not a class-list lookup:
    /// `class="user extra"` does not match `"user"`.
    pub fn class_is(&self, class: &str) -> bool {
        self.attr("class") == Some(class)
    }
}

/// Receiver of scanner events.
pub trait MarkupSink {
    type Error;

    fn start_tag(&mut self, tag: &Tag) -> Result<Flow, Self::Error>;

    fn text(&mut self, text: &str) -> Result<Flow, Self::Error>;

    fn end_tag(&mut self, name: &str) -> Result<Flow, Self::Error>;
}

macro_rules! emit {
    ($call:expr) => {
        if $call? == Flow::Halt {
            return Ok(ScanOutcome::Halted);
        }
    };
}

/// Scans `input` and feeds every event to `sink`.
///
/// Returns the first error produced by the sink, or how the scan ended.
pub fn scan<S: MarkupSink>(input: &str, sink: &mut S) -> Result<ScanOutcome, S::Error> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut text_start = 0;

    while let Some(offset) = input[pos..].find('<') {
        let lt = pos + offset;
        let rest = &input[lt..];

        let markup = if rest.starts_with("<!--") {
            Markup::Skip(rest[4..].find("-->").map(|end| lt + 4 + end + 3))
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            Markup::Skip(rest.find('>').map(|end| lt + end + 1))
        } else if rest.starts_with("</") {
            match bytes.get(lt + 2) {
                Some(b) if b.is_ascii_alphabetic() => match rest.find('>') {
                    Some(end) => Markup::End {
                        name: tag_name(&rest[2..end]),
                        next: lt + end + 1,
                    },
                    None => Markup::Unterminated,
                },
                _ => Markup::NotMarkup,
            }
        } else {
            match bytes.get(lt + 1) {
                Some(b) if b.is_ascii_alphabetic() => match parse_start_tag(input, lt + 1) {
                    Some(parsed) => Markup::Start(parsed),
                    None => Markup::Unterminated,
                },
                _ => Markup::NotMarkup,
            }
        };

        match markup {
            Markup::NotMarkup => {
                pos = lt + 1;
                continue;
            }
            Markup::Unterminated | Markup::Skip(None) => {
                emit!(flush_text(sink, &input[text_start..lt]));
                return Ok(ScanOutcome::Completed);
            }
            Markup::Skip(Some(next)) => {
                emit!(flush_text(sink, &input[text_start..lt]));
                pos = next;
            }
            Markup::End { name, next } => {
                emit!(flush_text(sink, &input[text_start..lt]));
                emit!(sink.end_tag(&name));
                pos = next;
            }
            Markup::Start(StartTag {
                tag,
                self_closing,
                next,
            }) => {
                emit!(flush_text(sink, &input[text_start..lt]));
                emit!(sink.start_tag(&tag));
                pos = next;

                if self_closing {
                    emit!(sink.end_tag(&tag.name));
                } else if is_raw_text_element(&tag.name) {
                    let Some((raw_end, close_next)) = find_raw_text_end(input, pos, &tag.name)
                    else {
                        emit!(raw_text(sink, &input[pos..]));
                        return Ok(ScanOutcome::Completed);
                    };
                    emit!(raw_text(sink, &input[pos..raw_end]));
                    emit!(sink.end_tag(&tag.name));
                    pos = close_next;
                }
            }
        }

        text_start = pos;
    }

    emit!(flush_text(sink, &input[text_start..]));
    Ok(ScanOutcome::Completed)
}

enum Markup {
    NotMarkup,
    Unterminated,
    Skip(Option<usize>),
    End { name: String, next: usize },
    Start(StartTag),
}

struct StartTag {
    tag: Tag,
    self_closing: bool,
    next: usize,
}

fn flush_text<S: MarkupSink>(sink: &mut S, raw: &str) -> Result<Flow, S::Error> {
    if raw.is_empty() {
        return Ok(Flow::Continue);
    }
    sink.text(&decode_entities(raw))
}

fn raw_text<S: MarkupSink>(sink: &mut S, raw: &str) -> Result<Flow, S::Error> {
    if raw.is_empty() {
        return Ok(Flow::Continue);
    }
    sink.text(raw)
}

fn is_raw_text_element(name: &str) -> bool {
    name == "script" || name == "style"
}

/// Finds `</name` (case-insensitive) from `from`, returning where the raw
/// text ends and where scanning resumes after the closing `>`.
fn find_raw_text_end(input: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let bytes = input.as_bytes();
    let name = name.as_bytes();
    let start = (from..bytes.len()).find(|&i| {
        bytes[i..].starts_with(b"</")
            && bytes
                .get(i + 2..i + 2 + name.len())
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
    })?;
    let close = input[start..].find('>')?;
    Some((start, start + close + 1))
}

fn tag_name(raw: &str) -> String {
    raw.split(|c: char| c.is_ascii_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/' || b == b'='
}

/// Parses a start tag whose name begins at `start` (just after `<`).
/// Returns `None` when the input ends before the closing `>`.
fn parse_start_tag(input: &str, start: usize) -> Option<StartTag> {
    let bytes = input.as_bytes();
    let mut i = start;
    while i < bytes.len() && !is_name_end(bytes[i]) {
        i += 1;
    }
    let name = input[start..i].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => {
                return Some(StartTag {
                    tag: Tag { name, attrs },
                    self_closing: false,
                    next: i + 1,
                });
            }
            b'/' => {
                if bytes.get(i + 1) == Some(&b'>') {
                    return Some(StartTag {
                        tag: Tag { name, attrs },
                        self_closing: true,
                        next: i + 2,
                    });
                }
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        i += 1;
        while i < bytes.len() && !is_name_end(bytes[i]) {
            i += 1;
        }
        let attr_name = input[name_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            attrs.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match *bytes.get(i)? {
            quote @ (b'"' | b'\'') => {
                let close = input[i + 1..].find(char::from(quote))?;
                let raw = &input[i + 1..i + 1 + close];
                i += close + 2;
                raw
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                &input[value_start..i]
            }
        };

        attrs.push(Attribute {
            name: attr_name,
            value: Some(decode_entities(value).into_owned()),
        });
    }
}

/// Decodes numeric character references, the Latin-1 and ASCII named
/// references (also without `;`), and a table of common typographic and
/// Polish letter references.
///
/// Other named references are left as written.
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Latin-1 references, `&nbsp;` (U+00A0) through `&yuml;` (U+00FF) in code
/// point order. All of them may appear without the closing `;`.
const LATIN1_REFERENCES: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy", "ordf",
    "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute", "micro",
    "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12", "frac34", "iquest",
    "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig", "Ccedil", "Egrave", "Eacute",
    "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml", "ETH", "Ntilde", "Ograve", "Oacute",
    "Ocirc", "Otilde", "Ouml", "times", "Oslash", "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute",
    "THORN", "szlig", "agrave", "aacute", "acirc", "atilde", "auml", "aring", "aelig", "ccedil",
    "egrave", "eacute", "ecirc", "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde",
    "ograve", "oacute", "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc",
    "uuml", "yacute", "thorn", "yuml",
];

/// ASCII references that may also appear without the closing `;`.
const LEGACY_ASCII_REFERENCES: &[(&str, char)] =
    &[("amp", '&'), ("lt", '<'), ("gt", '>'), ("quot", '"')];

/// References that are only recognised with the closing `;`.
const NAMED_REFERENCES: &[(&str, char)] = &[
    ("apos", '\''),
    ("Aogon", 'Ą'),
    ("aogon", 'ą'),
    ("Cacute", 'Ć'),
    ("cacute", 'ć'),
    ("Eogon", 'Ę'),
    ("eogon", 'ę'),
    ("Lstrok", 'Ł'),
    ("lstrok", 'ł'),
    ("Nacute", 'Ń'),
    ("nacute", 'ń'),
    ("Sacute", 'Ś'),
    ("sacute", 'ś'),
    ("Zacute", 'Ź'),
    ("zacute", 'ź'),
    ("Zdot", 'Ż'),
    ("zdot", 'ż'),
    ("OElig", 'Œ'),
    ("oelig", 'œ'),
    ("Scaron", 'Š'),
    ("scaron", 'š'),
    ("Yuml", 'Ÿ'),
    ("fnof", 'ƒ'),
    ("circ", 'ˆ'),
    ("tilde", '˜'),
    ("ensp", '\u{2002}'),
    ("emsp", '\u{2003}'),
    ("thinsp", '\u{2009}'),
    ("zwnj", '\u{200c}'),
    ("zwj", '\u{200d}'),
    ("lrm", '\u{200e}'),
    ("rlm", '\u{200f}'),
    ("ndash", '–'),
    ("mdash", '—'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("sbquo", '‚'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("bdquo", '„'),
    ("dagger", '†'),
    ("Dagger", '‡'),
    ("bull", '•'),
    ("hellip", '…'),
    ("permil", '‰'),
    ("prime", '′'),
    ("Prime", '″'),
    ("lsaquo", '‹'),
    ("rsaquo", '›'),
    ("oline", '‾'),
    ("frasl", '⁄'),
    ("euro", '€'),
    ("trade", '™'),
    ("larr", '←'),
    ("uarr", '↑'),
    ("rarr", '→'),
    ("darr", '↓'),
    ("harr", '↔'),
    ("spades", '♠'),
    ("clubs", '♣'),
    ("hearts", '♥'),
    ("diams", '♦'),
];

/// Longest name run considered after `&`.
const MAX_REFERENCE_NAME: usize = 32;

fn legacy_reference(name: &str) -> Option<char> {
    if let Some(&(_, ch)) = LEGACY_ASCII_REFERENCES.iter().find(|(n, _)| *n == name) {
        return Some(ch);
    }
    let index = LATIN1_REFERENCES.iter().position(|n| *n == name)?;
    char::from_u32(0xA0 + u32::try_from(index).ok()?)
}

fn named_reference(name: &str) -> Option<char> {
    legacy_reference(name).or_else(|| {
        NAMED_REFERENCES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, ch)| ch)
    })
}

/// Decodes one reference at the start of `s` (which begins with `&`).
/// Returns the character and the number of bytes consumed.
///
/// Numeric references may omit the `;`; invalid code points become
/// U+FFFD. A named reference without `;` decodes the longest legacy name it
/// starts with (`&copy2024` is `©2024`).
fn decode_one(s: &str) -> Option<(char, usize)> {
    let body = &s[1..];

    if let Some(num) = body.strip_prefix('#') {
        let (radix, digits_from) = match num.as_bytes().first() {
            Some(b'x' | b'X') => (16, 2),
            _ => (10, 1),
        };
        let digits = body[digits_from..]
            .bytes()
            .take_while(|b| b.is_ascii_digit() || (radix == 16 && b.is_ascii_hexdigit()))
            .count();
        if digits == 0 {
            return None;
        }
        let end = 1 + digits_from + digits;
        let code = u32::from_str_radix(&s[1 + digits_from..end], radix).unwrap_or(u32::MAX);
        let ch = char::from_u32(code)
            .filter(|&c| c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        let consumed = if s[end..].starts_with(';') { end + 1 } else { end };
        return Some((ch, consumed));
    }

    let name_len = body
        .bytes()
        .take(MAX_REFERENCE_NAME)
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    let name = &body[..name_len];

    if body[name_len..].starts_with(';') {
        if let Some(ch) = named_reference(name) {
            return Some((ch, name_len + 2));
        }
    }

    (2..=name_len)
        .rev()
        .find_map(|len| legacy_reference(&name[..len]).map(|ch| (ch, len + 1)))
}
