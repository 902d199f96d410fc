//! Backslash escape decoding for quoted argument values.

use std::borrow::Cow;

enum Escape {
    /// Emit a character and consume this many bytes after the backslash.
    Char(char, usize),
    /// Emit nothing and consume this many bytes after the backslash.
    Skip(usize),
    /// Not a recognised escape; keep the backslash as literal text.
    Verbatim,
}

fn fixed_hex(rest: &str, digits: usize) -> Escape {
    let Some(hex) = rest.get(1..=digits) else {
        return Escape::Verbatim;
    };
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Escape::Verbatim;
    }
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .map_or(Escape::Verbatim, |ch| Escape::Char(ch, digits + 1))
}

fn octal(rest: &str) -> Escape {
    let digits = rest
        .bytes()
        .take(3)
        .take_while(|b| (b'0'..=b'7').contains(b))
        .count();
    rest.get(..digits)
        .and_then(|oct| u32::from_str_radix(oct, 8).ok())
        .and_then(char::from_u32)
        .map_or(Escape::Verbatim, |ch| Escape::Char(ch, digits))
}

fn decode_one(rest: &str) -> Escape {
    let Some(first) = rest.chars().next() else {
        return Escape::Verbatim;
    };
    let simple = match first {
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'a' => Some('\u{07}'),
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'v' => Some('\u{0B}'),
        _ => None,
    };
    if let Some(ch) = simple {
        return Escape::Char(ch, 1);
    }
    match first {
        '\n' => Escape::Skip(1),
        'x' => fixed_hex(rest, 2),
        'u' => fixed_hex(rest, 4),
        'U' => fixed_hex(rest, 8),
        '0'..='7' => octal(rest),
        _ => Escape::Verbatim,
    }
}

/// Decode backslash escape sequences in a quoted argument value.
///
/// Recognises `\\`, `\'`, `\"`, `\n`, `\t`, `\r`, `\a`, `\b`, `\f`, `\v`,
/// octal escapes of up to three digits, `\xHH`, `\uHHHH`, `\UHHHHHHHH` and a
/// backslash before a newline (which removes both). Any other backslash,
/// including a malformed hex escape, is kept as written. Decoding never
/// fails.
///
/// Named escapes such as `\N{BULLET}` are not decoded and stay verbatim.
///
/// # Examples
/// ```
/// use shortcodes_lexer::decode_escapes;
///
/// assert_eq!(decode_escapes(r#"say \"hi\"\n"#), "say \"hi\"\n");
/// assert_eq!(decode_escapes(r"\u00e9t\xe9"), "été");
/// assert_eq!(decode_escapes(r"C:\path"), r"C:\path");
/// ```
#[must_use]
pub fn decode_escapes(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }
    let mut decoded = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(index) = rest.find('\\') {
        let (head, tail) = rest.split_at(index);
        decoded.push_str(head);
        let after = tail.get(1..).unwrap_or_default();
        let consumed = match decode_one(after) {
            Escape::Char(ch, consumed) => {
                decoded.push(ch);
                consumed
            }
            Escape::Skip(consumed) => consumed,
            Escape::Verbatim => {
                decoded.push('\\');
                0
            }
        };
        rest = after.get(consumed..).unwrap_or_default();
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}
