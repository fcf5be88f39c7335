//! Cell formatting
//!
//! Amounts are written as the shortest decimal string that parses back to
//! the same `f64`: no fixed number of decimals, no exponent, no forced sign.
//! No rounding is applied, so sums can show binary floating point error
//! (`0.1 + 0.2` is written as `0.30000000000000004`).

/// Format an amount for a ledger cell
///
/// # Examples
///
/// ```
/// use salesledger::core::ledger::format::format_amount;
///
/// assert_eq!(format_amount(11.0), "11");
/// assert_eq!(format_amount(2.5), "2.5");
/// assert_eq!(format_amount(0.0000001), "0.0000001");
/// ```
pub fn format_amount(value: f64) -> String {
    // f64's Display is shortest round-trip and never uses an exponent.
    format!("{value}")
}

/// Format an optional amount; absent renders as an empty cell
pub fn format_optional_amount(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_default()
}

/// Wrap a free-text note in literal double quotes
///
/// The quotes are part of the cell value, independent of whatever quoting
/// the CSV encoder adds. Quotes, backslashes and non-printable characters
/// are backslash-escaped (`\n`, `\x01`, `\u200b`, `\U000f0000`); every
/// printable character, combining marks and variation selectors included,
/// is kept as is.
///
/// # Examples
///
/// ```
/// use salesledger::core::ledger::format::quote_note;
///
/// assert_eq!(quote_note("say \"hi\""), r#""say \"hi\"""#);
/// assert_eq!(quote_note("café"), "\"café\"");
/// ```
pub fn quote_note(note: &str) -> String {
    let mut quoted = String::with_capacity(note.len() + 2);
    quoted.push('"');
    for c in note.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{b}' => quoted.push_str("\\v"),
            '\u{c}' => quoted.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                quoted.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if !is_printable(c) => {
                let code = c as u32;
                if code < 0x1_0000 {
                    quoted.push_str(&format!("\\u{code:04x}"));
                } else {
                    quoted.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Whether `c` is shown as itself inside a quoted note
///
/// Control, format and private-use characters are not printable, and the
/// ASCII space is the only printable whitespace.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xE000..=0xF8FF
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0xF_0000..=0x10_FFFF
    )
}
