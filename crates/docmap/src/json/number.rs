//! Recognition of number lexemes.
//!
//! Numbers have the form `-? digits (. digits)? ([eE] -? digits)?`. The
//! recognizer only delimits the lexeme; numeric interpretation is deferred
//! to the consumer that asked for it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberCheck {
    Success,
    Eof,
    InvalidChar,
}

/// Expects at least one decimal digit and advances past the digit run.
fn expect_digits(source: &[u8], pos: &mut usize) -> NumberCheck {
    let mut count = 0usize;
    while source.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
        count += 1;
    }

    if count == 0 {
        if *pos >= source.len() {
            return NumberCheck::Eof;
        }
        return NumberCheck::InvalidChar;
    }

    NumberCheck::Success
}

/// Advances past one complete number lexeme starting at `pos`.
pub(crate) fn expect_number(source: &[u8], pos: &mut usize) -> NumberCheck {
    if source.get(*pos) == Some(&b'-') {
        *pos += 1;
    }

    let check = expect_digits(source, pos);
    if check != NumberCheck::Success {
        return check;
    }

    if source.get(*pos) == Some(&b'.') {
        *pos += 1;
        let check = expect_digits(source, pos);
        if check != NumberCheck::Success {
            return check;
        }
    }

    if matches!(source.get(*pos), Some(b'e' | b'E')) {
        *pos += 1;
        if *pos >= source.len() {
            return NumberCheck::Eof;
        }
        if source[*pos] == b'-' {
            *pos += 1;
        }
        let check = expect_digits(source, pos);
        if check != NumberCheck::Success {
            return check;
        }
    }

    NumberCheck::Success
}
