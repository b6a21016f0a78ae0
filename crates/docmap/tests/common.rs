#![allow(missing_docs)]
#![allow(dead_code)]

use docmap::{DocInput, InputFailed, TokenKind};

/// Flattens a token stream into a compact text form for assertions.
pub fn stringify_document<'de>(input: &mut dyn DocInput<'de>) -> Result<String, InputFailed> {
    let first = input.next_token()?;
    stringify_next(first, input)
}

fn stringify_next<'de>(
    first: TokenKind,
    input: &mut dyn DocInput<'de>,
) -> Result<String, InputFailed> {
    match first {
        TokenKind::Eof => Ok(String::from("<eof>")),

        TokenKind::BeginMapping => {
            let mut text = String::from("<map>");
            loop {
                let next = input.next_token()?;
                if next == TokenKind::EndMapping {
                    break;
                }
                text.push('\'');
                text.push_str(&input.mapping_key().into_string());
                text.push_str("'=");
                text.push_str(&stringify_next(next, input)?);
            }
            text.push_str("</map>");
            Ok(text)
        }

        TokenKind::BeginArray => {
            let mut text = String::from("<array>");
            loop {
                let next = input.next_token()?;
                if next == TokenKind::EndArray {
                    break;
                }
                text.push_str("entry=");
                text.push_str(&stringify_next(next, input)?);
            }
            text.push_str("</array>");
            Ok(text)
        }

        TokenKind::String => Ok(format!("'{}'", input.string())),
        TokenKind::Boolean => Ok(String::from(if input.boolean() { "true" } else { "false" })),
        TokenKind::Null => Ok(String::from("null")),
        TokenKind::Number => Ok(format!("{} ", input.raw_number())),

        TokenKind::EndMapping | TokenKind::EndArray => panic!("unbalanced end token"),
    }
}
