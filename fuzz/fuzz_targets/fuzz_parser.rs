#![no_main]

use docmap::{from_input, json, DocInput, TokenKind, Value};
use libfuzzer_sys::fuzz_target;

fn parser(data: &[u8]) {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut parse_errors = 0usize;
    let mut input = json::parse(text, |_err| parse_errors += 1);

    // Build one dynamic value, then drain whatever the cursor still holds.
    let _ = from_input::<Value, _>(&mut input, |_err| {});
    loop {
        match input.next_token() {
            Ok(TokenKind::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));
