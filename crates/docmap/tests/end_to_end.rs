#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use docmap::{
    from_input, json, map_record, AltMode, Alts, Context, DocError, DocErrorKind, Mapped, Member,
    RangeBounded, Schema, SizeBounded,
};

/// Maps one value from `$doc`, returning the result, the reported parse
/// errors, and the reported consume errors.
macro_rules! map_doc {
    ($ty:ty, $doc:expr) => {{
        let parse_errors: RefCell<Vec<json::ParseError>> = RefCell::new(Vec::new());
        let consume_errors: RefCell<Vec<DocError>> = RefCell::new(Vec::new());
        let mut input = json::parse($doc, |err| parse_errors.borrow_mut().push(*err));
        let result: Option<$ty> = from_input(&mut input, |err: &DocError| {
            consume_errors.borrow_mut().push(*err)
        });
        drop(input);
        (result, parse_errors.into_inner(), consume_errors.into_inner())
    }};
}

#[derive(Debug, Default, PartialEq)]
struct Entry {
    a: i64,
    b: String,
}

impl<'de> Mapped<'de> for Entry {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(Member::field("a", |r: &mut Self| &mut r.a))
            .member(Member::field("b", |r: &mut Self| &mut r.b))
    }
}

#[derive(Debug, Default, PartialEq)]
struct Settings {
    flag: bool,
    numbers: BTreeMap<String, i64>,
}

impl<'de> Mapped<'de> for Settings {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(
                Member::field("flag", |r: &mut Self| &mut r.flag)
                    .alias("f")
                    .defaulted(),
            )
            .member(Member::captures("numbers", |r: &mut Self| &mut r.numbers))
    }
}

#[derive(Debug, Default, PartialEq)]
struct Pizza {
    options: Vec<String>,
}

impl<'de> Mapped<'de> for Pizza {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new().member(
            Member::appended("options", |r: &mut Self| &mut r.options).short("opt"),
        )
    }
}

#[derive(Debug, Default, PartialEq)]
struct Write {
    new_content: String,
}

impl<'de> Mapped<'de> for Write {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new().member(Member::field("new_content", |r: &mut Self| &mut r.new_content))
    }
}

#[derive(Debug, Default, PartialEq)]
struct Delete {
    immediately: bool,
}

impl<'de> Mapped<'de> for Delete {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(Member::field("immediately", |r: &mut Self| &mut r.immediately).defaulted())
    }
}

#[derive(Debug, Default, PartialEq)]
enum Payload {
    #[default]
    Unset,
    Write(Write),
    Delete(Delete),
}

#[derive(Debug, Default, PartialEq)]
struct FileOp {
    file: String,
    payload: Payload,
}

impl<'de> Mapped<'de> for FileOp {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(Member::field("file", |r: &mut Self| &mut r.file))
            .member(Member::discriminated(
                "payload",
                Alts::new("type", AltMode::Nest)
                    .alt("write", |r: &mut Self, value: Write| {
                        r.payload = Payload::Write(value)
                    })
                    .alt("delete", |r: &mut Self, value: Delete| {
                        r.payload = Payload::Delete(value)
                    }),
            ))
    }
}

#[derive(Debug, Default, PartialEq)]
struct Person {
    name: SizeBounded<String, 1>,
    height: RangeBounded<u32, 30, 300>,
    custom: i32,
}

impl<'de> Mapped<'de> for Person {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(Member::field("name", |r: &mut Self| &mut r.name))
            .member(Member::field("height", |r: &mut Self| &mut r.height))
            .member(Member::field("custom", |r: &mut Self| &mut r.custom))
    }
}

map_record!(Entry, Settings, Pizza, Write, Delete, FileOp, Person);

#[test]
fn plain_record() {
    let (result, parse_errors, errors) = map_doc!(Entry, r#"{"a":1,"b":"text"}"#);

    assert!(parse_errors.is_empty());
    assert!(errors.is_empty());
    assert_eq!(
        result,
        Some(Entry {
            a: 1,
            b: String::from("text")
        })
    );
}

#[test]
fn additional_keys_and_defaulted_flag() {
    let (result, _, errors) = map_doc!(Settings, r#"{"one":1,"two":2,"three":3}"#);

    assert!(errors.is_empty());
    let settings = result.unwrap();
    assert!(!settings.flag);
    assert_eq!(
        settings.numbers,
        BTreeMap::from([
            (String::from("one"), 1),
            (String::from("two"), 2),
            (String::from("three"), 3),
        ])
    );
}

#[test]
fn repeated_short_keys_collect_in_order() {
    let (result, _, errors) = map_doc!(Pizza, r#"{"opt":"medium","opt":"with salami"}"#);

    assert!(errors.is_empty());
    assert_eq!(
        result.unwrap().options,
        ["medium", "with salami"].map(String::from)
    );
}

#[test]
fn tagged_union_with_nested_payload() {
    let (result, _, errors) = map_doc!(
        FileOp,
        r#"{"file":"R","type":"write","payload":{"new_content":"hi"}}"#
    );

    assert!(errors.is_empty());
    let op = result.unwrap();
    assert_eq!(op.file, "R");
    assert_eq!(
        op.payload,
        Payload::Write(Write {
            new_content: String::from("hi")
        })
    );
}

#[test]
fn broken_documents_report_every_reachable_error() {
    let doc = r#"[
            { "name": "Rölf", "height": 180, ???? },
            { "name": "Bert", "height" 170, "custom": 9 }
        ]"#;

    let (result, parse_errors, _) = map_doc!(Vec<Person>, doc);

    assert_eq!(result, None);
    assert_eq!(parse_errors.len(), 2);
    assert_eq!(parse_errors[0].kind, json::ParseErrorKind::ExpectedKey);
    assert_eq!(parse_errors[1].kind, json::ParseErrorKind::ExpectedColon);
    assert!(parse_errors[0].location.byte < parse_errors[1].location.byte);
}

#[test]
fn out_of_range_value_reports_and_aborts() {
    let doc = r#"[
            { "name": "Rölf", "height": 0, "custom": 9 }
        ]"#;

    let (result, parse_errors, errors) = map_doc!(Vec<Person>, doc);

    assert_eq!(result, None);
    assert!(parse_errors.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, DocErrorKind::ValueTooSmall);
    // The error points at the offending `0`.
    assert_eq!(&doc[errors[0].location.byte as usize..][..1], "0");
}
