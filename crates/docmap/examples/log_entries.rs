//! Maps a log entry whose payload type is selected by a `"type"` key.

use docmap::{from_input, json, map_record, AltMode, Alts, Context, Mapped, Member, Schema};

#[derive(Debug, Default)]
struct WriteEntry {
    new_content: String,
}

#[derive(Debug, Default)]
struct DeleteEntry {
    immediately: bool,
}

#[derive(Debug, Default)]
enum Payload {
    #[default]
    Unset,
    Write(WriteEntry),
    Delete(DeleteEntry),
}

#[derive(Debug, Default)]
struct LogEntry {
    file_name: String,
    author: String,
    timestamp: u64,
    payload: Payload,
}

impl<'de> Mapped<'de> for WriteEntry {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new().member(Member::field("new_content", |e: &mut Self| &mut e.new_content))
    }
}

impl<'de> Mapped<'de> for DeleteEntry {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(Member::field("immediately", |e: &mut Self| &mut e.immediately).defaulted())
    }
}

impl<'de> Mapped<'de> for LogEntry {
    fn schema<C: Context + 'de>() -> Schema<'de, Self, C> {
        Schema::new()
            .member(Member::field("file_name", |e: &mut Self| &mut e.file_name))
            .member(Member::field("author", |e: &mut Self| &mut e.author))
            .member(Member::field("timestamp", |e: &mut Self| &mut e.timestamp))
            .member(Member::discriminated(
                "payload",
                Alts::new("type", AltMode::Nest)
                    .alt("write", |e: &mut Self, value: WriteEntry| {
                        e.payload = Payload::Write(value)
                    })
                    .alt("delete", |e: &mut Self, value: DeleteEntry| {
                        e.payload = Payload::Delete(value)
                    }),
            ))
    }
}

map_record!(WriteEntry, DeleteEntry, LogEntry);

fn main() {
    let document = r#"
        {
            "file_name": "README.md", "author": "Ben", "timestamp": 1234,
            "type": "write",
            "payload": { "new_content": "hello there" }
        }
    "#;

    let mut input = json::parse(document, |err| eprintln!("parse error: {err}"));
    let entry: Option<LogEntry> = from_input(&mut input, |err| eprintln!("consume error: {err}"));

    let entry = entry.expect("the document maps cleanly");
    println!(
        "{} edited by {} at {}",
        entry.file_name, entry.author, entry.timestamp
    );
    match entry.payload {
        Payload::Write(write) => println!("new content: {:?}", write.new_content),
        Payload::Delete(delete) => println!("deleted, immediately = {}", delete.immediately),
        Payload::Unset => println!("no payload"),
    }
}
