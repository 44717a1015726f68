//! Library catalog menu

use std::io::{self, BufRead, Write};

use rollbook::{Book, Command, Engine, Outcome, Predicate, RollbookError};

use crate::console::Console;

pub fn run<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Book>) -> io::Result<()> {
    loop {
        console.say("\n=== Library Management Menu ===")?;
        console.say("1. Add Book")?;
        console.say("2. Issue Book")?;
        console.say("3. Return Book")?;
        console.say("4. View All Books")?;
        console.say("5. Search Book by Title")?;
        console.say("6. Remove Book")?;
        console.say("7. Exit")?;

        match console.prompt::<u32>("Enter your choice: ")? {
            1 => {
                let title = console.prompt_line("Enter book title: ")?;
                let author = console.prompt_line("Enter author name: ")?;
                match engine.execute(Command::Add(Book::new(title, author))) {
                    Ok(Outcome::Added(id)) => console.say(format!("Book added successfully (ID {}).", id))?,
                    Ok(_) => {}
                    Err(e) => report(console, e)?,
                }
            }
            2 => {
                let id = console.prompt("Enter book ID to issue: ")?;
                match engine.modify(id, Book::issue) {
                    Ok(()) => console.say("Book issued successfully.")?,
                    Err(e) => report(console, e)?,
                }
            }
            3 => {
                let id = console.prompt("Enter book ID to return: ")?;
                match engine.modify(id, Book::return_book) {
                    Ok(()) => console.say("Book returned successfully.")?,
                    Err(e) => report(console, e)?,
                }
            }
            4 => {
                if engine.store().is_empty() {
                    console.say("No books available.")?;
                    continue;
                }
                console.say("\n--- All Books ---")?;
                for book in engine.store() {
                    show(console, book)?;
                }
            }
            5 => {
                let keyword = console.prompt_line("Enter keyword to search in title: ")?;
                let command = Command::Search {
                    field: "title".to_string(),
                    predicate: Predicate::contains(keyword),
                };
                match engine.execute(command) {
                    Ok(Outcome::Records(books)) if !books.is_empty() => {
                        for book in &books {
                            show(console, book)?;
                        }
                    }
                    Ok(_) => console.say("No books found with given title keyword.")?,
                    Err(e) => report(console, e)?,
                }
            }
            6 => {
                let id = console.prompt("Enter book ID to remove: ")?;
                match engine.execute(Command::Delete { key: id }) {
                    Ok(_) => console.say("Book removed.")?,
                    Err(e) => report(console, e)?,
                }
            }
            7 => {
                console.say("Exit the program.")?;
                return Ok(());
            }
            _ => console.say("Invalid choice! Try again.")?,
        }
    }
}

fn show<I: BufRead, O: Write>(console: &mut Console<I, O>, book: &Book) -> io::Result<()> {
    console.say(format!("ID: {}", book.id))?;
    console.say(format!("Title: {}", book.title))?;
    console.say(format!("Author: {}", book.author))?;
    let status = if book.issued { "Issued" } else { "Available" };
    console.say(format!("Status: {}\n", status))
}

fn report<I: BufRead, O: Write>(console: &mut Console<I, O>, err: RollbookError) -> io::Result<()> {
    match err {
        RollbookError::NotFound { .. } => console.say("Book not found."),
        RollbookError::AlreadyIssued { .. } => console.say("Book already issued."),
        RollbookError::NotIssued { .. } => console.say("Book is not issued."),
        other => console.say(format!("Error: {}", other)),
    }
}
