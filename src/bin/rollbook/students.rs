//! File-backed student manager menu

use std::io::{self, BufRead, Write};

use rollbook::record::MAX_NAME_BYTES;
use rollbook::{Command, Engine, FieldValue, Outcome, Predicate, RollbookError, Student};

use crate::console::Console;

pub fn run<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Student>) -> io::Result<()> {
    loop {
        console.say("\n==== Student Management System ====")?;
        console.say("1. Add Student")?;
        console.say("2. View All Students")?;
        console.say("3. Search Student by Roll No.")?;
        console.say("4. Update Student")?;
        console.say("5. Delete Student")?;
        console.say("6. Save & Exit")?;

        match console.prompt::<u32>("Enter choice: ")? {
            1 => add(console, engine)?,
            2 => view_all(console, engine)?,
            3 => search(console, engine)?,
            4 => update(console, engine)?,
            5 => delete(console, engine)?,
            6 => return Ok(()),
            _ => {
                console.say("Invalid choice.")?;
                continue;
            }
        }
        console.pause()?;
    }
}

fn add<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Student>) -> io::Result<()> {
    if engine.store().is_full() {
        return console.say("Student limit reached!");
    }

    let roll = console.prompt("Enter Roll Number: ")?;
    let name = console.prompt_line(&format!("Enter Name (max {} bytes): ", MAX_NAME_BYTES))?;
    let age = console.prompt("Enter Age: ")?;
    let marks = console.prompt("Enter Marks: ")?;

    match engine.execute(Command::Add(Student::new(roll, name, age, marks))) {
        Ok(_) => console.say("Student added successfully."),
        Err(e) => report(console, e),
    }
}

fn view_all<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Student>) -> io::Result<()> {
    if engine.store().is_empty() {
        return console.say("No student records found.");
    }

    console.say("\n--- All Student Records ---")?;
    for student in engine.store() {
        console.say(format_student(student))?;
    }
    Ok(())
}

fn search<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Student>) -> io::Result<()> {
    let roll: i64 = console.prompt("Enter Roll Number to search: ")?;

    let command = Command::Search {
        field: "roll".to_string(),
        predicate: Predicate::equals(roll),
    };
    match engine.execute(command) {
        Ok(Outcome::Records(found)) if !found.is_empty() => {
            for student in &found {
                console.say(format!("Found: {}", format_student(student)))?;
            }
            Ok(())
        }
        Ok(_) => console.say(format!("Student with roll {} not found.", roll)),
        Err(e) => report(console, e),
    }
}

fn update<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Student>) -> io::Result<()> {
    let roll = console.prompt("Enter Roll Number to update: ")?;

    let current = match engine.store().find(roll) {
        Ok(student) => student.clone(),
        Err(e) => return report(console, e),
    };

    console.say(format!("Current: {}", format_student(&current)))?;
    console.say("(leave a value blank to keep it)")?;

    let mut changes = Vec::new();
    if let Some(name) = console.prompt_text_or_keep("Enter new name: ")? {
        changes.push(("name".to_string(), FieldValue::Text(name)));
    }
    if let Some(age) = console.prompt_or_keep::<i64>("Enter new age: ")? {
        changes.push(("age".to_string(), FieldValue::Int(age)));
    }
    if let Some(marks) = console.prompt_or_keep::<f64>("Enter new marks: ")? {
        changes.push(("marks".to_string(), FieldValue::Float(marks)));
    }

    match engine.execute(Command::Update { key: roll, changes }) {
        Ok(_) => console.say("Student updated."),
        Err(e) => report(console, e),
    }
}

fn delete<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Student>) -> io::Result<()> {
    let roll = console.prompt("Enter Roll Number to delete: ")?;

    match engine.execute(Command::Delete { key: roll }) {
        Ok(_) => console.say("Student deleted successfully."),
        Err(e) => report(console, e),
    }
}

fn format_student(s: &Student) -> String {
    format!(
        "Roll: {} | Name: {} | Age: {} | Marks: {:.2}",
        s.roll, s.name, s.age, s.marks
    )
}

fn report<I: BufRead, O: Write>(console: &mut Console<I, O>, err: RollbookError) -> io::Result<()> {
    match err {
        RollbookError::NotFound { key } => console.say(format!("Student with roll {} not found.", key)),
        RollbookError::CapacityExceeded { .. } => console.say("Student limit reached!"),
        RollbookError::DuplicateKey { key } => {
            console.say(format!("A student with roll {} already exists.", key))
        }
        other => console.say(format!("Error: {}", other)),
    }
}
