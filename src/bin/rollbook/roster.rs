//! Student roster menu (roll, name, course, year)

use std::io::{self, BufRead, Write};

use rollbook::{Command, Engine, Enrollment, Outcome, RollbookError};

use crate::console::Console;

pub fn run<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Enrollment>) -> io::Result<()> {
    loop {
        console.say("\n===== Student Record Manager =====")?;
        console.say("1. Add Student")?;
        console.say("2. View All Students")?;
        console.say("3. Search Student by Roll")?;
        console.say("4. Remove Student")?;
        console.say("5. Exit")?;

        match console.prompt::<u32>("Enter choice: ")? {
            1 => {
                let roll = console.prompt("Enter Roll Number: ")?;
                let name = console.prompt_line("Enter Name: ")?;
                let course = console.prompt_line("Enter Course: ")?;
                let year = console.prompt("Enter Year: ")?;

                match engine.execute(Command::Add(Enrollment::new(roll, name, course, year))) {
                    Ok(_) => console.say("Student added successfully.")?,
                    Err(e) => report(console, e)?,
                }
            }
            2 => {
                if engine.store().is_empty() {
                    console.say("No student records available.")?;
                    continue;
                }
                console.say("\n--- Student List ---")?;
                for student in engine.store() {
                    show(console, student)?;
                }
            }
            3 => {
                let roll = console.prompt("Enter Roll Number to search: ")?;
                match engine.execute(Command::Find { key: roll }) {
                    Ok(Outcome::Found(student)) => {
                        console.say("\n--- Student Found ---")?;
                        show(console, &student)?;
                    }
                    Ok(_) => {}
                    Err(e) => report(console, e)?,
                }
            }
            4 => {
                let roll = console.prompt("Enter Roll Number to remove: ")?;
                match engine.execute(Command::Delete { key: roll }) {
                    Ok(_) => console.say("Student removed.")?,
                    Err(e) => report(console, e)?,
                }
            }
            5 => {
                console.say("Exiting program.")?;
                return Ok(());
            }
            _ => console.say("Invalid choice. Try again.")?,
        }
    }
}

fn show<I: BufRead, O: Write>(console: &mut Console<I, O>, s: &Enrollment) -> io::Result<()> {
    console.say(format!("Roll: {}", s.roll))?;
    console.say(format!("Name: {}", s.name))?;
    console.say(format!("Course: {}", s.course))?;
    console.say(format!("Year: {}\n", s.year))
}

fn report<I: BufRead, O: Write>(console: &mut Console<I, O>, err: RollbookError) -> io::Result<()> {
    match err {
        RollbookError::NotFound { key } => console.say(format!("Student with Roll No. {} not found.", key)),
        RollbookError::DuplicateKey { key } => {
            console.say(format!("Roll No. {} is already on the roster.", key))
        }
        RollbookError::CapacityExceeded { capacity } => {
            console.say(format!("Roster is full ({} students).", capacity))
        }
        other => console.say(format!("Error: {}", other)),
    }
}
