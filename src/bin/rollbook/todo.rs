//! To-do list menu

use std::io::{self, BufRead, Write};

use rollbook::{Command, Engine, RollbookError, Task};

use crate::console::Console;

pub fn run<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &mut Engine<Task>) -> io::Result<()> {
    loop {
        console.say("\n=== To-Do List ===")?;
        console.say("1. Add Task")?;
        console.say("2. View Tasks")?;
        console.say("3. Mark Task as Done")?;
        console.say("4. Delete Task")?;
        console.say("5. Exit")?;

        match console.prompt::<u32>("Choice: ")? {
            1 => {
                let description = console.prompt_line("Enter task description: ")?;
                match engine.execute(Command::Add(Task::new(description))) {
                    Ok(_) => console.say("Task added.")?,
                    Err(e) => report(console, e)?,
                }
            }
            2 => view(console, engine)?,
            3 => {
                view(console, engine)?;
                let id = console.prompt("Enter task number to mark as done: ")?;
                match engine.modify(id, |task| {
                    task.complete();
                    Ok(())
                }) {
                    Ok(()) => console.say("Task marked as done.")?,
                    Err(e) => report(console, e)?,
                }
            }
            4 => {
                let id = console.prompt("Enter task number to delete: ")?;
                match engine.execute(Command::Delete { key: id }) {
                    Ok(_) => console.say("Task deleted.")?,
                    Err(e) => report(console, e)?,
                }
            }
            5 => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            _ => console.say("Invalid option.")?,
        }
    }
}

fn view<I: BufRead, O: Write>(console: &mut Console<I, O>, engine: &Engine<Task>) -> io::Result<()> {
    if engine.store().is_empty() {
        return console.say("No tasks found.");
    }

    console.say("\n--- Tasks ---")?;
    for task in engine.store() {
        let status = if task.completed { "[Done]" } else { "[Pending]" };
        console.say(format!("{}. {} {}", task.id, task.description, status))?;
    }
    Ok(())
}

fn report<I: BufRead, O: Write>(console: &mut Console<I, O>, err: RollbookError) -> io::Result<()> {
    match err {
        RollbookError::NotFound { .. } => console.say("Invalid number."),
        other => console.say(format!("Error: {}", other)),
    }
}
