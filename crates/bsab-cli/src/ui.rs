//! Interactive stdin/stdout chat loop

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use bsab_api::{FileAttachment, Role};
use bsab_chat::{ChatSession, Turn};

use crate::commands::{parse_command, CommandResult};

/// Run the interactive chat loop until /quit or EOF
pub async fn run_interactive(session: &mut ChatSession) -> Result<()> {
    // Show whatever the session was seeded with (the greeting)
    for turn in session.conversation().turns() {
        print_turn(turn);
    }

    loop {
        if let Some(file) = &session.pending().attachment {
            println!("[attached: {} ({})]", file.name, format_size(file.size()));
        }
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();
        if input.is_empty() && session.pending().attachment.is_none() {
            continue;
        }

        if let Some(result) = parse_command(input) {
            match result {
                CommandResult::Clear => {
                    session.clear();
                    println!("Cleared conversation.");
                    for turn in session.conversation().turns() {
                        print_turn(turn);
                    }
                }
                CommandResult::Exit => break,
                CommandResult::Attach(path) => attach_file(session, &path),
                CommandResult::Detach => match session.detach() {
                    Some(file) => println!("Removed attachment {}.", file.name),
                    None => println!("No attachment to remove."),
                },
                CommandResult::Embed(path) => embed_file(session, &path).await,
                CommandResult::History => {
                    for turn in session.conversation().turns() {
                        print_turn(turn);
                    }
                }
                CommandResult::Message(msg) => println!("{}", msg),
                CommandResult::Unknown(cmd) => {
                    println!("Unknown command: /{}", cmd);
                    println!("Type /help for available commands.");
                }
            }
            continue;
        }

        session.set_text(input);
        send_and_print(session).await?;
    }

    Ok(())
}

/// Drive one send and print the reply it produced
pub async fn send_and_print(session: &mut ChatSession) -> Result<()> {
    if !session.send().await {
        return Ok(());
    }
    // Every completed send ends with an assistant turn, whether the
    // history was appended to (file, error) or replaced (text query).
    if let Some(last) = session.conversation().turns().last() {
        if last.role == Role::Assistant {
            print_turn(last);
        }
    }
    Ok(())
}

fn attach_file(session: &mut ChatSession, path: &Path) {
    match FileAttachment::from_path(path) {
        Ok(file) => {
            println!(
                "Attached {} ({}). It will be sent with your next message.",
                file.name,
                format_size(file.size())
            );
            session.attach(file);
        }
        Err(e) => println!("Could not read {}: {}", path.display(), e),
    }
}

async fn embed_file(session: &ChatSession, path: &Path) {
    let file = match FileAttachment::from_path(path) {
        Ok(file) => file,
        Err(e) => {
            println!("Could not read {}: {}", path.display(), e);
            return;
        }
    };
    let name = file.name.clone();
    match session.embed_reference_file(file).await {
        Ok(chunks) => println!("✅ Uploaded \"{}\" → {} chunks created.", name, chunks),
        Err(e) => println!("{}", e),
    }
}

fn print_turn(turn: &Turn) {
    let who = match turn.role {
        Role::User => "you",
        Role::Assistant => "bot",
    };
    println!("{}> {}", who, turn.content);
    if let Some(ref meta) = turn.attachment {
        println!("     [file: {} ({})]", meta.name, format_size(meta.size));
    }
}

fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.0 KB");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }
}
