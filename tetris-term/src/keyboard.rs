use console::{Key, Term};
use tetris_engine::Command;

/// Map a key press to a game command
pub fn key_to_command(key: &Key) -> Option<Command> {
    match key {
        Key::ArrowLeft => Some(Command::MoveLeft),
        Key::ArrowRight => Some(Command::MoveRight),
        Key::ArrowDown => Some(Command::SoftDrop),
        Key::ArrowUp => Some(Command::Rotate),
        Key::Escape | Key::Char('q') | Key::Char('Q') => Some(Command::Quit),
        Key::Char('r') | Key::Char('R') => Some(Command::Restart),
        _ => None,
    }
}

/// Start a thread reading keys from `term` and return the command channel it feeds
///
/// `read_key` blocks, so the reader runs on its own OS thread. It stops when
/// the terminal fails or every receiver is gone.
pub fn spawn_key_reader(term: Term) -> std::io::Result<flume::Receiver<Command>> {
    let (tx, rx) = flume::unbounded();
    std::thread::Builder::new()
        .name("keyboard".to_string())
        .spawn(move || loop {
            let key = match term.read_key() {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("Keyboard read failed: {}", e);
                    break;
                }
            };
            if let Some(command) = key_to_command(&key) {
                if tx.send(command).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

/// Block until the player answers the game-over prompt.
/// Returns true for Restart, false for Quit or a lost keyboard.
pub async fn wait_for_restart(commands: &flume::Receiver<Command>) -> bool {
    loop {
        match commands.recv_async().await {
            Ok(Command::Restart) => return true,
            Ok(Command::Quit) | Err(_) => return false,
            Ok(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_to_command(&Key::ArrowLeft), Some(Command::MoveLeft));
        assert_eq!(key_to_command(&Key::ArrowRight), Some(Command::MoveRight));
        assert_eq!(key_to_command(&Key::ArrowDown), Some(Command::SoftDrop));
        assert_eq!(key_to_command(&Key::ArrowUp), Some(Command::Rotate));
        assert_eq!(key_to_command(&Key::Escape), Some(Command::Quit));
        assert_eq!(key_to_command(&Key::Char('R')), Some(Command::Restart));
        assert_eq!(key_to_command(&Key::Char('x')), None);
        assert_eq!(key_to_command(&Key::Enter), None);
    }

    #[tokio::test]
    async fn test_prompt_skips_moves_until_answer() {
        let (tx, rx) = flume::unbounded();
        tx.send(Command::MoveLeft).unwrap();
        tx.send(Command::Rotate).unwrap();
        tx.send(Command::Restart).unwrap();
        tx.send(Command::Quit).unwrap();
        assert!(wait_for_restart(&rx).await);
        assert!(!wait_for_restart(&rx).await);

        drop(tx);
        assert!(!wait_for_restart(&rx).await);
    }
}
