/// Discrete player commands produced by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Quit,
    Restart,
}

/// Source of player commands
///
/// The sequence is lazy and may never end. `try_next` must not block: it
/// returns `None` when nothing is pending.
pub trait InputSource: Send {
    fn try_next(&mut self) -> Option<Command>;
}

/// A channel fed by a key reader. Losing the sender means the keyboard is
/// gone, which is reported as `Quit`.
impl InputSource for flume::Receiver<Command> {
    fn try_next(&mut self) -> Option<Command> {
        match self.try_recv() {
            Ok(command) => Some(command),
            Err(flume::TryRecvError::Empty) => None,
            Err(flume::TryRecvError::Disconnected) => Some(Command::Quit),
        }
    }
}
