use crossterm::event::KeyCode;

use crate::simulation::world::Command;

/// What a key press asks the front-end to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Command(Command),
}

/// Key bindings shown in the help line.
pub const KEY_HELP: &str =
    "n:new lines  r:random agent  a:reset agent  c:clear grid  space:pause  l:clear log  e:export  q:quit";

#[must_use]
pub fn map_key(code: KeyCode) -> Option<Input> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Char('n') => Command::NewLines,
        KeyCode::Char('r') => Command::RandomizeAgent,
        KeyCode::Char('a') => Command::ResetAgent,
        KeyCode::Char('c') => Command::ClearGrid,
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Char('l') => Command::ClearLog,
        KeyCode::Char('e') => Command::ExportLog(None),
        _ => return None,
    };
    Some(Input::Command(command))
}
