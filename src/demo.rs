//! Demo command set for the console binary.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serialcmd::{Command, CommandError, CommandReader, Context};

#[derive(Default)]
struct State {
    values: BTreeMap<String, String>,
    counter: i64,
    names: Vec<String>,
}

type Shared = Rc<RefCell<State>>;

/// Register the demo commands and the unknown-command fallback.
pub fn register(reader: &mut CommandReader) -> Result<(), CommandError> {
    let state = Shared::default();

    let commands = [
        Command::new("ECHO", echo)?,
        Command::new("SET", with_state(&state, set))?,
        Command::new("GET", with_state(&state, get))?,
        Command::new("HELP", with_state(&state, help))?,
        Command::hotkey("+", with_state(&state, |ctx, state| bump(ctx, state, 1)))?,
        Command::hotkey("-", with_state(&state, |ctx, state| bump(ctx, state, -1)))?,
    ];
    for command in commands {
        state.borrow_mut().names.push(command.name().to_string());
        reader.register(command);
    }

    reader.set_default_handler(|ctx, token| {
        // blank line
        let Some(token) = token else {
            return;
        };
        let token = String::from_utf8_lossy(token);
        let _ = ctx.reply(&format!("ERROR: Unrecognized command [{}]", token));
    });
    Ok(())
}

fn with_state<F>(state: &Shared, mut handler: F) -> impl FnMut(&mut Context<'_>) + 'static
where
    F: FnMut(&mut Context<'_>, &mut State) + 'static,
{
    let state = Rc::clone(state);
    move |ctx: &mut Context<'_>| handler(ctx, &mut state.borrow_mut())
}

fn echo(ctx: &mut Context<'_>) {
    let mut words = Vec::new();
    while let Some(word) = ctx.next_str() {
        words.push(word.into_owned());
    }
    let _ = ctx.reply(&words.join(" "));
}

fn set(ctx: &mut Context<'_>, state: &mut State) {
    let (Some(key), Some(value)) = (ctx.next_str(), ctx.next_str()) else {
        let _ = ctx.reply("ERROR: usage SET <key> <value>");
        return;
    };
    state.values.insert(key.into_owned(), value.into_owned());
    let _ = ctx.reply("OK");
}

fn get(ctx: &mut Context<'_>, state: &mut State) {
    let Some(key) = ctx.next_str() else {
        let _ = ctx.reply("ERROR: usage GET <key>");
        return;
    };
    let reply = match state.values.get(&*key) {
        Some(value) => format!("{}={}", key, value),
        None => format!("ERROR: {} not set", key),
    };
    let _ = ctx.reply(&reply);
}

fn help(ctx: &mut Context<'_>, state: &mut State) {
    let _ = ctx.reply(&state.names.join(" "));
}

fn bump(ctx: &mut Context<'_>, state: &mut State, delta: i64) {
    state.counter += delta;
    let _ = ctx.reply(&format!("counter={}", state.counter));
}
