use eframe::egui::{self, Key, Modifiers};

use crate::state::SliderState;

/// A keyboard shortcut understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Move the slider by this many slices.
    Nudge(i64),
    Close,
}

/// Arrows step one slice, Shift+arrows ten; Escape closes the window.
pub fn key_command(key: Key, modifiers: Modifiers) -> Option<KeyCommand> {
    let step = if modifiers.shift { 10 } else { 1 };
    match key {
        Key::ArrowRight => Some(KeyCommand::Nudge(step)),
        Key::ArrowLeft => Some(KeyCommand::Nudge(-step)),
        Key::Escape => Some(KeyCommand::Close),
        _ => None,
    }
}

/// Take this frame's shortcut presses out of the input queue and apply them
/// to the slider. Returns `true` if the window should close.
///
/// Matched events are removed so a focused `D.z` slider does not step a
/// second time on the same press.
pub fn handle_keys(ctx: &egui::Context, slider: &mut SliderState) -> bool {
    let commands = ctx.input_mut(|i| {
        let mut commands = Vec::new();
        i.events.retain(|event| match event {
            egui::Event::Key {
                key,
                pressed,
                modifiers,
                ..
            } => match key_command(*key, *modifiers) {
                Some(command) => {
                    if *pressed {
                        commands.push(command);
                    }
                    false
                }
                None => true,
            },
            _ => true,
        });
        commands
    });

    let mut close = false;
    for command in commands {
        match command {
            KeyCommand::Nudge(delta) => slider.nudge(delta),
            KeyCommand::Close => close = true,
        }
    }
    close
}
