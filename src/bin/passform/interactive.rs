//! The password form, driven through terminal prompts.

use anyhow::Context;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};

use passform::{Action, CharacterClass, CharacterClasses, FormState, IndexSource, Status};

use crate::ProgError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum MenuEntry {
    SetLength,
    ChooseClasses,
    Generate,
    Copy,
    Reset,
    Quit,
}

impl MenuEntry {
    const ALL: [MenuEntry; 6] = [
        MenuEntry::SetLength,
        MenuEntry::ChooseClasses,
        MenuEntry::Generate,
        MenuEntry::Copy,
        MenuEntry::Reset,
        MenuEntry::Quit,
    ];

    fn label(self, state: &FormState) -> String {
        match self {
            MenuEntry::SetLength => format!("Password length [{}]", state.length_text()),
            MenuEntry::ChooseClasses => "Character classes".to_owned(),
            MenuEntry::Generate if state.is_touched() && !state.can_submit() => {
                "Generate password (fix the form first)".to_owned()
            }
            MenuEntry::Generate => "Generate password".to_owned(),
            MenuEntry::Copy => "Copy result to clipboard".to_owned(),
            MenuEntry::Reset => "Reset".to_owned(),
            MenuEntry::Quit => "Quit".to_owned(),
        }
    }
}

/// Run the form until the user quits.
pub(crate) fn run_form<S>(mut state: FormState, source: &mut S) -> Result<(), ProgError>
where
    S: IndexSource + ?Sized,
{
    let theme = ColorfulTheme::default();
    loop {
        render(&state);
        let labels = MenuEntry::ALL
            .iter()
            .map(|entry| entry.label(&state))
            .collect::<Vec<_>>();
        let selection = Select::with_theme(&theme)
            .with_prompt("Password Generator")
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("failed to query your selection")?;
        let entry = match selection {
            Some(idx) => MenuEntry::ALL[idx],
            None => return Ok(()),
        };

        state = match entry {
            MenuEntry::SetLength => {
                let text = prompt_length(&theme, &state)?;
                state.reduce(Action::SetLength(text), source)
            }
            MenuEntry::ChooseClasses => {
                let target = prompt_classes(&theme, state.classes())?;
                crate::toggle_towards(state, target, source)
            }
            MenuEntry::Generate => {
                let next = state.reduce(Action::Submit, source);
                if let Err(err) = next.validate() {
                    eprintln!("{}", style(err).red());
                }
                next
            }
            MenuEntry::Copy => {
                match state.password() {
                    Some(password) => {
                        crate::clipboard::send_to_clipboard(password.as_str().as_bytes())?;
                        eprintln!("Copied to the clipboard.");
                    }
                    None => eprintln!("{}", style(ProgError::NothingToCopy).yellow()),
                }
                state
            }
            MenuEntry::Reset => state.reduce(Action::Reset, source),
            MenuEntry::Quit => return Ok(()),
        };
    }
}

fn render(state: &FormState) {
    eprintln!();
    eprintln!("{}", style("Password Generator").bold());
    if let Some(err) = state.field_error() {
        eprintln!("  {}", style(err).red());
    }
    for class in CharacterClass::ALL {
        let mark = if state.classes().is_enabled(class) {
            style("[x]").green()
        } else {
            style("[ ]").dim()
        };
        eprintln!("  {} {}", mark, class.label());
    }
    if state.status() == Status::Shown {
        if let Some(password) = state.password() {
            eprintln!();
            eprintln!("{}", style("Result:").bold());
            println!("{}", style(password.as_str()).cyan());
        }
    }
}

fn prompt_length(theme: &ColorfulTheme, state: &FormState) -> Result<String, ProgError> {
    let text = Input::<String>::with_theme(theme)
        .with_prompt("Password Length (Ex. 8)")
        .with_initial_text(state.length_text())
        .allow_empty(true)
        .interact_text()
        .context("failed to read the password length")?;
    Ok(text)
}

fn prompt_classes(
    theme: &ColorfulTheme,
    current: CharacterClasses,
) -> Result<CharacterClasses, ProgError> {
    let items = CharacterClass::ALL
        .iter()
        .map(|class| (class.label(), current.is_enabled(*class)))
        .collect::<Vec<_>>();
    let chosen = match MultiSelect::with_theme(theme)
        .with_prompt("Character classes (space to toggle)")
        .items_checked(&items)
        .interact_opt()
        .context("failed to query your selection")?
    {
        Some(chosen) => chosen,
        None => return Ok(current),
    };

    let mut target = CharacterClasses {
        upper: false,
        lower: false,
        digits: false,
        symbols: false,
    };
    for idx in chosen {
        target.set(CharacterClass::ALL[idx], true);
    }
    Ok(target)
}
