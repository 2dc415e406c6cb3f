//! Interactive Shell
//!
//! A line-driven rendition of the app: header with drawer menu, the
//! forwarding number field with its dropdown, and one button group per
//! supplementary service.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::warn;

use supser_core::Section;
use supser_dialer::{DialError, DialOutcome, PermissionState, PreferenceStore};
use supser_mmi::{Operation, SupplementaryService};

use crate::app::App;
use crate::terminal::{paint, print_prompt, read_line};

const HELP: &str = "\
Commands:
  <service> <operation>   press a button, e.g. `unconditional registration` or `67 erase`
  number [value]          type into the number field (empty clears it)
  presets                 open the number dropdown
  pick <index|label>      choose a dropdown entry
  add                     save the typed number as a Custom entry
  menu                    toggle the drawer
  go <section>            switch section (`ss`, `calls`)
  resume                  re-read the call permission
  show                    redraw the screen
  help                    this text
  quit                    leave";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Help,
    Show,
    Menu,
    Go(Section),
    Number(String),
    Presets,
    Pick(String),
    Add,
    Press(SupplementaryService, Operation),
    Resume,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_action(line: &str) -> std::result::Result<Option<ShellAction>, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let action = match head.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "help" | "?" => ShellAction::Help,
        "show" => ShellAction::Show,
        "menu" => ShellAction::Menu,
        "presets" => ShellAction::Presets,
        "add" => ShellAction::Add,
        "resume" => ShellAction::Resume,
        "quit" | "exit" | "q" => ShellAction::Quit,
        "number" => ShellAction::Number(rest.to_string()),
        "pick" if !rest.is_empty() => ShellAction::Pick(rest.to_string()),
        "go" => Section::from_name(rest)
            .map(ShellAction::Go)
            .ok_or_else(|| format!("Unknown section '{}'", rest))?,
        _ => {
            let service: SupplementaryService = head.parse().map_err(|e| format!("{}", e))?;
            let operation: Operation = rest.parse().map_err(|e| format!("{}", e))?;
            ShellAction::Press(service, operation)
        }
    };
    Ok(Some(action))
}

/// Draw the current screen
pub fn render(app: &App) -> String {
    let palette = &app.branding.palette;
    let mut out = String::new();

    let _ = writeln!(out, "{}", paint(&app.navigator.header_text(&app.branding), palette.primary));
    let _ = writeln!(out, "{}", "-".repeat(40));

    if app.navigator.is_drawer_open() {
        let _ = writeln!(out, "{}", paint("Menu", palette.primary));
        for section in Section::ALL {
            let marker = if *section == app.navigator.selected() { ">" } else { " " };
            let _ = writeln!(out, " {} {}", marker, paint(section.title(), palette.secondary));
        }
        return out;
    }

    match app.navigator.selected() {
        Section::SupplementaryServices => render_services(app, &mut out),
        section if section.is_placeholder() => {
            let _ = writeln!(out, "{} (Work in progress)", section.header());
        }
        section => {
            let _ = writeln!(out, "{}", section.title());
        }
    }
    out
}

fn render_services(app: &App, out: &mut String) {
    let palette = &app.branding.palette;
    let _ = writeln!(out, "Enter CF number: [{}]", app.screen.numbers.selected());
    if let Some(code) = app.screen.combined() {
        let _ = writeln!(out, "    {}", code);
    }
    let _ = writeln!(out);

    for service in SupplementaryService::ALL {
        let option = service.option();
        let _ = writeln!(out, "{}  ({})", paint(option.title, palette.primary), service.as_str());
        let buttons: Vec<String> = Operation::ALL
            .iter()
            .map(|op| paint(&format!("[{}]", op.label()), palette.secondary))
            .collect();
        let _ = writeln!(out, "  {}", buttons.join(" "));
    }
}

fn render_presets(app: &App) -> String {
    let mut out = String::new();
    for (index, entry) in app.screen.numbers.entries().iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<12} {}", index, entry.label, entry.number);
    }
    out
}

fn describe_outcome(outcome: &DialOutcome) -> String {
    match outcome {
        DialOutcome::Dispatched(uri) => format!("Dialing {}", uri),
        DialOutcome::SettingsOpened => "Opened app settings".to_string(),
        DialOutcome::Dismissed => "Not dialed".to_string(),
    }
}

/// A device failure ends the attempt, not the session
fn report_failure(what: &str, err: &DialError) {
    warn!("{} failed: {}", what, err);
    println!("{} failed: {}", what, err);
}

/// Apply one action; returns `false` when the shell should exit
pub async fn apply(app: &mut App, action: ShellAction) -> Result<bool> {
    match action {
        ShellAction::Help => println!("{}", HELP),
        ShellAction::Show => print!("{}", render(app)),
        ShellAction::Menu => {
            app.navigator.toggle_drawer();
            print!("{}", render(app));
        }
        ShellAction::Go(section) => {
            app.navigator.select(section);
            print!("{}", render(app));
        }
        ShellAction::Number(value) => app.screen.numbers.set_selected(value),
        ShellAction::Presets => print!("{}", render_presets(app)),
        ShellAction::Pick(choice) => {
            let numbers = &mut app.screen.numbers;
            let picked = match choice.parse::<usize>() {
                Ok(index) => numbers.select_index(index).cloned(),
                Err(_) => numbers.select_label(&choice).cloned(),
            };
            match picked {
                Some(entry) => println!("Selected {} [{}]", entry.label, entry.number),
                None => println!("No entry '{}'", choice),
            }
        }
        ShellAction::Add => {
            if app.screen.numbers.commit_custom() {
                println!("Saved {} as Custom", app.screen.numbers.selected());
            }
        }
        ShellAction::Press(service, operation) => {
            if app.navigator.selected() != Section::SupplementaryServices {
                println!("Switch to Supplementary Services first (`go ss`)");
                return Ok(true);
            }
            match app.press(service, operation).await {
                Ok((code, outcome)) => {
                    println!("{}", code);
                    println!("{}", describe_outcome(&outcome));
                }
                Err(e) => report_failure("Dial", &e),
            }
        }
        ShellAction::Resume => match app.resume().await {
            Ok(state) => println!("Call permission: {:?}", state),
            Err(e) => report_failure("Permission check", &e),
        },
        ShellAction::Quit => return Ok(false),
    }
    Ok(true)
}

/// Run the interactive loop until `quit` or end of input
pub async fn run(mut app: App, prefs: &mut dyn PreferenceStore) -> Result<()> {
    let report = app.start(prefs).await?;
    if report.requested {
        println!("Call permission requested: {:?}", report.state);
    }
    if app.permission_state() != PermissionState::Granted {
        println!("Call permission is missing; dialing will offer the settings screen.");
    }

    print!("{}", render(&app));
    println!("Type `help` for commands.");

    loop {
        print_prompt("> ");
        let Some(line) = read_line().await? else {
            break;
        };
        match parse_action(&line) {
            Ok(Some(action)) => {
                if !apply(&mut app, action).await? {
                    break;
                }
            }
            Ok(None) => {}
            Err(message) => {
                warn!("Rejected input {:?}", line);
                println!("{}", message);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use supser_core::AppConfig;
    use supser_device_bridge::DryRunPlatform;
    use supser_dialer::{CallIntent, PermissionApi, PlatformError, PromptChoice};
    use supser_mmi::TelUri;

    use crate::app::dialer_for;
    use crate::terminal::FixedPrompt;

    fn app() -> App {
        let dialer = dialer_for(
            DryRunPlatform::new(true),
            Arc::new(FixedPrompt(PromptChoice::Cancel)),
        );
        App::new(&AppConfig::default(), dialer).unwrap()
    }

    struct UnpluggedPlatform;

    #[async_trait::async_trait]
    impl PermissionApi for UnpluggedPlatform {
        async fn is_granted(&self) -> Result<bool, PlatformError> {
            Ok(true)
        }

        async fn request(&self) -> Result<bool, PlatformError> {
            Ok(true)
        }

        async fn open_app_settings(&self) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl CallIntent for UnpluggedPlatform {
        async fn call(&self, _uri: &TelUri) -> Result<(), PlatformError> {
            Err(PlatformError::CommandFailed("Error: Activity not started".to_string()))
        }
    }

    #[test]
    fn test_parse_press() {
        assert_eq!(
            parse_action("67 erase all").unwrap(),
            Some(ShellAction::Press(SupplementaryService::WhenBusy, Operation::EraseAll))
        );
        assert_eq!(
            parse_action("Unconditional Registration").unwrap(),
            Some(ShellAction::Press(SupplementaryService::Unconditional, Operation::Registration))
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_action("   ").unwrap(), None);
        assert_eq!(parse_action("number").unwrap(), Some(ShellAction::Number(String::new())));
        assert_eq!(parse_action("go calls").unwrap(), Some(ShellAction::Go(Section::AutoCalls)));
        assert_eq!(parse_action("pick Landline 2").unwrap(), Some(ShellAction::Pick("Landline 2".into())));
        assert!(parse_action("go nowhere").is_err());
        assert!(parse_action("busy forward").is_err());
        assert!(parse_action("pick").is_err());
    }

    #[tokio::test]
    async fn test_custom_number_flow() {
        let mut app = app();
        apply(&mut app, ShellAction::Number("+48500600700".into())).await.unwrap();
        apply(&mut app, ShellAction::Add).await.unwrap();
        apply(&mut app, ShellAction::Add).await.unwrap();

        let customs: Vec<_> = app
            .screen
            .numbers
            .entries()
            .iter()
            .filter(|e| e.label == "Custom")
            .collect();
        assert_eq!(customs.len(), 1);

        apply(&mut app, ShellAction::Press(SupplementaryService::WhenNotAnswered, Operation::Activation))
            .await
            .unwrap();
        assert_eq!(app.screen.combined().unwrap().as_str(), "*62*+48500600700*11#");
    }

    #[tokio::test]
    async fn test_press_blocked_on_other_section() {
        let mut app = app();
        apply(&mut app, ShellAction::Go(Section::AutoCalls)).await.unwrap();
        apply(&mut app, ShellAction::Press(SupplementaryService::Unconditional, Operation::Interrogate))
            .await
            .unwrap();
        assert!(app.screen.combined().is_none());
        assert!(render(&app).contains("Calls (Work in progress)"));
    }

    #[tokio::test]
    async fn test_quit_stops() {
        let mut app = app();
        assert!(!apply(&mut app, ShellAction::Quit).await.unwrap());
        assert!(apply(&mut app, ShellAction::Show).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_dial_keeps_session() {
        let dialer = dialer_for(UnpluggedPlatform, Arc::new(FixedPrompt(PromptChoice::Cancel)));
        let mut app = App::new(&AppConfig::default(), dialer).unwrap();

        let keep_going = apply(
            &mut app,
            ShellAction::Press(SupplementaryService::Unconditional, Operation::Interrogate),
        )
        .await
        .unwrap();

        assert!(keep_going);
        assert_eq!(app.screen.combined().unwrap().as_str(), "*#21#");
        assert!(apply(&mut app, ShellAction::Resume).await.unwrap());
    }
}
