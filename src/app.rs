/*!
 * Application shell: key handling, dialogs and the event loop
 */

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::widgets::ListState;
use ratatui::Terminal;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::info;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::export::{ExportError, ExportMode, ExportOutcome, ExportPipeline};
use crate::launcher::SystemLauncher;
use crate::navigation::{Command, Navigator};
use crate::scanner::Scanner;
use crate::tree::TreeModel;
use crate::types::Focus;
use crate::ui;

/// Buttons of the export dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ExportChoice {
    /// Open the combined content in an editor
    #[strum(to_string = "Editor")]
    Editor,
    /// Copy the combined content to the clipboard
    #[strum(to_string = "Copy to clipboard")]
    Clipboard,
    /// Close the dialog
    #[strum(to_string = "Cancel")]
    Cancel,
}

impl ExportChoice {
    fn mode(self) -> Option<ExportMode> {
        match self {
            Self::Editor => Some(ExportMode::Editor),
            Self::Clipboard => Some(ExportMode::Clipboard),
            Self::Cancel => None,
        }
    }
}

/// A message shown until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text
    pub message: String,
    /// Whether this reports a failure
    pub is_error: bool,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    /// Describe the result of an export
    pub fn from_export(result: &std::result::Result<ExportOutcome, ExportError>) -> Self {
        match result {
            Ok(ExportOutcome::EmptySelection) => Self::info("No files selected."),
            Ok(ExportOutcome::Opened { artifact, command }) => Self::info(format!(
                "Temporary file created: {}\n({} started)",
                artifact.display(),
                command
            )),
            Ok(ExportOutcome::Copied { command, bytes }) => Self::info(format!(
                "Combined content copied to clipboard ({}, {} bytes).",
                command, bytes
            )),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Dialog drawn over the panes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Export mode choice; holds the highlighted button
    ExportChoice(ExportChoice),
    /// Informational or error message
    Notice(Notice),
}

/// Application state
pub struct App {
    pub(crate) navigator: Navigator,
    pipeline: ExportPipeline,
    pub(crate) modal: Option<Modal>,
    pub(crate) tree_state: ListState,
    pub(crate) list_state: ListState,
    should_quit: bool,
}

impl App {
    /// Build the application for a validated configuration
    pub fn new(config: &Config) -> Self {
        let scanner = Scanner::new(config.ignore_patterns.clone());
        let tree = TreeModel::new(&config.start_dir, Box::new(scanner));
        let pipeline = ExportPipeline::new(
            &config.start_dir,
            config.export_commands(),
            Box::new(SystemLauncher),
        );
        Self::with_parts(Navigator::new(tree), pipeline)
    }

    /// Build the application from already constructed parts
    pub fn with_parts(navigator: Navigator, pipeline: ExportPipeline) -> Self {
        Self {
            navigator,
            pipeline,
            modal: None,
            tree_state: ListState::default(),
            list_state: ListState::default(),
            should_quit: false,
        }
    }

    /// Navigation state
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Open dialog, if any
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// Whether the quit command was given
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the event loop until quit
    ///
    /// Each key is handled to completion before the next is read.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .terminal_context("drawing")?;

            if let Event::Key(key) = event::read().terminal_context("reading input")? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        info!("Quit requested");
        Ok(())
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.modal.take() {
            Some(Modal::ExportChoice(choice)) => self.handle_choice_key(choice, key),
            // Any key dismisses a notice
            Some(Modal::Notice(_)) => {}
            None => self.handle_pane_key(key),
        }
    }

    fn handle_pane_key(&mut self, key: KeyEvent) {
        let focus = self.navigator.focus();
        let command = match (key.code, focus) {
            (KeyCode::Char('q'), _) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('j') | KeyCode::Down, _) => Command::MoveDown,
            (KeyCode::Char('k') | KeyCode::Up, _) => Command::MoveUp,
            (KeyCode::Char('['), _) => Command::FocusTree,
            (KeyCode::Char(']'), _) => Command::FocusList,
            (KeyCode::Tab, _) => Command::SwitchFocus,
            (KeyCode::Char('h') | KeyCode::Left, Focus::Tree) => Command::CollapseOrUp,
            (KeyCode::Char('l'), Focus::Tree) => Command::ExpandOrInto,
            (KeyCode::Right, Focus::Tree) => Command::Expand,
            (KeyCode::Enter, Focus::Tree) => Command::Activate,
            (KeyCode::Char(' '), Focus::Tree) => Command::ToggleSelect,
            (KeyCode::Char('d'), Focus::List) => Command::RemoveSelected,
            (KeyCode::Esc, Focus::List) => Command::FocusTree,
            (KeyCode::Char('e'), Focus::List) => {
                self.begin_export();
                return;
            }
            _ => return,
        };
        self.navigator.apply(command);
    }

    fn begin_export(&mut self) {
        self.modal = Some(if self.navigator.selection().is_empty() {
            Modal::Notice(Notice::from_export(&Ok(ExportOutcome::EmptySelection)))
        } else {
            Modal::ExportChoice(ExportChoice::Editor)
        });
    }

    fn handle_choice_key(&mut self, choice: ExportChoice, key: KeyEvent) {
        let choices: Vec<ExportChoice> = ExportChoice::iter().collect();
        let index = choices.iter().position(|&c| c == choice).unwrap_or(0);

        let confirmed = match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                let previous = (index + choices.len() - 1) % choices.len();
                self.modal = Some(Modal::ExportChoice(choices[previous]));
                return;
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                let next = (index + 1) % choices.len();
                self.modal = Some(Modal::ExportChoice(choices[next]));
                return;
            }
            KeyCode::Enter => choice,
            KeyCode::Char('e') => ExportChoice::Editor,
            KeyCode::Char('c') => ExportChoice::Clipboard,
            KeyCode::Esc | KeyCode::Char('q') => ExportChoice::Cancel,
            _ => {
                self.modal = Some(Modal::ExportChoice(choice));
                return;
            }
        };

        if let Some(mode) = confirmed.mode() {
            let result = self.pipeline.export(self.navigator.selection(), mode);
            self.modal = Some(Modal::Notice(Notice::from_export(&result)));
        }
    }
}
