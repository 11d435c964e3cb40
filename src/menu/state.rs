//! Chart Menu State Machine
//! Pure menu logic: commands in, state transitions and effects out.

use crate::charts::{ChartKind, ChartStyle};
use std::fmt;

/// Where a chart menu currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Waiting for a choice.
    MenuOpen,
    /// A preview is being drawn; input is ignored until `finish_render`.
    Rendering,
    /// All styles were written; the menu keeps accepting choices.
    Saved,
    /// Terminal state.
    Exited,
}

/// One operator choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    View(ChartStyle),
    ViewAll,
    SaveAll,
    Continue,
}

impl MenuCommand {
    /// Parse the numbered menu choice (`1`-`6`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuCommand::View(ChartStyle::Stylized)),
            "2" => Some(MenuCommand::View(ChartStyle::Basic)),
            "3" => Some(MenuCommand::View(ChartStyle::Annotated)),
            "4" => Some(MenuCommand::ViewAll),
            "5" => Some(MenuCommand::SaveAll),
            "6" => Some(MenuCommand::Continue),
            _ => None,
        }
    }
}

/// What the driver has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect {
    Preview(Vec<ChartStyle>),
    SaveAll,
    InvalidChoice,
    Exit,
    /// Input arrived while rendering or after exit.
    Ignored,
}

/// Menu for one chart table.
#[derive(Debug, Clone)]
pub struct ChartMenu {
    kind: ChartKind,
    is_last: bool,
    state: MenuState,
}

impl ChartMenu {
    /// `is_last` only changes the wording of the exit option.
    pub fn new(kind: ChartKind, is_last: bool) -> Self {
        Self {
            kind,
            is_last,
            state: MenuState::MenuOpen,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn is_exited(&self) -> bool {
        self.state == MenuState::Exited
    }

    /// Parse raw input and apply it.
    pub fn handle_input(&mut self, input: &str) -> MenuEffect {
        if matches!(self.state, MenuState::Rendering | MenuState::Exited) {
            return MenuEffect::Ignored;
        }
        match MenuCommand::parse(input) {
            Some(command) => self.apply(command),
            None => MenuEffect::InvalidChoice,
        }
    }

    pub fn apply(&mut self, command: MenuCommand) -> MenuEffect {
        match self.state {
            MenuState::Rendering | MenuState::Exited => MenuEffect::Ignored,
            MenuState::MenuOpen | MenuState::Saved => match command {
                MenuCommand::View(style) => {
                    self.state = MenuState::Rendering;
                    MenuEffect::Preview(vec![style])
                }
                MenuCommand::ViewAll => {
                    self.state = MenuState::Rendering;
                    MenuEffect::Preview(ChartStyle::ALL.to_vec())
                }
                MenuCommand::SaveAll => {
                    self.state = MenuState::Saved;
                    MenuEffect::SaveAll
                }
                MenuCommand::Continue => {
                    self.state = MenuState::Exited;
                    MenuEffect::Exit
                }
            },
        }
    }

    /// Preview done; back to the menu.
    pub fn finish_render(&mut self) {
        if self.state == MenuState::Rendering {
            self.state = MenuState::MenuOpen;
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ChartKind::Genres => "GENRE DISTRIBUTION VISUALIZATIONS",
            ChartKind::Ratings => "CONTENT RATINGS VISUALIZATIONS",
        }
    }

    /// Numbered option lines.
    pub fn options(&self) -> Vec<String> {
        let (stylized, basic, annotated) = match self.kind {
            ChartKind::Genres => ("Gradient Bar Plot", "Basic Bar Plot", "Enhanced Bar Plot"),
            ChartKind::Ratings => ("Count Plot", "Bar Chart", "Enhanced Bar Chart"),
        };
        let exit = match (self.kind, self.is_last) {
            (_, true) => "Finish Visualizations".to_string(),
            (ChartKind::Genres, false) => "Continue to Ratings Visualizations".to_string(),
            (ChartKind::Ratings, false) => "Continue to Genre Visualizations".to_string(),
        };

        vec![
            format!("1. View {} Version ({})", ChartStyle::Stylized, stylized),
            format!("2. View {} Version ({})", ChartStyle::Basic, basic),
            format!("3. View {} Version ({})", ChartStyle::Annotated, annotated),
            "4. View All Versions".to_string(),
            "5. Save All Versions".to_string(),
            format!("6. {exit}"),
        ]
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MenuState::MenuOpen => "menu open",
            MenuState::Rendering => "rendering",
            MenuState::Saved => "saved",
            MenuState::Exited => "exited",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_choices() {
        assert_eq!(MenuCommand::parse(" 1\n"), Some(MenuCommand::View(ChartStyle::Stylized)));
        assert_eq!(MenuCommand::parse("4"), Some(MenuCommand::ViewAll));
        assert_eq!(MenuCommand::parse("6"), Some(MenuCommand::Continue));
        assert_eq!(MenuCommand::parse("7"), None);
        assert_eq!(MenuCommand::parse("save"), None);
    }

    #[test]
    fn invalid_input_keeps_state() {
        let mut menu = ChartMenu::new(ChartKind::Genres, false);
        assert_eq!(menu.handle_input("x"), MenuEffect::InvalidChoice);
        assert_eq!(menu.state(), MenuState::MenuOpen);
    }

    #[test]
    fn view_renders_then_returns_to_menu() {
        let mut menu = ChartMenu::new(ChartKind::Genres, false);
        assert_eq!(
            menu.handle_input("2"),
            MenuEffect::Preview(vec![ChartStyle::Basic])
        );
        assert_eq!(menu.state(), MenuState::Rendering);
        assert_eq!(menu.handle_input("6"), MenuEffect::Ignored);

        menu.finish_render();
        assert_eq!(menu.state(), MenuState::MenuOpen);
        assert_eq!(menu.handle_input("4"), MenuEffect::Preview(ChartStyle::ALL.to_vec()));
    }

    #[test]
    fn save_then_continue_exits() {
        let mut menu = ChartMenu::new(ChartKind::Ratings, true);
        assert_eq!(menu.handle_input("5"), MenuEffect::SaveAll);
        assert_eq!(menu.state(), MenuState::Saved);
        assert_eq!(menu.handle_input("6"), MenuEffect::Exit);
        assert!(menu.is_exited());
    }

    #[test]
    fn exited_menu_ignores_commands() {
        let mut menu = ChartMenu::new(ChartKind::Genres, false);
        menu.apply(MenuCommand::Continue);
        assert_eq!(menu.apply(MenuCommand::SaveAll), MenuEffect::Ignored);
        assert_eq!(menu.handle_input("1"), MenuEffect::Ignored);
        assert_eq!(menu.state(), MenuState::Exited);
    }

    #[test]
    fn exit_option_wording_follows_position() {
        let first = ChartMenu::new(ChartKind::Genres, false);
        assert_eq!(first.options()[5], "6. Continue to Ratings Visualizations");
        let last = ChartMenu::new(ChartKind::Ratings, true);
        assert_eq!(last.options()[5], "6. Finish Visualizations");
        assert_eq!(last.options()[0], "1. View Stylized Version (Count Plot)");
    }
}
