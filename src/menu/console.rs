//! Console Menu Driver
//! Reads menu choices from a line source and executes the resulting effects.

use crate::charts::{ChartData, ChartError, ChartStyle, StaticChartRenderer};
use crate::data::{ensure_dir, ExportError};
use crate::menu::state::{ChartMenu, MenuEffect};
use std::io::{self, BufRead, Cursor, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Line-at-a-time input. Stdin takes its lock per line so several
/// prompts can share the terminal.
pub trait ReadLine {
    /// Appends one line to `buf`; `Ok(0)` at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl ReadLine for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> ReadLine for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// What happened while a menu was open.
#[derive(Debug, Default, Clone)]
pub struct MenuOutcome {
    pub previews: usize,
    pub saved: Vec<PathBuf>,
}

impl MenuOutcome {
    /// Adds newly written files; a repeated save lists each file once.
    fn record_saved(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            if !self.saved.contains(&path) {
                self.saved.push(path);
            }
        }
    }
}

/// Drives chart menus over any line-oriented input.
pub struct ConsoleMenu<R, W> {
    input: R,
    output: W,
    output_dir: PathBuf,
    preview_dir: PathBuf,
    open_previews: bool,
}

impl ConsoleMenu<io::Stdin, io::Stdout> {
    /// Menu on the process terminal; previews open in the system viewer.
    pub fn stdio(output_dir: &Path) -> Self {
        Self::new(io::stdin(), io::stdout(), output_dir)
    }
}

impl<R: ReadLine, W: Write> ConsoleMenu<R, W> {
    pub fn new(input: R, output: W, output_dir: &Path) -> Self {
        Self {
            input,
            output,
            output_dir: output_dir.to_path_buf(),
            preview_dir: std::env::temp_dir().join("catalog_lens_preview"),
            open_previews: true,
        }
    }

    pub fn with_preview_dir(mut self, dir: &Path) -> Self {
        self.preview_dir = dir.to_path_buf();
        self
    }

    /// Render previews without launching a viewer.
    pub fn without_viewer(mut self) -> Self {
        self.open_previews = false;
        self
    }

    /// Run one menu until the operator continues. End of input counts as continue.
    pub fn run(&mut self, data: &ChartData, is_last: bool) -> Result<MenuOutcome, MenuError> {
        let mut menu = ChartMenu::new(data.kind, is_last);
        let mut outcome = MenuOutcome::default();

        while !menu.is_exited() {
            self.print_menu(&menu)?;
            let choice = match self.read_line()? {
                Some(line) => line,
                None => {
                    info!(menu = menu.title(), "input closed, leaving menu");
                    break;
                }
            };

            match menu.handle_input(&choice) {
                MenuEffect::Preview(styles) => {
                    for style in styles {
                        self.preview(data, style)?;
                        outcome.previews += 1;
                    }
                    menu.finish_render();
                    write!(self.output, "Press Enter to return to menu...")?;
                    self.output.flush()?;
                    self.read_line()?;
                }
                MenuEffect::SaveAll => {
                    ensure_dir(&self.output_dir)?;
                    let paths = StaticChartRenderer::render_all(data, &self.output_dir)?;
                    writeln!(
                        self.output,
                        "All {} visualizations saved to '{}'",
                        data.kind.file_stem(),
                        self.output_dir.display()
                    )?;
                    info!(count = paths.len(), dir = %self.output_dir.display(), "charts saved");
                    outcome.record_saved(paths);
                }
                MenuEffect::InvalidChoice => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1 and 6."
                    )?;
                }
                MenuEffect::Exit | MenuEffect::Ignored => {}
            }
        }

        Ok(outcome)
    }

    fn print_menu(&mut self, menu: &ChartMenu) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", menu.title())?;
        for line in menu.options() {
            writeln!(self.output, "{line}")?;
        }
        write!(self.output, "Enter your choice (1-6): ")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn preview(&mut self, data: &ChartData, style: ChartStyle) -> Result<(), MenuError> {
        std::fs::create_dir_all(&self.preview_dir)?;
        let path = self.preview_dir.join(data.file_name(style));
        StaticChartRenderer::render_to_file(data, style, &path)?;
        writeln!(self.output, "Preview: {}", path.display())?;

        if self.open_previews {
            if let Err(e) = open::that(&path) {
                warn!(path = %path.display(), error = %e, "could not open chart viewer");
            }
        }
        Ok(())
    }
}
