use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};

use crate::config::AppConfig;
use crate::layout::{self, Rect, MAX_EXTENT};
use crate::render::{ascii, raster};
use crate::scanner::types::ScanStats;
use crate::scanner::{DirectorySource, ScanError};
use crate::tree::arena::{FileTree, NodeId};
use crate::tree::build_tree;
use crate::ui::input::{self, InputAction, KeyPress, MouseButton, MouseState};
use crate::ui::navigation::visible_set;
use crate::ui::tooltip;

/// One line of input to the interaction loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hover { x: i32, y: i32 },
    Click { x: i32, y: i32 },
    RightClick { x: i32, y: i32 },
    ExpandAll { x: i32, y: i32 },
    CollapseAll,
    Resize { width: u32, height: u32 },
    List,
    Show,
    Snapshot(PathBuf),
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  hover X Y         describe the node under (X, Y)
  click X Y         expand the node under (X, Y) one level
  rclick X Y        collapse the parent of the node under (X, Y)
  expand-all X Y    expand the whole subtree under (X, Y)
  collapse-all      collapse everything back to the root
  resize W H        lay the tree out again in a W x H viewport
  list              print the visible rectangles
  show              draw the visible rectangles as text
  snapshot FILE     write the visible rectangles as a PPM image
  help              show this message
  quit              leave";

impl Command {
    /// Parse a command line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        if verb.starts_with('#') {
            return Ok(None);
        }
        let args: Vec<&str> = words.collect();

        let point = |args: &[&str]| -> Result<(i32, i32)> {
            match args {
                [x, y] => Ok((
                    x.parse().with_context(|| format!("bad x coordinate '{x}'"))?,
                    y.parse().with_context(|| format!("bad y coordinate '{y}'"))?,
                )),
                _ => bail!("'{verb}' takes two coordinates"),
            }
        };

        let command = match verb {
            "hover" => {
                let (x, y) = point(&args)?;
                Command::Hover { x, y }
            }
            "click" => {
                let (x, y) = point(&args)?;
                Command::Click { x, y }
            }
            "rclick" => {
                let (x, y) = point(&args)?;
                Command::RightClick { x, y }
            }
            "expand-all" => {
                let (x, y) = point(&args)?;
                Command::ExpandAll { x, y }
            }
            "collapse-all" => Command::CollapseAll,
            "resize" => match args.as_slice() {
                [w, h] => {
                    let width: u32 = w.parse().with_context(|| format!("bad width '{w}'"))?;
                    let height: u32 = h.parse().with_context(|| format!("bad height '{h}'"))?;
                    if width > MAX_EXTENT || height > MAX_EXTENT {
                        bail!("viewport {width}x{height} is larger than {MAX_EXTENT} on a side");
                    }
                    Command::Resize { width, height }
                }
                _ => bail!("'resize' takes a width and a height"),
            },
            "list" => Command::List,
            "show" => Command::Show,
            "snapshot" => match args.as_slice() {
                [file] => Command::Snapshot(PathBuf::from(file)),
                _ => bail!("'snapshot' takes one file name"),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{other}' (try 'help')"),
        };
        Ok(Some(command))
    }
}

/// Whether the loop should keep reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Top-level session state: the tree, the viewport and the pointer.
pub struct App {
    pub config: AppConfig,
    pub tree: FileTree,
    pub stats: ScanStats,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub mouse: MouseState,
    pub hover_node: Option<NodeId>,
}

impl App {
    /// Build the tree for `root_path` and lay it out in the configured viewport.
    pub fn load<S: DirectorySource + ?Sized>(
        root_path: &Path,
        source: &S,
        config: AppConfig,
    ) -> Result<Self, ScanError> {
        let started = Instant::now();
        let tree = build_tree(root_path, source)?;
        let stats = ScanStats::from_tree(
            root_path.to_path_buf(),
            &tree,
            started.elapsed().as_millis() as u64,
        );
        Ok(Self::with_tree(tree, stats, config))
    }

    /// Wrap an already-built tree.
    pub fn with_tree(tree: FileTree, stats: ScanStats, config: AppConfig) -> Self {
        let mut app = Self {
            viewport_width: config.viewport_width.min(MAX_EXTENT),
            viewport_height: config.viewport_height.min(MAX_EXTENT),
            config,
            tree,
            stats,
            mouse: MouseState::default(),
            hover_node: None,
        };
        app.relayout();
        app
    }

    pub fn viewport(&self) -> Rect {
        Rect::new(0, 0, self.viewport_width, self.viewport_height)
    }

    /// Recompute every rectangle for the current viewport.
    pub fn relayout(&mut self) {
        layout::compute_layout(&mut self.tree, self.viewport_width, self.viewport_height);
    }

    /// Handle viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport_width = width.min(MAX_EXTENT);
        self.viewport_height = height.min(MAX_EXTENT);
        self.relayout();
        self.hover_node = None;
    }

    pub fn path_of(&self, node: NodeId) -> String {
        tooltip::build_path(&self.tree, node, self.config.path_separator)
    }

    fn move_pointer(&mut self, x: i32, y: i32) {
        self.mouse.x = x;
        self.mouse.y = y;
        if let InputAction::Hover { node } = input::process_mouse_move(&self.tree, &self.mouse) {
            self.hover_node = node;
        }
    }

    fn handle_action<W: Write>(&mut self, action: InputAction, out: &mut W) -> Result<()> {
        match action {
            InputAction::None => writeln!(out, "no node")?,
            InputAction::Resize { width, height } => self.resize(width, height),
            InputAction::Hover { .. } => {}
            InputAction::Expand { node, .. } | InputAction::Collapse { node, .. } => {
                let changed = input::apply_action(&mut self.tree, action);
                let target = self.path_of(node);
                let visible = visible_set(&self.tree, self.tree.root).len();
                if changed {
                    writeln!(out, "{target}: {visible} visible")?;
                } else {
                    writeln!(out, "{target}: unchanged ({visible} visible)")?;
                }
            }
        }
        Ok(())
    }

    /// Execute one command, writing its report to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Hover { x, y } => {
                self.move_pointer(x, y);
                match self.hover_node {
                    Some(node) => {
                        let info =
                            tooltip::build_tooltip(&self.tree, node, self.config.path_separator);
                        let rect = self.tree.get(node).rect;
                        write!(
                            out,
                            "{} [{}] at ({}, {}) {}x{}",
                            info.full_path,
                            info.size_display,
                            rect.x,
                            rect.y,
                            rect.width,
                            rect.height
                        )?;
                        match info.child_count {
                            Some(n) => writeln!(out, " dir, {n} entries")?,
                            None => writeln!(out)?,
                        }
                    }
                    None => writeln!(out, "no node")?,
                }
            }
            Command::Click { x, y } => {
                self.move_pointer(x, y);
                let action =
                    input::process_mouse_button(MouseButton::Primary, &self.mouse, &self.tree);
                self.handle_action(action, out)?;
            }
            Command::RightClick { x, y } => {
                self.move_pointer(x, y);
                let action =
                    input::process_mouse_button(MouseButton::Secondary, &self.mouse, &self.tree);
                self.handle_action(action, out)?;
            }
            Command::ExpandAll { x, y } => {
                self.move_pointer(x, y);
                let action = input::process_key(KeyPress::ExpandAll, &self.mouse, &self.tree);
                self.handle_action(action, out)?;
            }
            Command::CollapseAll => {
                let action = input::process_key(KeyPress::CollapseAll, &self.mouse, &self.tree);
                self.handle_action(action, out)?;
            }
            Command::Resize { width, height } => {
                self.handle_action(InputAction::Resize { width, height }, out)?;
                writeln!(out, "viewport {width}x{height}")?;
            }
            Command::List => {
                for v in visible_set(&self.tree, self.tree.root) {
                    let node = self.tree.get(v.node);
                    writeln!(
                        out,
                        "{:>6} {:>6} {:>6} {:>6}  {:>10}  {}",
                        v.rect.x,
                        v.rect.y,
                        v.rect.width,
                        v.rect.height,
                        tooltip::format_size(node.size),
                        self.path_of(v.node)
                    )?;
                }
            }
            Command::Show => {
                let visible = visible_set(&self.tree, self.tree.root);
                let text = ascii::render_ascii(
                    self.viewport(),
                    &visible,
                    &self.tree,
                    self.config.preview_cols,
                    self.config.preview_rows,
                );
                out.write_all(text.as_bytes())?;
            }
            Command::Snapshot(path) => {
                let visible = visible_set(&self.tree, self.tree.root);
                let image = raster::rasterize(
                    self.viewport_width,
                    self.viewport_height,
                    &visible,
                    &self.tree,
                )
                .with_context(|| format!("rendering {}", path.display()))?;
                let file = File::create(&path)
                    .with_context(|| format!("creating {}", path.display()))?;
                image
                    .write_ppm(BufWriter::new(file))
                    .with_context(|| format!("writing {}", path.display()))?;
                tracing::info!("Snapshot written to {}", path.display());
                writeln!(out, "wrote {}", path.display())?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Read commands from `input` until it ends or `quit` is given.
    ///
    /// Malformed commands and failed snapshots are reported on `out`; only
    /// I/O errors on `input`/`out` themselves end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "error: {e:#}")?;
                    continue;
                }
            };
            match self.execute(command, out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => {
                    tracing::warn!("command failed: {e:#}");
                    writeln!(out, "error: {e:#}")?;
                }
            }
            out.flush()?;
        }
        Ok(())
    }
}
