use crate::layout::Point;
use crate::tree::arena::{FileTree, NodeId};
use crate::ui::hit_test::resolve;
use crate::ui::navigation::{collapse, expand};

/// Mouse state tracking.
#[derive(Debug, Default, Clone, Copy)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
}

impl MouseState {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pointer buttons the interaction loop distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Expand one level.
    Primary,
    /// Collapse the parent's subtree.
    Secondary,
}

/// Discrete key commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// Expand the hovered node's whole subtree.
    ExpandAll,
    /// Collapse everything back to the root.
    CollapseAll,
}

/// Input action produced from raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Pointer now over `node` (or over nothing)
    Hover { node: Option<NodeId> },
    /// Reveal the children of `node` (every level if `all`)
    Expand { node: NodeId, all: bool },
    /// Fold the parent of `node` (the root if `all`)
    Collapse { node: NodeId, all: bool },
    /// Viewport resized
    Resize { width: u32, height: u32 },
    /// No action
    None,
}

/// Process a pointer move.
pub fn process_mouse_move(tree: &FileTree, mouse: &MouseState) -> InputAction {
    InputAction::Hover {
        node: resolve(tree, tree.root, mouse.position()),
    }
}

/// Process a mouse button press at the current pointer position.
pub fn process_mouse_button(
    button: MouseButton,
    mouse: &MouseState,
    tree: &FileTree,
) -> InputAction {
    let Some(node) = resolve(tree, tree.root, mouse.position()) else {
        return InputAction::None;
    };
    match button {
        MouseButton::Primary => InputAction::Expand { node, all: false },
        MouseButton::Secondary => InputAction::Collapse { node, all: false },
    }
}

/// Process a key press. Expand-all targets the node under the pointer.
pub fn process_key(key: KeyPress, mouse: &MouseState, tree: &FileTree) -> InputAction {
    match key {
        KeyPress::ExpandAll => match resolve(tree, tree.root, mouse.position()) {
            Some(node) => InputAction::Expand { node, all: true },
            None => InputAction::None,
        },
        KeyPress::CollapseAll => InputAction::Collapse {
            node: tree.root,
            all: true,
        },
    }
}

/// Apply an expand/collapse action to the tree.
/// Returns true if the visible set may have changed.
pub fn apply_action(tree: &mut FileTree, action: InputAction) -> bool {
    match action {
        InputAction::Expand { node, all } => {
            expand(tree, node, all);
            true
        }
        InputAction::Collapse { node, all } => collapse(tree, node, all).is_some(),
        InputAction::Hover { .. } | InputAction::Resize { .. } | InputAction::None => false,
    }
}
