//! Menu navigation state machine.
//!
//! The [`Navigator`] owns the cursor (current depth plus the selected index
//! at every depth) and applies the three button gestures to it.  It never
//! runs actions itself: confirming a leaf yields [`Confirm::Launch`] and the
//! caller hands the id to the [`ActionRunner`](crate::action::ActionRunner).

use crate::action::ActionId;
use crate::menu::{MenuTree, MAX_DEPTH};
use crate::ui::input_logic::{select_next, select_prev};

/// Transient cursor over a [`MenuTree`].
///
/// `position[d]` is meaningful only for `d <= depth`; deeper entries are
/// reset to 0 whenever their depth is entered again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    depth: usize,
    position: [usize; MAX_DEPTH],
}

impl Cursor {
    /// Root level, first item.
    pub const fn new() -> Self {
        Self {
            depth: 0,
            position: [0; MAX_DEPTH],
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Selected index at `depth`.
    pub fn position(&self, depth: usize) -> usize {
        self.position[depth]
    }

    /// All three per-depth positions, including stale ones.
    pub fn positions(&self) -> [usize; MAX_DEPTH] {
        self.position
    }

    /// Selected index at the current depth.
    pub fn selected(&self) -> usize {
        self.position[self.depth]
    }

    /// Full path of the selected item.
    pub fn path(&self) -> &[usize] {
        &self.position[..=self.depth]
    }

    /// Path of the level currently shown.
    pub fn prefix(&self) -> &[usize] {
        &self.position[..self.depth]
    }
}

/// Result of a confirm press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Confirm {
    /// Return slot selected: moved up one level.
    Popped,
    /// Entered a submenu.
    Pushed,
    /// Leaf selected. `None` when the leaf has no bound action.
    Launch(Option<ActionId>),
    /// Nothing to do (no deeper level available).
    Ignored,
}

/// Cursor plus the rules for moving it.
#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    tree: MenuTree,
    cursor: Cursor,
}

impl Navigator {
    /// Start at depth 0, positions `{0, 0, 0}`.
    pub fn new(tree: MenuTree) -> Self {
        Self {
            tree,
            cursor: Cursor::new(),
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Select the next item, wrapping to the first.
    pub fn move_next(&mut self) {
        let size = self.level_size();
        let depth = self.cursor.depth;
        self.cursor.position[depth] = select_next(self.cursor.position[depth], size);
        trace!("nav: next -> {}", self.cursor.position[depth]);
    }

    /// Select the previous item, wrapping to the last.
    pub fn move_previous(&mut self) {
        let size = self.level_size();
        let depth = self.cursor.depth;
        self.cursor.position[depth] = select_prev(self.cursor.position[depth], size);
        trace!("nav: previous -> {}", self.cursor.position[depth]);
    }

    /// Apply a confirm press: return, descend, or launch, in that order.
    pub fn confirm(&mut self) -> Confirm {
        let path = self.cursor.path();

        let is_return = self.tree.is_return_slot(path);
        let item = self.tree.item_at(path);
        let (is_return, item) = match (is_return, item) {
            (Ok(r), Ok(item)) => (r, item),
            (Err(e), _) | (_, Err(e)) => {
                error!("nav: cursor does not resolve: {:?}", e);
                debug_assert!(false, "cursor left the menu tree");
                return Confirm::Ignored;
            }
        };

        // Return slots only exist below the root, so this always pops.
        if is_return {
            self.pop();
            return Confirm::Popped;
        }

        if item.child().is_some() {
            if self.cursor.depth + 1 >= MAX_DEPTH {
                warn!("nav: '{}' nests below the last level", item.title);
                return Confirm::Ignored;
            }
            self.cursor.depth += 1;
            self.cursor.position[self.cursor.depth] = 0;
            debug!("nav: entered '{}' (depth {})", item.title, self.cursor.depth);
            return Confirm::Pushed;
        }

        Confirm::Launch(item.action())
    }

    /// Go up one level, forgetting the child selection.
    ///
    /// Returns `false` (and changes nothing) at the root.
    pub fn pop(&mut self) -> bool {
        if self.cursor.depth == 0 {
            return false;
        }
        let old = self.cursor.depth;
        self.cursor.position[old] = 0;
        self.cursor.depth -= 1;
        debug!("nav: back to depth {}", self.cursor.depth);
        true
    }

    fn level_size(&self) -> usize {
        match self.tree.size_at(self.cursor.prefix()) {
            Ok(size) => size,
            Err(e) => {
                error!("nav: level does not resolve: {:?}", e);
                debug_assert!(false, "cursor left the menu tree");
                0
            }
        }
    }
}
