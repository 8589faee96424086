//! Static menu hierarchy.
//!
//! A menu is a tree of at most [`MAX_DEPTH`] levels.  Every item carries
//! its title together with exactly one [`Entry`]: a child level, a leaf
//! action, or nothing.  Keeping all three in one record means titles,
//! submenus and actions can never drift out of alignment.
//!
//! Trees are built in `const` context, so a malformed layout (empty level,
//! a fourth level, a non-root level without a trailing return slot) fails
//! the build instead of misbehaving on the device.

pub mod layout;


use crate::action::ActionId;
use crate::error::TreeError;

pub use layout::JAMMER_MENU;

/// Number of menu levels: root (0), submenu (1), sub-submenu (2).
pub const MAX_DEPTH: usize = 3;

/// Most items a single level may hold; the list screen draws no more.
pub const MAX_LEVEL_ITEMS: usize = 16;

/// What selecting an item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Entry {
    /// Opens the given child level.
    Submenu(&'static [MenuItem]),
    /// Launches an action.
    Leaf(ActionId),
    /// Carries nothing: return slots and unbound entries.
    Placeholder,
}

/// One selectable row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem {
    pub title: &'static str,
    pub entry: Entry,
}

impl MenuItem {
    /// Trailing "go to parent" row of every non-root level.
    pub const RETURN: MenuItem = MenuItem::placeholder("Return");

    pub const fn submenu(title: &'static str, items: &'static [MenuItem]) -> Self {
        Self {
            title,
            entry: Entry::Submenu(items),
        }
    }

    pub const fn leaf(title: &'static str, action: ActionId) -> Self {
        Self {
            title,
            entry: Entry::Leaf(action),
        }
    }

    pub const fn placeholder(title: &'static str) -> Self {
        Self {
            title,
            entry: Entry::Placeholder,
        }
    }

    /// Child level, if this item opens one.
    pub fn child(&self) -> Option<&'static [MenuItem]> {
        match self.entry {
            Entry::Submenu(items) => Some(items),
            _ => None,
        }
    }

    /// Bound action, if this item is a leaf.
    pub fn action(&self) -> Option<ActionId> {
        match self.entry {
            Entry::Leaf(id) => Some(id),
            _ => None,
        }
    }
}

/// Immutable menu hierarchy, addressed by index paths `[d0, d1, d2]`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuTree {
    title: &'static str,
    root: &'static [MenuItem],
}

impl MenuTree {
    /// Build a tree, panicking (at compile time when used in a `const` or
    /// `static`) if the layout is malformed.
    pub const fn new(title: &'static str, root: &'static [MenuItem]) -> Self {
        match Self::try_new(title, root) {
            Ok(tree) => tree,
            Err(TreeError::EmptyLevel) => panic!("menu level has no items"),
            Err(TreeError::TooDeep) => panic!("menu nests deeper than MAX_DEPTH"),
            Err(TreeError::TooManyItems) => panic!("menu level has too many items"),
            Err(TreeError::MissingReturnSlot) => panic!("submenu does not end with a return slot"),
            Err(_) => panic!("malformed menu tree"),
        }
    }

    /// Build a tree, reporting layout problems as a [`TreeError`].
    pub const fn try_new(title: &'static str, root: &'static [MenuItem]) -> Result<Self, TreeError> {
        match validate_level(root, 0) {
            Ok(()) => Ok(Self { title, root }),
            Err(e) => Err(e),
        }
    }

    /// Title of the root level.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Items of the level reached by following `prefix` from the root.
    pub fn level(&self, prefix: &[usize]) -> Result<&'static [MenuItem], TreeError> {
        if prefix.len() >= MAX_DEPTH {
            return Err(TreeError::BadPath);
        }

        let mut level = self.root;
        for (depth, &index) in prefix.iter().enumerate() {
            let item = level.get(index).ok_or(TreeError::OutOfRange {
                depth,
                index,
                size: level.len(),
            })?;
            level = item.child().ok_or(TreeError::NotASubmenu { depth })?;
        }
        Ok(level)
    }

    /// Number of items in the level reached by `prefix`.
    pub fn size_at(&self, prefix: &[usize]) -> Result<usize, TreeError> {
        self.level(prefix).map(<[MenuItem]>::len)
    }

    /// Item addressed by the full `path`.
    pub fn item_at(&self, path: &[usize]) -> Result<&'static MenuItem, TreeError> {
        let Some((&index, prefix)) = path.split_last() else {
            return Err(TreeError::BadPath);
        };
        let level = self.level(prefix)?;
        level.get(index).ok_or(TreeError::OutOfRange {
            depth: prefix.len(),
            index,
            size: level.len(),
        })
    }

    /// `true` if the item at `path` opens a submenu.
    pub fn has_child(&self, path: &[usize]) -> Result<bool, TreeError> {
        self.item_at(path).map(|item| item.child().is_some())
    }

    /// `true` iff `path` selects the last item of a non-root level.
    ///
    /// Recognized by position only; the item's title is never compared.
    pub fn is_return_slot(&self, path: &[usize]) -> Result<bool, TreeError> {
        self.item_at(path)?;
        let Some((&index, prefix)) = path.split_last() else {
            return Err(TreeError::BadPath);
        };
        if prefix.is_empty() {
            return Ok(false);
        }
        Ok(index + 1 == self.size_at(prefix)?)
    }

    /// Heading for the level reached by `prefix`: the root title, or the
    /// title of the item that opened it.
    pub fn level_title(&self, prefix: &[usize]) -> Result<&'static str, TreeError> {
        if prefix.is_empty() {
            return Ok(self.title);
        }
        self.item_at(prefix).map(|item| item.title)
    }
}

const fn validate_level(items: &'static [MenuItem], depth: usize) -> Result<(), TreeError> {
    if items.is_empty() {
        return Err(TreeError::EmptyLevel);
    }
    if items.len() > MAX_LEVEL_ITEMS {
        return Err(TreeError::TooManyItems);
    }
    if depth > 0 && !matches!(items[items.len() - 1].entry, Entry::Placeholder) {
        return Err(TreeError::MissingReturnSlot);
    }

    let mut i = 0;
    while i < items.len() {
        if let Entry::Submenu(children) = items[i].entry {
            if depth + 1 >= MAX_DEPTH {
                return Err(TreeError::TooDeep);
            }
            if let Err(e) = validate_level(children, depth + 1) {
                return Err(e);
            }
        }
        i += 1;
    }
    Ok(())
}
