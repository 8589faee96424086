//! Circular selection arithmetic shared by the menu and option prompts.

/// Move selection one item forward, wrapping past the end to the first item.
///
/// A list of zero or one item leaves the selection untouched.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if item_count <= 1 {
        return selected;
    }
    (selected + 1) % item_count
}

/// Move selection one item back, wrapping past the start to the last item.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count <= 1 {
        return selected;
    }
    (selected + item_count - 1) % item_count
}
