//! Keyboard highlight over the filtered option list.
//!
//! The pointer is a small state machine: it is either [`PointerState::Unset`]
//! (nothing highlighted) or [`PointerState::At`] a valid index of the
//! filtered list. Moving skips options the [`Selectable`] predicate refuses,
//! and stops at the list boundaries instead of wrapping around.

use serde_json::Value;

use horizon_select_core::logging::targets;

use crate::matcher::Matcher;
use crate::selection::Selectable;

/// Where the typeahead pointer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    /// Nothing is highlighted.
    #[default]
    Unset,
    /// The option at this index of the filtered list is highlighted.
    At(usize),
}

/// Tracks the highlighted index of the filtered option list.
#[derive(Debug, Clone, Default)]
pub struct TypeaheadPointer {
    state: PointerState,
    selectable: Selectable,
}

impl TypeaheadPointer {
    /// Create an unset pointer using `selectable` to decide which entries
    /// can be highlighted.
    pub fn new(selectable: Selectable) -> Self {
        Self {
            state: PointerState::Unset,
            selectable,
        }
    }

    /// Current state.
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Highlighted index, if any.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            PointerState::Unset => None,
            PointerState::At(i) => Some(i),
        }
    }

    /// The highlighted option of `list`, if any.
    pub fn current<'a>(&self, list: &'a [Value]) -> Option<&'a Value> {
        self.index().and_then(|i| list.get(i))
    }

    /// Highlight `index` directly, e.g. when the mouse hovers an option.
    ///
    /// Out-of-range or non-selectable indices leave the pointer unchanged.
    pub fn set(&mut self, index: usize, list: &[Value]) -> bool {
        match list.get(index) {
            Some(option) if self.selectable.test(option) => {
                self.move_to(PointerState::At(index));
                true
            }
            _ => false,
        }
    }

    /// Clear the highlight.
    pub fn unset(&mut self) {
        self.move_to(PointerState::Unset);
    }

    /// Move to the next selectable entry after the current one.
    ///
    /// From unset this goes to the first selectable entry. Past the last
    /// selectable entry the pointer stays where it is.
    pub fn advance(&mut self, list: &[Value]) {
        let start = match self.state {
            PointerState::Unset => 0,
            PointerState::At(i) => i + 1,
        };
        if let Some(next) = (start..list.len()).find(|&i| self.selectable.test(&list[i])) {
            self.move_to(PointerState::At(next));
        }
    }

    /// Move to the previous selectable entry before the current one.
    ///
    /// From unset this goes to the first selectable entry. Before the first
    /// selectable entry the pointer stays where it is.
    pub fn retreat(&mut self, list: &[Value]) {
        match self.state {
            PointerState::Unset => self.advance(list),
            PointerState::At(i) => {
                let end = i.min(list.len());
                if let Some(prev) = (0..end).rev().find(|&j| self.selectable.test(&list[j])) {
                    self.move_to(PointerState::At(prev));
                }
            }
        }
    }

    /// Re-point after the filtered list was recomputed.
    ///
    /// Points at the most recently selected option that appears (and is
    /// still selectable) in `list`, looked up by its model value in
    /// `selected_keys`; otherwise at the first selectable entry; otherwise
    /// unset.
    pub fn reset(&mut self, list: &[Value], selected_keys: &[Value], matcher: &Matcher) {
        let selected = selected_keys.iter().rev().find_map(|key| {
            matcher
                .position_by_key(list, key)
                .filter(|&i| self.selectable.test(&list[i]))
        });
        let next = selected.or_else(|| list.iter().position(|o| self.selectable.test(o)));
        self.move_to(next.map_or(PointerState::Unset, PointerState::At));
    }

    fn move_to(&mut self, state: PointerState) {
        if self.state != state {
            tracing::trace!(target: targets::POINTER, from = ?self.state, to = ?state, "pointer moved");
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::LabelRule;
    use crate::reduce::Reducer;
    use serde_json::json;

    fn options() -> Vec<Value> {
        vec![json!("one"), json!("two"), json!("three")]
    }

    fn skip_two() -> TypeaheadPointer {
        TypeaheadPointer::new(Selectable::new(|o| o != &json!("two")))
    }

    #[test]
    fn test_advance_moves_down() {
        let list = options();
        let mut pointer = TypeaheadPointer::default();
        pointer.set(1, &list);
        pointer.advance(&list);
        assert_eq!(pointer.index(), Some(2));
    }

    #[test]
    fn test_retreat_moves_up() {
        let list = options();
        let mut pointer = TypeaheadPointer::default();
        pointer.set(1, &list);
        pointer.retreat(&list);
        assert_eq!(pointer.index(), Some(0));
    }

    #[test]
    fn test_advance_skips_non_selectable() {
        let list = options();
        let mut pointer = skip_two();
        pointer.set(0, &list);
        pointer.advance(&list);
        assert_eq!(pointer.index(), Some(2));
    }

    #[test]
    fn test_retreat_skips_non_selectable() {
        let list = options();
        let mut pointer = skip_two();
        pointer.set(2, &list);
        pointer.retreat(&list);
        assert_eq!(pointer.index(), Some(0));
    }

    #[test]
    fn test_boundaries_are_sticky() {
        let list = options();
        let mut pointer = TypeaheadPointer::default();
        pointer.set(2, &list);
        for _ in 0..3 {
            pointer.advance(&list);
            assert_eq!(pointer.index(), Some(2));
        }
        pointer.set(0, &list);
        for _ in 0..3 {
            pointer.retreat(&list);
            assert_eq!(pointer.index(), Some(0));
        }
    }

    #[test]
    fn test_last_selectable_boundary_with_trailing_disabled() {
        let list = vec![json!("a"), json!("b"), json!("two")];
        let mut pointer = skip_two();
        pointer.set(1, &list);
        pointer.advance(&list);
        pointer.advance(&list);
        assert_eq!(pointer.index(), Some(1));
    }

    #[test]
    fn test_unset_advance_goes_to_first_selectable() {
        let list = vec![json!("two"), json!("one")];
        let mut pointer = skip_two();
        pointer.advance(&list);
        assert_eq!(pointer.index(), Some(1));

        let mut pointer = skip_two();
        pointer.retreat(&list);
        assert_eq!(pointer.index(), Some(1));
    }

    #[test]
    fn test_empty_list_stays_unset() {
        let mut pointer = TypeaheadPointer::default();
        pointer.advance(&[]);
        pointer.retreat(&[]);
        assert_eq!(pointer.state(), PointerState::Unset);
        pointer.reset(&[], &[], &Matcher::default());
        assert_eq!(pointer.state(), PointerState::Unset);
    }

    #[test]
    fn test_set_refuses_non_selectable() {
        let list = options();
        let mut pointer = skip_two();
        assert!(!pointer.set(1, &list));
        assert!(!pointer.set(9, &list));
        assert_eq!(pointer.state(), PointerState::Unset);
    }

    #[test]
    fn test_reset_to_first_selectable() {
        let list = vec![json!("two"), json!("one"), json!("three")];
        let mut pointer = skip_two();
        pointer.reset(&list, &[], &Matcher::default());
        assert_eq!(pointer.index(), Some(1));
    }

    #[test]
    fn test_reset_all_non_selectable_is_unset() {
        let list = vec![json!("two")];
        let mut pointer = skip_two();
        pointer.set_state_for_test(PointerState::At(0));
        pointer.reset(&list, &[], &Matcher::default());
        assert_eq!(pointer.state(), PointerState::Unset);
    }

    #[test]
    fn test_reset_points_at_selected_option() {
        let list = options();
        let mut pointer = TypeaheadPointer::default();
        pointer.reset(&list, &[json!("three")], &Matcher::default());
        assert_eq!(pointer.index(), Some(2));
    }

    #[test]
    fn test_reset_points_at_reduced_selected_option() {
        let list = vec![
            json!({"label": "one", "value": 1}),
            json!({"label": "two", "value": 2}),
            json!({"label": "three", "value": 3}),
        ];
        let matcher = Matcher::new(Reducer::field("value"), LabelRule::default());
        let mut pointer = TypeaheadPointer::default();
        pointer.reset(&list, &[json!(3)], &matcher);
        assert_eq!(pointer.index(), Some(2));
    }

    #[test]
    fn test_reset_skips_selected_that_became_non_selectable() {
        let list = options();
        let mut pointer = skip_two();
        pointer.reset(&list, &[json!("two")], &Matcher::default());
        assert_eq!(pointer.index(), Some(0));
    }

    #[test]
    fn test_current() {
        let list = options();
        let mut pointer = TypeaheadPointer::default();
        assert!(pointer.current(&list).is_none());
        pointer.set(1, &list);
        assert_eq!(pointer.current(&list), Some(&json!("two")));
    }

    impl TypeaheadPointer {
        fn set_state_for_test(&mut self, state: PointerState) {
            self.state = state;
        }
    }
}
