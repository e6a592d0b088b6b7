//! Cursor and visible-window bookkeeping over a ranked candidate list
//!
//! The visible window is a sliding window of at most `page_size`
//! candidates. Moving the cursor inside the window leaves the window alone;
//! stepping past either edge slides it by exactly one candidate, so the
//! cursor is always visible and the other entries keep their screen order.
//! The cursor stops at both ends of the list; there is no wraparound.

use super::DEFAULT_PAGE_SIZE;
use std::ops::Range;

/// A visible candidate and whether the cursor is on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry<'a> {
    pub text: &'a str,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNavigator {
    candidates: Vec<String>,
    page_size: usize,
    /// Global index of the highlighted candidate
    cursor: usize,
    /// Global index of the first visible candidate
    window_start: usize,
}

impl CandidateNavigator {
    /// Start navigating `candidates` with the first one selected.
    ///
    /// Returns `None` for an empty list: no candidates is the same as no
    /// completion. A `page_size` of zero falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(candidates: Vec<String>, page_size: usize) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }

        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        Some(Self {
            candidates,
            page_size,
            cursor: 0,
            window_start: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false; an empty navigator is never constructed
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// Number of `page_size` pages needed to show every candidate
    pub fn total_pages(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    fn visible_len(&self) -> usize {
        self.page_size.min(self.candidates.len())
    }

    /// Global index range of the visible candidates
    pub fn window(&self) -> Range<usize> {
        self.window_start..self.window_start + self.visible_len()
    }

    /// Advance the cursor; returns false when already on the last candidate
    pub fn move_next(&mut self) -> bool {
        if self.cursor + 1 >= self.candidates.len() {
            return false;
        }

        self.cursor += 1;
        if self.cursor >= self.window().end {
            self.window_start += 1;
        }
        true
    }

    /// Retreat the cursor; returns false when already on the first candidate
    pub fn move_prev(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        if self.cursor < self.window_start {
            self.window_start -= 1;
        }
        true
    }

    /// The visible candidates with the cursor marked
    pub fn current_page(&self) -> Vec<PageEntry<'_>> {
        let window = self.window();
        let start = window.start;

        self.candidates[window]
            .iter()
            .enumerate()
            .map(|(offset, text)| PageEntry {
                text,
                current: start + offset == self.cursor,
            })
            .collect()
    }

    /// The candidate under the cursor
    pub fn select_current(&self) -> &str {
        let index = self.cursor.min(self.candidates.len().saturating_sub(1));
        &self.candidates[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALBUM: &[&str] = &[
        "Aftermath",
        "Liminal Rite",
        "Artificial Brain",
        "The Masquerade",
        "False Light",
        "Phototroph",
        "Hostile Architecture",
        "Ars Moriendi",
        "Elegy",
        "All That Was Promised",
    ];

    fn navigator(items: &[&str], page_size: usize) -> CandidateNavigator {
        CandidateNavigator::new(items.iter().map(|s| s.to_string()).collect(), page_size).unwrap()
    }

    fn page_texts(nav: &CandidateNavigator) -> Vec<&str> {
        nav.current_page().iter().map(|e| e.text).collect()
    }

    fn current_offset(nav: &CandidateNavigator) -> Option<usize> {
        nav.current_page().iter().position(|e| e.current)
    }

    #[test]
    fn test_empty_candidates_produce_no_navigator() {
        assert!(CandidateNavigator::new(Vec::new(), 3).is_none());
    }

    #[test]
    fn test_zero_page_size_uses_default() {
        let nav = navigator(ALBUM, 0);
        assert_eq!(nav.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(nav.current_page().len(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_starts_with_first_candidate_selected() {
        let nav = navigator(ALBUM, 3);
        let page = nav.current_page();

        assert_eq!(page.len(), 3);
        assert!(page[0].current);
        assert_eq!(page[0].text, "Aftermath");
        assert_eq!(nav.total_pages(), 4);
    }

    #[test]
    fn test_moves_within_page_without_changing_it() {
        let mut nav = navigator(ALBUM, 3);

        for i in 0..3 {
            assert_eq!(page_texts(&nav), ALBUM[..3].to_vec());
            assert_eq!(current_offset(&nav), Some(i));
            assert_eq!(nav.select_current(), ALBUM[i]);
            nav.move_next();
        }
    }

    #[test]
    fn test_stepping_past_page_end_slides_window_by_one() {
        let mut nav = navigator(ALBUM, 3);
        for _ in 0..3 {
            nav.move_next();
        }

        assert_eq!(
            page_texts(&nav),
            vec!["Liminal Rite", "Artificial Brain", "The Masquerade"]
        );
        assert_eq!(current_offset(&nav), Some(2));
        assert_eq!(nav.select_current(), "The Masquerade");
    }

    #[test]
    fn test_five_moves_show_fourth_to_sixth() {
        let items = [
            "Warm Bed",
            "Sea of Disease",
            "Heart of the Inferno",
            "Theta",
            "Untitled",
            "Frequency",
            "About Damn Time",
            "Death Wish Blues",
            "For The Jeers",
            "Ocean Of Malice",
        ];
        let mut nav = navigator(&items, 3);
        for _ in 0..5 {
            nav.move_next();
        }

        assert_eq!(page_texts(&nav), vec!["Theta", "Untitled", "Frequency"]);
        assert_eq!(current_offset(&nav), Some(2));
        assert_eq!(nav.current_index(), 5);
    }

    #[test]
    fn test_stepping_before_page_start_slides_window_back() {
        let mut nav = navigator(ALBUM, 3);
        for _ in 0..5 {
            nav.move_next();
        }
        // window is 3..6 with cursor on 5
        nav.move_prev();
        nav.move_prev();
        assert_eq!(current_offset(&nav), Some(0));
        assert_eq!(nav.window(), 3..6);

        nav.move_prev();
        assert_eq!(nav.window(), 2..5);
        assert_eq!(current_offset(&nav), Some(0));
        assert_eq!(nav.select_current(), "Artificial Brain");
        assert_eq!(
            page_texts(&nav),
            vec!["Artificial Brain", "The Masquerade", "False Light"]
        );
    }

    #[test]
    fn test_moves_through_entire_list() {
        let mut nav = navigator(ALBUM, 3);

        for expected in ALBUM {
            assert_eq!(nav.select_current(), *expected);
            nav.move_next();
        }
    }

    #[test]
    fn test_caps_display_when_fewer_candidates_than_page() {
        let mut nav = navigator(&["otherness", "heroine"], 3);

        nav.move_next();
        nav.move_next();
        nav.move_next();

        assert_eq!(nav.select_current(), "heroine");
        let page = nav.current_page();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0], PageEntry { text: "otherness", current: false });
        assert_eq!(page[1], PageEntry { text: "heroine", current: true });
    }

    #[test]
    fn test_moves_back_through_page() {
        let items = ["the hellfire club", "leather wings", "blue velvet"];
        let mut nav = navigator(&items, 3);
        for _ in 0..3 {
            nav.move_next();
        }

        for i in (0..3).rev() {
            let page = nav.current_page();
            assert!(page[i].current);
            assert_eq!(page[i].text, items[i]);
            nav.move_prev();
        }
    }

    #[test]
    fn test_moves_back_through_entire_list() {
        let items: Vec<String> = (0..21).map(|i| format!("track {i}")).collect();
        let mut nav = CandidateNavigator::new(items.clone(), 4).unwrap();
        for _ in 0..items.len() {
            nav.move_next();
        }
        assert_eq!(nav.select_current(), items[items.len() - 1]);

        for expected in items.iter().rev() {
            assert_eq!(nav.select_current(), expected.as_str());
            nav.move_prev();
        }
    }

    #[test]
    fn test_ends_are_no_ops() {
        let mut nav = navigator(&["a", "b", "c"], 2);

        assert!(!nav.move_prev());
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.window(), 0..2);

        assert!(nav.move_next());
        assert!(nav.move_next());
        assert!(!nav.move_next());
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.window(), 1..3);
    }

    #[test]
    fn test_current_page_is_idempotent() {
        let mut nav = navigator(ALBUM, 4);
        nav.move_next();
        nav.move_next();

        assert_eq!(nav.current_page(), nav.current_page());
    }

    #[test]
    fn test_cursor_always_visible() {
        // Deterministic walk mixing both directions
        let moves = "nnnnnpnnpppnnnnnnnnnnnnppppppppppppnpnpnnnnnnnppn";

        for page_size in 1..=6 {
            let mut nav = navigator(ALBUM, page_size);
            for step in moves.chars() {
                match step {
                    'n' => nav.move_next(),
                    _ => nav.move_prev(),
                };
                assert!(nav.current_index() < nav.len());
                assert!(nav.window().contains(&nav.current_index()));
                assert_eq!(
                    nav.current_page().iter().filter(|e| e.current).count(),
                    1
                );
                assert_eq!(nav.current_page().len(), page_size.min(ALBUM.len()));
            }
        }
    }
}
