//! Main TUI application state and logic

use crate::errors::Result;
use crate::memory::{materialize, Address, Heap, Slot};
use crate::render::order_by_pinned;
use crate::report::Summary;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// How far PageUp/PageDown move the selection
const PAGE_JUMP: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Pages,
    Slots,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Pages => FocusedPane::Slots,
            FocusedPane::Slots => FocusedPane::Pages,
        }
    }
}

/// A page with its slots laid out, ready to draw
#[derive(Debug, Clone)]
pub struct PageView {
    pub base: Address,
    pub start: Address,
    pub capacity: usize,
    pub occupied: usize,
    pub pinned: usize,
    pub slots: Vec<Slot>,
}

/// The main application state
pub struct App {
    /// Pages in slot map order (most pinned first)
    pub pages: Vec<PageView>,

    /// Heap-wide statistics
    pub summary: Summary,

    /// Index into `pages` of the selected page
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub page_scroll: usize,
    pub slot_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over a reconstructed heap
    ///
    /// Every page is materialized up front, so an inconsistent heap fails here
    /// before the terminal is touched.
    pub fn new(heap: &Heap, summary: Summary) -> Result<Self> {
        let pages = order_by_pinned(heap)
            .into_iter()
            .map(|page| -> Result<PageView> {
                Ok(PageView {
                    base: page.base(),
                    start: page.start(),
                    capacity: page.capacity(),
                    occupied: page.occupied_count(),
                    pinned: page.pinned_count(),
                    slots: materialize(page)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(App {
            pages,
            summary,
            selected: 0,
            focused_pane: FocusedPane::Pages,
            page_scroll: 0,
            slot_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        })
    }

    /// The selected page, if the heap has any
    pub fn selected_page(&self) -> Option<&PageView> {
        self.pages.get(self.selected)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        super::panes::render_pages_pane(
            frame,
            columns[0],
            &self.pages,
            self.selected,
            self.focused_pane == FocusedPane::Pages,
            &mut self.page_scroll,
        );

        super::panes::render_slots_pane(
            frame,
            columns[1],
            self.pages.get(self.selected),
            self.focused_pane == FocusedPane::Slots,
            &mut self.slot_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            &self.summary,
        );
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Pages => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Slots => {
                    self.slot_scroll = self.slot_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Pages => self.select(self.selected.saturating_add(1)),
                FocusedPane::Slots => {
                    self.slot_scroll = self.slot_scroll.saturating_add(1);
                }
            },
            KeyCode::PageUp => self.select(self.selected.saturating_sub(PAGE_JUMP)),
            KeyCode::PageDown => self.select(self.selected.saturating_add(PAGE_JUMP)),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
    }

    /// Select a page, clamped to the page list
    fn select(&mut self, index: usize) {
        if self.pages.is_empty() {
            self.status_message = "Heap has no pages".to_string();
            return;
        }

        let index = index.min(self.pages.len() - 1);
        if index != self.selected {
            self.slot_scroll = 0;
        }
        self.selected = index;

        let page = &self.pages[index];
        self.status_message = format!(
            "Page 0x{:x}: {}/{} slots used, {} pinned",
            page.base, page.occupied, page.capacity, page.pinned
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Record;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn sample_app() -> App {
        let mut heap = Heap::default();
        heap.ingest(Record::new(0x4010, false, "OBJECT")).unwrap();
        heap.ingest(Record::new(0x8020, true, "OBJECT")).unwrap();
        heap.ingest(Record::new(0xc008, false, "OBJECT")).unwrap();
        let summary = Summary::from_heap(&heap);
        App::new(&heap, summary).unwrap()
    }

    #[test]
    fn test_pages_follow_slot_map_order() {
        let app = sample_app();
        let bases: Vec<_> = app.pages.iter().map(|p| p.base).collect();
        assert_eq!(bases, vec![0x8000, 0x4000, 0xc000]);
        assert_eq!(app.pages[0].slots.len(), app.pages[0].capacity);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected, 2);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_page().unwrap().base, 0xc000);
    }

    #[test]
    fn test_tab_switches_scroll_target() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Slots);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.slot_scroll, 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_inconsistent_heap_fails_before_tui() {
        let mut heap = Heap::default();
        heap.ingest(Record::new(0x4011, false, "OBJECT")).unwrap();
        let summary = Summary::from_heap(&heap);
        assert!(App::new(&heap, summary).is_err());
    }
}
