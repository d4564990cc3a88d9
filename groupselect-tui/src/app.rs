//! The page: one dropdown on a document, driven by terminal events.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use groupselect::{Catalog, Document, Dropdown, EventTick, KeyDown, PointerDown, SelectionMode, Shared};

use crate::config::Config;
use crate::input::{button_from, key_from, modifiers_from};
use crate::layout::{self, Frame};

/// Root element id of the dropdown on the page.
pub const DROPDOWN_ID: &str = "food";

/// What the event loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    document: Document,
    dropdown: Dropdown,
    /// Last value reported by the dropdown's change handler
    last_change: Shared<Option<String>>,
    tick: EventTick,
    size: (u16, u16),
    frame: Frame,
}

impl App {
    pub fn new(config: &Config, catalog: Catalog, size: (u16, u16)) -> Self {
        let document = Document::new();
        let last_change: Shared<Option<String>> = Shared::default();

        let builder = Dropdown::builder(catalog)
            .id(DROPDOWN_ID)
            .placeholder(config.placeholder.clone());

        let dropdown = if config.controlled {
            // The page owns the value and writes it back on change
            let value = Shared::new(config.default_value.clone());
            let writer = value.clone();
            let changes = last_change.clone();
            builder.build_controlled(&document, value, move |v| {
                writer.set(Some(v.to_string()));
                changes.set(Some(v.to_string()));
            })
        } else {
            let changes = last_change.clone();
            let builder = match &config.default_value {
                Some(value) => builder.default_value(value.clone()),
                None => builder,
            };
            builder
                .on_change(move |v| changes.set(Some(v.to_string())))
                .build_uncontrolled(&document)
        };

        log::info!(
            "App::new dropdown={} mode={:?} selected={:?}",
            DROPDOWN_ID,
            dropdown.mode(),
            dropdown.selected_value()
        );

        let frame = layout::layout(&dropdown.render(), "", size.0, size.1);
        let mut app = Self {
            document,
            dropdown,
            last_change,
            tick: EventTick::default(),
            size,
            frame,
        };
        app.relayout();
        app
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn last_change(&self) -> Option<String> {
        self.last_change.get()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn status(&self) -> String {
        let mode = match self.dropdown.mode() {
            SelectionMode::Controlled => "controlled",
            SelectionMode::Uncontrolled => "uncontrolled",
        };
        format!(
            " {} | selected: {} | last change: {} | listeners: {} | q quits",
            mode,
            self.dropdown.selected_value().as_deref().unwrap_or("-"),
            self.last_change().as_deref().unwrap_or("-"),
            self.document.listener_count()
        )
    }

    fn relayout(&mut self) {
        let status = self.status();
        self.frame = layout::layout(&self.dropdown.render(), &status, self.size.0, self.size.1);
        self.dropdown.clear_dirty();
    }

    fn next_tick(&mut self) -> EventTick {
        self.tick = self.tick.next();
        self.tick
    }

    /// Handle one terminal event.
    ///
    /// Keys go to the focused dropdown first and then to the document.
    /// A pointer-down goes to the document first and then, as a click, to
    /// the element under the pointer.
    pub fn handle(&mut self, event: &CrosstermEvent) -> Control {
        match event {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    return Control::Continue;
                }
                let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
                match key_event.code {
                    KeyCode::Char('q') if !ctrl => return Control::Quit,
                    KeyCode::Char('c') if ctrl => return Control::Quit,
                    _ => {}
                }
                let Some(key) = key_from(key_event.code) else {
                    return Control::Continue;
                };
                let tick = self.next_tick();
                let modifiers = modifiers_from(key_event.modifiers);

                let result = self.dropdown.dispatch_key(key, modifiers, tick);
                let ran = self
                    .document
                    .dispatch_key_down(&KeyDown::new(tick, key).with_modifiers(modifiers));
                log::debug!("App key={:?} tick={:?} result={:?} document_listeners={}", key, tick, result, ran);
            }
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(button) => {
                    let tick = self.next_tick();
                    let path = layout::hit_path(&self.frame.root, mouse.column, mouse.row);
                    let ev = PointerDown {
                        tick,
                        path,
                        x: mouse.column,
                        y: mouse.row,
                        button: button_from(button),
                    };

                    let ran = self.document.dispatch_pointer_down(&ev);
                    let result = match (ev.button, ev.target()) {
                        (groupselect::MouseButton::Left, Some(target)) => {
                            Some(self.dropdown.dispatch_click(target, tick))
                        }
                        _ => None,
                    };
                    log::debug!(
                        "App pointer-down path={:?} tick={:?} document_listeners={} click={:?}",
                        ev.path,
                        tick,
                        ran,
                        result
                    );
                }
                MouseEventKind::Moved => {
                    let path = layout::hit_path(&self.frame.root, mouse.column, mouse.row);
                    if let Some(target) = path.last() {
                        self.dropdown.dispatch_hover(target);
                    }
                }
                _ => {}
            },
            CrosstermEvent::Resize(width, height) => {
                self.size = (*width, *height);
            }
            _ => {}
        }

        self.relayout();
        Control::Continue
    }

    /// Tear the page down, releasing any document listeners.
    pub fn shutdown(&self) {
        self.dropdown.unmount();
        log::info!(
            "App::shutdown listeners_left={}",
            self.document.listener_count()
        );
    }
}
