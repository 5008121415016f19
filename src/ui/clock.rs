//! The always-on-top clock overlay.
//!
//! A borderless menu-type window holding a single label. Menu windows stay
//! above normal windows and never take keyboard focus. The user drags it
//! around with the left button.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fltk::{
    app, draw,
    enums::{Align, Color, Event, Font, FrameType},
    frame::Frame,
    prelude::*,
    window::MenuWindow,
};

use crate::data::{FontFamily, FontSpec, Rgba};
use crate::ui::theme;

const PAD_X: i32 = 12;
const PAD_Y: i32 = 4;

pub fn fltk_font(family: FontFamily) -> Font {
    match family {
        FontFamily::Helvetica => Font::Helvetica,
        FontFamily::HelveticaBold => Font::HelveticaBold,
        FontFamily::Courier => Font::Courier,
        FontFamily::CourierBold => Font::CourierBold,
        FontFamily::Times => Font::Times,
        FontFamily::TimesBold => Font::TimesBold,
        FontFamily::Screen => Font::Screen,
        FontFamily::ScreenBold => Font::ScreenBold,
    }
}

/// Cloneable handle to the overlay; clones share the same window.
#[derive(Clone)]
pub struct ClockOverlay {
    win: MenuWindow,
    label: Frame,
    text: Rc<RefCell<String>>,
    font: Rc<Cell<FontSpec>>,
}

impl ClockOverlay {
    pub fn new(text: &str, font: FontSpec, color: Rgba, pos: (i32, i32)) -> Self {
        let mut win = MenuWindow::default().with_pos(pos.0, pos.1).with_size(200, 60);
        win.set_border(false);
        win.set_color(theme::color(theme::CLOCK_BG));

        let mut label = Frame::default().with_size(200, 60);
        label.set_frame(FrameType::FlatBox);
        label.set_color(theme::color(theme::CLOCK_BG));
        label.set_align(Align::Center | Align::Inside);
        win.end();

        // Left-button drag moves the window; offset is cursor minus window origin.
        let drag_offset = Rc::new(Cell::new((0, 0)));
        win.handle(move |w, ev| match ev {
            Event::Push if app::event_mouse_button() == app::MouseButton::Left => {
                drag_offset.set((app::event_x_root() - w.x(), app::event_y_root() - w.y()));
                true
            }
            Event::Drag if app::event_mouse_button() == app::MouseButton::Left => {
                let (ox, oy) = drag_offset.get();
                w.set_pos(app::event_x_root() - ox, app::event_y_root() - oy);
                true
            }
            _ => false,
        });

        let mut clock = Self {
            win,
            label,
            text: Rc::new(RefCell::new(String::new())),
            font: Rc::new(Cell::new(font)),
        };
        clock.set_color(color);
        clock.set_font(font);
        clock.set_text(text);
        clock
    }

    pub fn set_text(&mut self, text: &str) {
        if *self.text.borrow() == text {
            return;
        }
        *self.text.borrow_mut() = text.to_string();
        self.label.set_label(text);
        self.fit();
        self.label.redraw();
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font.set(font);
        self.label.set_label_font(fltk_font(font.family));
        self.label.set_label_size(font.size);
        self.fit();
        self.win.redraw();
    }

    /// Alpha is emulated by blending over the overlay background.
    pub fn set_color(&mut self, color: Rgba) {
        let (r, g, b) = color.blend_over(theme::rgb(theme::CLOCK_BG));
        self.label.set_label_color(Color::from_rgb(r, g, b));
        self.label.redraw();
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.win.show();
            self.fit();
        } else {
            self.win.hide();
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.win.x(), self.win.y())
    }

    pub fn close(&mut self) {
        self.win.hide();
    }

    /// Resize the window to hug the current text. Text can only be measured
    /// once the display is open, so hidden overlays are fitted on show.
    fn fit(&mut self) {
        if !self.win.shown() {
            return;
        }
        let font = self.font.get();
        let text = self.text.borrow();
        if text.is_empty() {
            return;
        }
        draw::set_font(fltk_font(font.family), font.size);
        let (tw, th) = draw::measure(&text, false);
        let w = tw + 2 * PAD_X;
        let h = th + 2 * PAD_Y;
        if w != self.win.w() || h != self.win.h() {
            let (x, y) = self.position();
            self.win.resize(x, y, w, h);
            self.label.resize(0, 0, w, h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_maps_to_a_distinct_face() {
        let faces: Vec<Font> = FontFamily::ALL.iter().map(|f| fltk_font(*f)).collect();
        for (i, a) in faces.iter().enumerate() {
            for b in &faces[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
