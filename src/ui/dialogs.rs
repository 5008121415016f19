use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::{
    app,
    button::Button,
    dialog,
    enums::{Align, FrameType},
    frame::Frame,
    group::{ColorChooser, Flex},
    menu::Choice,
    misc::Spinner,
    prelude::*,
    valuator::HorNiceSlider,
    window::Window,
};

use crate::data::appearance::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::data::{FontFamily, FontSpec, Rgba};
use crate::ui::clock::fltk_font;
use crate::ui::theme;

/// Run a modal window until it is hidden, then free it with its children.
fn run_modal(mut win: Window) {
    win.make_modal(true);
    win.show();
    while win.shown() {
        app::wait();
    }
    Window::delete(win);
}

/// OK / Cancel row. OK stores the value produced by `accept`.
fn ok_cancel_row<T: Copy + 'static>(
    parent: &mut Flex,
    win: &Window,
    result: &Rc<Cell<Option<T>>>,
    accept: impl Fn() -> T + 'static,
) {
    let mut row = Flex::default().row();
    Frame::default();
    let mut btn_ok = Button::default().with_label("OK");
    let mut btn_cancel = Button::default().with_label("Cancel");
    row.fixed(&btn_ok, 80);
    row.fixed(&btn_cancel, 80);
    row.end();
    parent.fixed(&row, 30);

    {
        let mut win = win.clone();
        let result = result.clone();
        btn_ok.set_callback(move |_| {
            result.set(Some(accept()));
            win.hide();
        });
    }
    {
        let mut win = win.clone();
        btn_cancel.set_callback(move |_| win.hide());
    }
}

// ── Font ──

pub fn pick_font(current: FontSpec) -> Option<FontSpec> {
    let mut win = Window::default().with_size(360, 220).with_label("Clock font");
    win.set_color(theme::color(theme::BG_PANEL));

    let mut col = Flex::default_fill().column();
    col.set_margin(10);
    col.set_pad(6);

    let mut family_choice = Choice::default().with_label("Family");
    let names: Vec<&str> = FontFamily::ALL.iter().map(|f| f.name()).collect();
    family_choice.add_choice(&names.join("|"));
    family_choice.set_value(current.family.index() as i32);
    col.fixed(&family_choice, 28);

    let mut size_spinner = Spinner::default().with_label("Size");
    size_spinner.set_range(MIN_FONT_SIZE as f64, MAX_FONT_SIZE as f64);
    size_spinner.set_step(1.0);
    size_spinner.set_value(current.size as f64);
    col.fixed(&size_spinner, 28);

    let mut preview = Frame::default().with_label("12:34");
    preview.set_frame(FrameType::FlatBox);
    preview.set_color(theme::color(theme::CLOCK_BG));
    preview.set_align(Align::Center | Align::Inside | Align::Clip);
    preview.set_label_font(fltk_font(current.family));
    preview.set_label_size(current.size.min(64));

    let result = Rc::new(Cell::new(None));
    {
        let family_choice = family_choice.clone();
        let size_spinner = size_spinner.clone();
        ok_cancel_row(&mut col, &win, &result, move || {
            FontSpec::new(
                FontFamily::from_index(family_choice.value().max(0) as usize),
                size_spinner.value() as i32,
            )
        });
    }
    col.end();
    win.end();

    {
        let mut preview = preview.clone();
        family_choice.set_callback(move |c| {
            preview.set_label_font(fltk_font(FontFamily::from_index(c.value().max(0) as usize)));
            preview.redraw();
        });
    }
    {
        let mut preview = preview.clone();
        size_spinner.set_callback(move |s| {
            // Preview is capped so huge sizes stay readable in the dialog.
            preview.set_label_size((s.value() as i32).min(64));
            preview.redraw();
        });
    }

    run_modal(win);
    result.get()
}

// ── Color ──

pub fn pick_color(current: Rgba) -> Option<Rgba> {
    let mut win = Window::default().with_size(320, 300).with_label("Clock color");
    win.set_color(theme::color(theme::BG_PANEL));

    let mut col = Flex::default_fill().column();
    col.set_margin(10);
    col.set_pad(6);

    let mut chooser = ColorChooser::default();
    // Only fails for out-of-range values, which u8 channels cannot be.
    chooser.set_rgb(current.r, current.g, current.b).ok();

    let mut lbl_alpha = Frame::default().with_label("Opacity");
    lbl_alpha.set_align(Align::Inside | Align::Left);
    col.fixed(&lbl_alpha, 18);

    let mut slider_alpha = HorNiceSlider::default();
    slider_alpha.set_range(0.0, 255.0);
    slider_alpha.set_step(1.0, 1);
    slider_alpha.set_value(current.a as f64);
    col.fixed(&slider_alpha, 22);

    let result = Rc::new(Cell::new(None));
    {
        let chooser = chooser.clone();
        let slider_alpha = slider_alpha.clone();
        ok_cancel_row(&mut col, &win, &result, move || {
            let (r, g, b) = chooser.rgb_color();
            Rgba::new(r, g, b, slider_alpha.value().round().clamp(0.0, 255.0) as u8)
        });
    }
    col.end();
    win.end();

    run_modal(win);
    result.get()
}

// ── Files / messages ──

pub fn pick_wav_file() -> Option<PathBuf> {
    let mut chooser = dialog::NativeFileChooser::new(dialog::NativeFileChooserType::BrowseFile);
    chooser.set_title("Choose a sound file");
    chooser.set_filter("Sounds\t*.wav");
    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        chooser.set_directory(&PathBuf::from(home)).ok();
    }
    chooser.show();

    let filename = chooser.filename();
    if filename.as_os_str().is_empty() {
        None
    } else {
        Some(filename)
    }
}

pub fn confirm(question: &str) -> bool {
    dialog::choice2_default(question, "No", "Yes", "") == Some(1)
}

pub fn error(message: &str) {
    dialog::alert_default(message);
}
