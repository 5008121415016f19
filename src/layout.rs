use fltk::{
    button::{Button, CheckButton},
    enums::{Align, Font},
    frame::Frame,
    group::Flex,
    input::Input,
    menu::Choice,
    prelude::*,
    valuator::HorNiceSlider,
    window::Window,
};

use crate::app_state::NO_SOUND;
use crate::data::INCREMENT_MINUTES;
use crate::ui::theme;
use crate::ui::tooltips::set_tooltip;
use crate::validation::attach_time_validation;

// ─── Window Layout Constants ────────────────────────────────────────────────────
pub const WIN_W: i32 = 420;
pub const WIN_H: i32 = 420;
const ROW_H: i32 = 30;
const HEADER_H: i32 = 18;
const TIME_H: i32 = 64;

// ─── Widgets struct ─────────────────────────────────────────────────────────────
// Holds cloneable handles to every widget that callbacks need to access.

pub struct Widgets {
    pub input_time: Input,
    pub btn_start: Button,
    pub btn_stop: Button,
    pub btn_clear: Button,
    pub btn_increments: Vec<Button>,
    pub check_show_clock: CheckButton,
    pub btn_font: Button,
    pub btn_color: Button,
    pub sound_choice: Choice,
    pub btn_add_sound: Button,
    pub btn_remove_sound: Button,
    pub slider_volume: HorNiceSlider,
    pub lbl_volume: Frame,
    pub status_bar: Frame,
}

fn section_header(parent: &mut Flex, text: &str) {
    let mut lbl = Frame::default().with_label(text);
    lbl.set_label_color(theme::section_header_color());
    lbl.set_label_size(11);
    lbl.set_align(Align::Inside | Align::Left);
    parent.fixed(&lbl, HEADER_H);
}

fn styled_button(label: &str) -> Button {
    let mut btn = Button::default().with_label(label);
    btn.set_color(theme::color(theme::BG_WIDGET));
    btn.set_label_color(theme::color(theme::TEXT_PRIMARY));
    btn
}

// ─── Build UI ───────────────────────────────────────────────────────────────────

pub fn build_ui() -> (Window, Widgets) {
    let mut win = Window::new(100, 100, WIN_W, WIN_H, "Parliament Timer");
    win.set_color(theme::color(theme::BG_DARK));

    let mut root = Flex::default_fill().column();
    root.set_margin(8);
    root.set_pad(4);

    // ════════════════════════════════════════════════════════════════
    //  SECTION: Timer
    // ════════════════════════════════════════════════════════════════

    section_header(&mut root, "TIMER");

    let mut input_time = Input::default();
    input_time.set_text_font(Font::CourierBold);
    input_time.set_text_size(44);
    input_time.set_value("00:00");
    input_time.set_trigger(fltk::enums::CallbackTrigger::EnterKeyAlways);
    attach_time_validation(&mut input_time);
    set_tooltip(&mut input_time, "Remaining time as mm:ss.\nType a value and press Enter.");
    root.fixed(&input_time, TIME_H);

    let mut transport = Flex::default().row();
    transport.set_pad(4);
    let mut btn_start = styled_button("Start");
    btn_start.set_label_color(theme::color(theme::ACCENT_GREEN));
    let mut btn_stop = styled_button("Stop");
    btn_stop.set_label_color(theme::color(theme::ACCENT_RED));
    let mut btn_clear = styled_button("Clear");
    set_tooltip(&mut btn_clear, "Reset to 00:00. Sounds the alert if the countdown is running.");
    transport.end();
    root.fixed(&transport, ROW_H);

    let mut increments_row = Flex::default().row();
    increments_row.set_pad(4);
    let btn_increments: Vec<Button> = INCREMENT_MINUTES
        .iter()
        .map(|m| {
            let mut btn = styled_button(&format!("+{m}"));
            set_tooltip(&mut btn, &format!("Add {m} minute(s), up to 59:59."));
            btn
        })
        .collect();
    increments_row.end();
    root.fixed(&increments_row, ROW_H);

    // ════════════════════════════════════════════════════════════════
    //  SECTION: Clock overlay
    // ════════════════════════════════════════════════════════════════

    section_header(&mut root, "CLOCK");

    let mut clock_row = Flex::default().row();
    clock_row.set_pad(4);
    let mut check_show_clock = CheckButton::default().with_label("Show clock");
    set_tooltip(&mut check_show_clock, "Show the always-on-top clock.\nDrag it with the left mouse button.");
    let btn_font = styled_button("Font...");
    let btn_color = styled_button("Color...");
    clock_row.end();
    root.fixed(&clock_row, ROW_H);

    // ════════════════════════════════════════════════════════════════
    //  SECTION: Sound
    // ════════════════════════════════════════════════════════════════

    section_header(&mut root, "SOUND");

    let mut sound_choice = Choice::default();
    sound_choice.add_choice(NO_SOUND);
    sound_choice.set_value(0);
    set_tooltip(&mut sound_choice, "Played when the countdown reaches 00:00.");
    root.fixed(&sound_choice, ROW_H);

    let mut sound_row = Flex::default().row();
    sound_row.set_pad(4);
    let mut btn_add_sound = styled_button("Add...");
    set_tooltip(&mut btn_add_sound, "Copy a .wav file into the sound folder.");
    let mut btn_remove_sound = styled_button("Remove");
    set_tooltip(&mut btn_remove_sound, "Delete the selected sound from the sound folder.");
    sound_row.end();
    root.fixed(&sound_row, ROW_H);

    let mut volume_row = Flex::default().row();
    let mut lbl_volume = Frame::default().with_label("Volume: 50%");
    lbl_volume.set_align(Align::Inside | Align::Left);
    volume_row.fixed(&lbl_volume, 100);
    let mut slider_volume = HorNiceSlider::default();
    slider_volume.set_range(0.0, 100.0);
    slider_volume.set_step(1.0, 1);
    slider_volume.set_value(50.0);
    volume_row.end();
    root.fixed(&volume_row, ROW_H);

    // ── Status ──
    Frame::default();
    let mut status_bar = Frame::default().with_label("Ready");
    status_bar.set_label_size(11);
    status_bar.set_label_color(theme::color(theme::TEXT_DISABLED));
    status_bar.set_align(Align::Inside | Align::Left);
    root.fixed(&status_bar, 20);

    root.end();
    win.end();

    let widgets = Widgets {
        input_time,
        btn_start,
        btn_stop,
        btn_clear,
        btn_increments,
        check_show_clock,
        btn_font,
        btn_color,
        sound_choice,
        btn_add_sound,
        btn_remove_sound,
        slider_volume,
        lbl_volume,
        status_bar,
    };

    (win, widgets)
}
