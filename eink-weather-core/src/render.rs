//! Screen layout for the 250x122 panel. Pixel drawing itself is left to a [`Canvas`].

use crate::{
    view::{PRECIP_SLOTS, View},
    wind_arrow::{ARROW_SCALE, WindArrow},
};

pub const SCREEN_WIDTH: i32 = 250;
pub const SCREEN_HEIGHT: i32 = 122;

/// A pixel position on the panel.
pub type Pixel = (i32, i32);

/// Fonts the layout switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Mono18,
    Mono12,
    Mono10,
    Small,
    Meteo10,
    Meteo8,
}

/// Drawing surface. All coordinates are absolute pixels, colour is always black.
pub trait Canvas {
    fn set_font(&mut self, font: Font);
    /// Width and height of `text` in the current font.
    fn text_size(&self, text: &str) -> (i32, i32);
    /// Draws `text` with its baseline at `y`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str);
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32);
    fn fill_triangle(&mut self, a: Pixel, b: Pixel, c: Pixel);
}

// Left edges of the precipitation grid columns and their icons.
const PRECIP_COLUMNS: [i32; PRECIP_SLOTS] = [43, 85, 127, 169, 211];
const PRECIP_ICON_COLUMNS: [i32; PRECIP_SLOTS] = [61, 103, 145, 187, 229];

/// Places `text` with its top edge at `y` and returns its width.
fn print_text(canvas: &mut dyn Canvas, x: i32, y: i32, text: &str) -> i32 {
    let (width, height) = canvas.text_size(text);
    canvas.draw_text(x, y + height, text);
    width
}

fn print_glyph(canvas: &mut dyn Canvas, x: i32, y: i32, glyph: char) {
    let mut buf = [0u8; 4];
    print_text(canvas, x, y, glyph.encode_utf8(&mut buf));
}

/// Draws the whole main screen.
pub fn render(view: &View, canvas: &mut dyn Canvas) {
    render_header(view, canvas);
    render_weather(view, canvas);
    render_air_quality(view, canvas);
}

pub fn render_header(view: &View, canvas: &mut dyn Canvas) {
    canvas.set_font(Font::Mono10);
    print_text(canvas, 0, -3, &view.location);

    let (datetime_width, _) = canvas.text_size(&view.datetime);
    print_text(canvas, SCREEN_WIDTH - datetime_width - 3, -12, &view.datetime);
    battery_icon(SCREEN_WIDTH - datetime_width - 33, 3, view.battery_percent, canvas);
}

pub fn render_weather(view: &View, canvas: &mut dyn Canvas) {
    canvas.set_font(Font::Meteo10);
    print_glyph(canvas, 2, 21, view.weather_icon);

    canvas.set_font(Font::Small);
    print_text(canvas, 30, 24, &view.weather_desc);

    canvas.set_font(Font::Mono18);
    print_text(canvas, 30, 45, &view.temp_curr);

    canvas.set_font(Font::Meteo8);
    print_glyph(canvas, 78, 48, view.temp_unit);

    canvas.set_font(Font::Small);
    print_text(canvas, 0, 45, &view.temp_high);
    print_text(canvas, 0, 55, &view.temp_low);
    print_text(canvas, 0, 65, &view.temp_feel);

    canvas.set_font(Font::Mono12);
    print_text(canvas, 100, 45, &view.pressure);
    canvas.set_font(Font::Small);
    print_text(canvas, 125, 65, &view.pressure_unit);

    canvas.set_font(Font::Mono12);
    print_text(canvas, 180, 45, &view.wind);
    WindArrow::pointing(view.wind_deg).draw(172, 55, ARROW_SCALE, canvas);
    canvas.set_font(Font::Small);
    print_text(canvas, 183, 65, &view.wind_unit);

    print_text(canvas, 0, 82, &view.precip_time_unit);
    print_text(canvas, 0, 102, &view.precip_unit);
    print_text(canvas, 0, 112, &view.precip_pop_unit);

    for (i, x) in PRECIP_COLUMNS.into_iter().enumerate() {
        print_text(canvas, x, 85, &view.precip_time[i]);
        print_text(canvas, x, 102, &view.precip[i]);
        print_text(canvas, x, 112, &view.precip_pop[i]);
    }

    canvas.set_font(Font::Meteo10);
    for (x, glyph) in PRECIP_ICON_COLUMNS.into_iter().zip(view.precip_icon) {
        print_glyph(canvas, x, 82, glyph);
    }
}

pub fn render_air_quality(view: &View, canvas: &mut dyn Canvas) {
    canvas.set_font(Font::Mono12);
    print_text(canvas, 215, 45, &view.aq_pm25);

    canvas.set_font(Font::Small);
    print_text(canvas, 215, 65, &view.aq_pm25_unit);
}

/// Filled bars for a battery level, or `None` while charging (above 100).
pub fn battery_bars(percent: u32) -> Option<usize> {
    if percent > 100 {
        return None;
    }
    Some([5, 35, 70].iter().filter(|&&threshold| percent > threshold).count())
}

/// Draws the battery outline with its level and returns the icon width.
pub fn battery_icon(x: i32, y: i32, percent: u32, canvas: &mut dyn Canvas) -> i32 {
    const ICON_WIDTH: i32 = 24;
    const ICON_HEIGHT: i32 = 12;
    const BAR_WIDTH: i32 = 6;
    const BAR_HEIGHT: i32 = 8;
    const BAR_MARGIN: i32 = 2;
    const PLUS_WIDTH: i32 = 4;

    canvas.draw_rect(x, y, ICON_WIDTH, ICON_HEIGHT);
    canvas.fill_round_rect(x + ICON_WIDTH - 1, y + 3, PLUS_WIDTH, ICON_HEIGHT - 2 * 3, 2);

    match battery_bars(percent) {
        None => {
            // lightning bolt
            let margin = 2;
            let half_w = ICON_WIDTH / 2;
            let half_h = ICON_HEIGHT / 2;
            canvas.fill_triangle(
                (x - margin + half_w, y + half_h),
                (x - margin + half_w, y + half_h / 2),
                (x + half_w + half_w / 2, y + half_h),
            );
            canvas.fill_triangle(
                (x + margin + half_w, y + half_h),
                (x + margin + half_w, y + half_h + half_h / 2),
                (x + half_w - half_w / 2, y + half_h),
            );
        }
        Some(bars) => {
            for bar in 0..bars as i32 {
                canvas.fill_rect(
                    x + BAR_MARGIN + bar * (BAR_WIDTH + 1),
                    y + BAR_MARGIN,
                    BAR_WIDTH,
                    BAR_HEIGHT,
                );
            }
        }
    }

    ICON_WIDTH + PLUS_WIDTH
}

/// Screen shown while the device waits to be configured over its own access point.
pub fn render_config_mode(network: &str, password: &str, canvas: &mut dyn Canvas) {
    canvas.set_font(Font::Mono18);
    print_text(canvas, 50, 0, "Welcome!");

    canvas.set_font(Font::Small);
    print_text(canvas, 0, 28, "Connect to weather station...");
    print_text(canvas, 0, 40, &format!("SSID: {network}"));
    print_text(canvas, 0, 52, &format!("Pass: {password}"));
}

/// Screen shown while new settings are checked.
pub fn render_validating_mode(canvas: &mut dyn Canvas) {
    canvas.set_font(Font::Mono10);
    print_text(canvas, 35, 0, "Validating");
    print_text(canvas, 35, 18, "configuration...");

    canvas.set_font(Font::Small);
    print_text(canvas, 35, 46, "Please, wait!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Text(i32, i32, String),
        Rect(i32, i32, i32, i32),
        FillRect(i32, i32, i32, i32),
        RoundRect(i32, i32, i32, i32, i32),
        Triangle(Pixel, Pixel, Pixel),
    }

    /// Records drawing calls; every glyph is 6x8 pixels.
    #[derive(Debug, Default)]
    struct RecordingCanvas {
        ops: Vec<Op>,
        font: Option<Font>,
    }

    impl RecordingCanvas {
        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(_, _, text) => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| pred(op)).count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn set_font(&mut self, font: Font) {
            self.font = Some(font);
        }

        fn text_size(&self, text: &str) -> (i32, i32) {
            (6 * text.chars().count() as i32, 8)
        }

        fn draw_text(&mut self, x: i32, y: i32, text: &str) {
            self.ops.push(Op::Text(x, y, text.to_string()));
        }

        fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
            self.ops.push(Op::Rect(x, y, w, h));
        }

        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
            self.ops.push(Op::FillRect(x, y, w, h));
        }

        fn fill_round_rect(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32) {
            self.ops.push(Op::RoundRect(x, y, w, h, radius));
        }

        fn fill_triangle(&mut self, a: Pixel, b: Pixel, c: Pixel) {
            self.ops.push(Op::Triangle(a, b, c));
        }
    }

    #[test]
    fn battery_bars_follow_thresholds() {
        assert_eq!(battery_bars(0), Some(0));
        assert_eq!(battery_bars(5), Some(0));
        assert_eq!(battery_bars(6), Some(1));
        assert_eq!(battery_bars(36), Some(2));
        assert_eq!(battery_bars(71), Some(3));
        assert_eq!(battery_bars(100), Some(3));
        assert_eq!(battery_bars(101), None);
    }

    #[test]
    fn charging_battery_draws_bolt_instead_of_bars() {
        let mut canvas = RecordingCanvas::default();
        let width = battery_icon(10, 3, 120, &mut canvas);
        assert_eq!(width, 28);
        assert_eq!(canvas.count(|op| matches!(op, Op::Triangle(..))), 2);
        assert_eq!(canvas.count(|op| matches!(op, Op::FillRect(..))), 0);
    }

    #[test]
    fn battery_bars_are_spaced() {
        let mut canvas = RecordingCanvas::default();
        battery_icon(0, 0, 50, &mut canvas);
        assert!(canvas.ops.contains(&Op::FillRect(2, 2, 6, 8)));
        assert!(canvas.ops.contains(&Op::FillRect(9, 2, 6, 8)));
        assert_eq!(canvas.count(|op| matches!(op, Op::FillRect(..))), 2);
    }

    #[test]
    fn header_right_aligns_datetime() {
        let view = View { datetime: "12:30 Mo 04/03".to_string(), ..View::default() };
        let mut canvas = RecordingCanvas::default();
        render_header(&view, &mut canvas);

        // 14 chars * 6 px = 84 px wide, 3 px from the right edge, baseline 8 px below the top.
        assert!(canvas.ops.contains(&Op::Text(163, -4, "12:30 Mo 04/03".to_string())));
        assert!(canvas.ops.contains(&Op::Rect(133, 3, 24, 12)));
    }

    #[test]
    fn main_screen_draws_all_fields_and_wind_arrow() {
        let view = View::default();
        let mut canvas = RecordingCanvas::default();
        render(&view, &mut canvas);

        let texts = canvas.texts();
        for expected in ["Unknown", "----", "hPa", "Bft", "PM2.5", "mm", "%", ")", "*"] {
            assert!(texts.contains(&expected), "missing {expected}");
        }
        assert_eq!(texts.iter().filter(|t| **t == "--").count(), 4 + PRECIP_SLOTS);
        assert_eq!(canvas.count(|op| matches!(op, Op::Triangle(..))), 2);
    }

    #[test]
    fn auxiliary_screens_render_text() {
        let mut canvas = RecordingCanvas::default();
        render_config_mode("station-ap", "secret", &mut canvas);
        assert!(canvas.texts().contains(&"SSID: station-ap"));

        let mut canvas = RecordingCanvas::default();
        render_validating_mode(&mut canvas);
        assert_eq!(canvas.font, Some(Font::Small));
        assert!(canvas.texts().contains(&"Please, wait!"));
    }
}
