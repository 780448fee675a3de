//! Neon ASCII banner with a vertical gradient (REPI).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Tomato red (#ff6347).
const TOMATO: (u8, u8, u8) = (0xff, 0x63, 0x47);
/// Basil green (#3cb371).
const BASIL: (u8, u8, u8) = (0x3c, 0xb3, 0x71);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn banner_art(text: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(text).map(|figure| figure.to_string()))
        .unwrap_or_else(|| format!("{text}\n"))
}

/// Prints "REPI" in the standard figlet font with a tomato-to-basil gradient,
/// followed by the version.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art("REPI");
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(TOMATO, BASIL, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: BASIL.0,
        g: BASIL.1,
        b: BASIL.2,
    }));
    let _ = out.execute(Print(format!(
        "repi-recipe v{}\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
