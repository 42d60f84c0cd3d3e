//! Startup banner: "TUTOR FORGE" in figlet with a gradient, then the served endpoints.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Chalkboard green (#2e7d32).
const CHALK_GREEN: (u8, u8, u8) = (0x2e, 0x7d, 0x32);
/// Pencil yellow (#fbc02d).
const PENCIL_YELLOW: (u8, u8, u8) = (0xfb, 0xc0, 0x2d);

/// What the server is about to serve, for the banner footer.
pub struct BannerInfo<'a> {
    pub address: &'a str,
    pub environment: &'a str,
    pub generator: &'a str,
    pub transcriber: &'a str,
    pub endpoints: &'a [(&'a str, &'a str)],
}

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Footer lines listing address, strategies and endpoints.
pub fn footer_lines(info: &BannerInfo<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("v{}", env!("CARGO_PKG_VERSION")),
        format!("Server running on http://{}", info.address),
        format!("Environment: {}", info.environment),
        format!(
            "Generator: {} | Transcriber: {}",
            info.generator, info.transcriber
        ),
        String::new(),
        "Available endpoints:".to_string(),
    ];
    for (method, path) in info.endpoints {
        lines.push(format!("  {:<5} http://{}{}", method, info.address, path));
    }
    lines
}

/// Prints the figlet title with a gradient, then the footer. Falls back to plain
/// text when the font cannot render.
pub fn print_welcome(info: &BannerInfo<'_>) {
    let mut out = stdout();
    let art = match FIGfont::standard() {
        Ok(font) => font
            .convert("TUTOR FORGE")
            .map(|figure| figure.to_string())
            .unwrap_or_else(|| "TUTOR FORGE".to_string()),
        Err(_) => "TUTOR FORGE".to_string(),
    };
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let _ = out.execute(SetForegroundColor(rgb(lerp_rgb(CHALK_GREEN, PENCIL_YELLOW, t))));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(rgb(PENCIL_YELLOW)));
    for line in footer_lines(info) {
        let _ = out.execute(Print(format!("{}\r\n", line)));
    }
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(CHALK_GREEN, PENCIL_YELLOW, 0.0), CHALK_GREEN);
        assert_eq!(lerp_rgb(CHALK_GREEN, PENCIL_YELLOW, 1.0), PENCIL_YELLOW);
    }

    #[test]
    fn test_footer_lists_endpoints() {
        let info = BannerInfo {
            address: "0.0.0.0:3001",
            environment: "development",
            generator: "mock",
            transcriber: "mock",
            endpoints: &[("GET", "/api/health")],
        };
        let lines = footer_lines(&info);
        assert!(lines.iter().any(|l| l.contains("Generator: mock")));
        assert!(
            lines
                .iter()
                .any(|l| l == "  GET   http://0.0.0.0:3001/api/health")
        );
    }
}
