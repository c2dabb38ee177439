//! Line-protocol parser for the almanac script output.
//!
//! The script emits plain text: a title line, an optional status-bar
//! image, a `---` separator, then menu rows and chart images:
//!
//! ```text
//! Full Moon Day
//! IMAGE-FILE: /tmp/moon.png
//! ---
//! Sunrise 06:12
//! RIGHT:Sunset 18:40
//! IMAGE-FILE: /tmp/chart.png
//! ```

use std::path::PathBuf;

use super::model::{MenuModel, MenuRow, RowAlignment};

/// Line that separates the header (title, status-bar image) from the
/// menu body.
pub const SEPARATOR: &str = "---";
/// Prefix marking a line as an image path.
pub const IMAGE_PREFIX: &str = "IMAGE-FILE: ";
/// Prefix marking a row as right-aligned secondary text.
pub const RIGHT_PREFIX: &str = "RIGHT:";

/// Parse the script's full stdout into a menu model.
///
/// The input is split at the first separator line into a header and a
/// body segment, each with its own rules. Parsing is total: lines that
/// fit nowhere are dropped rather than rejected, so a misbehaving
/// script degrades to a sparse menu instead of an error.
pub fn parse_menu(output: &str) -> MenuModel {
    let lines: Vec<&str> = output.lines().collect();
    let (header, body) = match lines.iter().position(|line| *line == SEPARATOR) {
        Some(index) => (&lines[..index], &lines[index + 1..]),
        None => (&lines[..], &[][..]),
    };

    let mut menu = MenuModel::default();
    parse_header(header, &mut menu);
    parse_body(body, &mut menu);
    menu
}

/// Header rules: the first image line becomes the status-bar image,
/// any further images become charts, the first other line becomes the
/// title, and everything else is ignored.
fn parse_header(lines: &[&str], menu: &mut MenuModel) {
    for line in lines {
        if let Some(path) = image_path(line) {
            if menu.primary_image.is_none() {
                menu.primary_image = Some(path);
            } else {
                menu.chart_images.push(path);
            }
        } else if menu.title.is_none() {
            menu.title = Some((*line).to_string());
        }
    }
}

/// Body rules: image lines become chart images, the first non-image
/// line still claims the title if the header never set one, and every
/// other line becomes a text row.
fn parse_body(lines: &[&str], menu: &mut MenuModel) {
    for line in lines {
        if *line == SEPARATOR {
            continue;
        }
        if let Some(path) = image_path(line) {
            menu.chart_images.push(path);
            continue;
        }
        if menu.title.is_none() {
            menu.title = Some((*line).to_string());
            continue;
        }
        let row = match line.strip_prefix(RIGHT_PREFIX) {
            Some(text) => MenuRow::new(text, RowAlignment::Right),
            None => MenuRow::new(*line, RowAlignment::Left),
        };
        menu.rows.push(row);
    }
}

fn image_path(line: &str) -> Option<PathBuf> {
    line.strip_prefix(IMAGE_PREFIX)
        .map(|rest| PathBuf::from(rest.trim()))
}
