use crate::filter::Row;
use crossterm::style::{Attribute, Color, ContentStyle};
use std::io::{self, Write};

#[derive(Clone, Copy, PartialEq)]
enum Align {
    Left,
    Right,
}

struct Column {
    title: &'static str,
    align: Align,
    header: ContentStyle,
    cell: ContentStyle,
}

fn style(fg: Color, bg: Option<Color>, bold: bool) -> ContentStyle {
    let mut s = ContentStyle::new();
    s.foreground_color = Some(fg);
    s.background_color = bg;
    if bold {
        s.attributes.set(Attribute::Bold);
    }
    s
}

fn columns(with_flight_id: bool) -> Vec<Column> {
    let plain_header = style(Color::White, Some(Color::DarkCyan), false);
    let plain_cell = style(Color::Black, None, true);
    let mut cols = vec![
        Column {
            title: "#",
            align: Align::Right,
            header: style(Color::DarkGrey, None, true),
            cell: style(Color::DarkGrey, None, true),
        },
        Column {
            title: "Name",
            align: Align::Left,
            header: plain_header,
            cell: style(Color::DarkGrey, None, true),
        },
        Column {
            title: "XC-Points",
            align: Align::Right,
            header: style(Color::White, Some(Color::DarkRed), false),
            cell: style(Color::Red, None, true),
        },
        Column { title: "Takeoff", align: Align::Left, header: plain_header, cell: plain_cell },
        Column { title: "Landing", align: Align::Left, header: plain_header, cell: plain_cell },
    ];
    if with_flight_id {
        cols.push(Column { title: "Flight ID", align: Align::Left, header: plain_header, cell: plain_cell });
    }
    cols
}

/// Renders ranked rows as a borderless, column-aligned table.
pub struct TableRenderer {
    pub color: bool,
    pub flight_id: bool,
}

impl TableRenderer {
    pub fn render<W: Write>(&self, rows: &[Row], out: &mut W) -> io::Result<()> {
        let cols = columns(self.flight_id);
        let headers: Vec<String> = cols.iter().map(|c| c.title.to_uppercase()).collect();
        let cells: Vec<Vec<String>> = rows.iter().map(|r| self.cells(r)).collect();

        let widths: Vec<usize> = (0..cols.len())
            .map(|i| {
                cells
                    .iter()
                    .map(|row| width(&row[i]))
                    .chain(std::iter::once(width(&headers[i])))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_line: Vec<String> = cols
            .iter()
            .zip(&headers)
            .zip(&widths)
            .map(|((col, text), &w)| self.paint(col.header, &center(text, w)))
            .collect();
        writeln!(out, "{}", join(&header_line))?;

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w + 2)).collect();
        writeln!(out, "{}", rule.join("+"))?;

        for row in &cells {
            let line: Vec<String> = cols
                .iter()
                .zip(row)
                .zip(&widths)
                .map(|((col, text), &w)| {
                    let padded = match col.align {
                        Align::Left => format!("{:<w$}", text, w = w),
                        Align::Right => format!("{:>w$}", text, w = w),
                    };
                    self.paint(col.cell, &padded)
                })
                .collect();
            writeln!(out, "{}", join(&line))?;
        }
        out.flush()
    }

    fn cells(&self, row: &Row) -> Vec<String> {
        let mut cells = vec![
            row.rank.to_string(),
            row.pilot.clone(),
            format!("{:.2}", row.points),
            row.takeoff.clone(),
            row.landing.clone(),
        ];
        if self.flight_id {
            cells.push(row.flight_id.clone());
        }
        cells
    }

    fn paint(&self, style: ContentStyle, text: &str) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Display width in characters; `format!` padding counts the same way.
fn width(s: &str) -> usize {
    s.chars().count()
}

fn center(text: &str, w: usize) -> String {
    format!("{:^w$}", text, w = w)
}

/// Pad each cell by one space and separate columns with `|`.
fn join(cells: &[String]) -> String {
    let padded: Vec<String> = cells.iter().map(|c| format!(" {} ", c)).collect();
    padded.join("|").trim_end().to_string()
}
