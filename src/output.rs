//! Rendering of ranked results as JSON or a fixed-column table.
//!
//! Row order follows the ranked sequence exactly; nothing is re-sorted
//! here. Fields a record does not carry render as the `-` placeholder.

use musicdl_search::Track;

/// Table column headers, human-readable and distinct from field names.
const HEADERS: [&str; 10] = [
    "id",
    "singer",
    "name",
    "album",
    "size",
    "duration",
    "has lyric",
    "format",
    "source",
    "url",
];

/// Serialize the ranked sequence as indented JSON.
///
/// Synthetic fields are included; non-ASCII characters are preserved
/// verbatim. An empty sequence serializes as `[]`.
pub fn render_json(tracks: &[Track]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tracks)
}

/// Render the ranked sequence as an ASCII grid table.
///
/// Every record is projected onto the fixed column set with `-` standing
/// in for absent fields. An empty sequence renders a header-only table.
pub fn render_table(tracks: &[Track]) -> String {
    let rows: Vec<[String; 10]> = tracks.iter().map(row_cells).collect();

    let mut widths: [usize; 10] = [0; 10];
    for (width, header) in widths.iter_mut().zip(HEADERS) {
        *width = header.chars().count();
    }
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = render_border(&widths);
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&render_row(&HEADERS.map(str::to_string), &widths));
    out.push('\n');
    out.push_str(&border);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row, &widths));
        out.push('\n');
    }
    if !rows.is_empty() {
        out.push_str(&border);
        out.push('\n');
    }
    out
}

/// Project one track onto the fixed column set.
fn row_cells(track: &Track) -> [String; 10] {
    [
        cell(track.song_id.as_deref()),
        if track.singers.is_empty() {
            "-".to_string()
        } else {
            track.singers.join(", ")
        },
        cell(track.song_name.as_deref()),
        cell(track.album.as_deref()),
        cell(track.filesize.as_deref()),
        cell(track.duration.as_deref()),
        track.has_lyric.marker().to_string(),
        cell(track.ext.as_deref()),
        cell(Some(&track.source).filter(|s| !s.is_empty()).map(String::as_str)),
        cell(track.download_url.as_deref()),
    ]
}

fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn render_border(widths: &[usize; 10]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn render_row(cells: &[String; 10], widths: &[usize; 10]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line
}
