//! Boxed terminal rendering of a hardware snapshot.

use unicode_width::UnicodeWidthStr;

use crate::hardware::types::{HardwareSnapshot, StorageReport};

const HEADER: &str = "System Hardware Information";
const RESET: &str = "\x1b[0m";
const WRAP_WIDTH: usize = 48;
const MIN_BOX_WIDTH: usize = 30;
const STORAGE_TILES_PER_ROW: usize = 3;

/// Section title colors
const PALETTE: [(&str, &str); 5] = [
    ("CPU", "#1abc9c"),
    ("Motherboard", "#3498db"),
    ("RAM", "#9b59b6"),
    ("GPU", "#e74c3c"),
    ("Storage", "#f1c40f"),
];

pub fn hex_to_ansi(color: &str) -> String {
    if color.starts_with('#') && color.len() == 7 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&color[1..3], 16),
            u8::from_str_radix(&color[3..5], 16),
            u8::from_str_radix(&color[5..7], 16),
        ) {
            return format!("\x1b[38;2;{};{};{}m", r, g, b);
        }
    }
    RESET.to_string()
}

fn title_color(title: &str) -> Option<&'static str> {
    PALETTE.iter().find(|(name, _)| *name == title).map(|(_, hex)| *hex)
}

/// A rendered box. Every line has the same visible width.
struct Block {
    lines: Vec<String>,
    width: usize,
}

fn render_box(title: &str, content: &[String], color: bool) -> Block {
    let inner = content
        .iter()
        .map(|line| UnicodeWidthStr::width(line.as_str()))
        .chain(std::iter::once(UnicodeWidthStr::width(title) + 2))
        .max()
        .unwrap_or(0)
        .max(MIN_BOX_WIDTH);

    let shown_title = match (color, title_color(title)) {
        (true, Some(hex)) => format!("{}{}{}", hex_to_ansi(hex), title, RESET),
        _ => title.to_string(),
    };
    let title_width = UnicodeWidthStr::width(title);

    let mut lines = Vec::with_capacity(content.len() + 2);
    lines.push(format!(
        "╭─ {} {}╮",
        shown_title,
        "─".repeat(inner - title_width - 1)
    ));
    for line in content {
        let pad = inner - UnicodeWidthStr::width(line.as_str());
        lines.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    lines.push(format!("╰{}╯", "─".repeat(inner + 2)));

    Block { lines, width: inner + 4 }
}

fn side_by_side(blocks: &[Block]) -> Vec<String> {
    let height = blocks.iter().map(|b| b.lines.len()).max().unwrap_or(0);
    (0..height)
        .map(|row| {
            blocks
                .iter()
                .map(|block| match block.lines.get(row) {
                    Some(line) => line.clone(),
                    None => " ".repeat(block.width),
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

/// Greedy word wrap on display width.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = UnicodeWidthStr::width(current.as_str())
                + UnicodeWidthStr::width(word)
                + usize::from(!current.is_empty());
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

/// Wraps `text` behind a bullet; continuation lines line up under the text.
fn bullet(text: &str, width: usize) -> Vec<String> {
    wrap(text, width.saturating_sub(2))
        .into_iter()
        .enumerate()
        .map(|(i, line)| if i == 0 { format!("• {}", line) } else { format!("  {}", line) })
        .collect()
}

fn storage_block(storage: &StorageReport, color: bool) -> Block {
    // A failure is a single tile, so it gets the full width
    let tile_width = match storage {
        StorageReport::Devices(_) => MIN_BOX_WIDTH,
        StorageReport::Failed(_) => WRAP_WIDTH,
    };
    let tiles: Vec<Block> = storage
        .display_entries()
        .into_iter()
        .map(|(name, info)| render_box(&name, &wrap(&info, tile_width), false))
        .collect();

    let mut content = Vec::new();
    for row in tiles.chunks(STORAGE_TILES_PER_ROW) {
        content.extend(side_by_side(row));
    }
    render_box("Storage", &content, color)
}

pub fn render_snapshot(snapshot: &HardwareSnapshot, color: bool) -> String {
    let cpu = render_box("CPU", &wrap(&snapshot.cpu.to_string(), WRAP_WIDTH), color);
    let motherboard = render_box(
        "Motherboard",
        &wrap(&snapshot.motherboard.to_string(), WRAP_WIDTH),
        color,
    );

    let mut ram_lines = vec![format!("Total: {:.2} GB", snapshot.ram.total_gigabytes)];
    for module in &snapshot.ram.modules {
        ram_lines.extend(bullet(&module.to_string(), WRAP_WIDTH));
    }
    let ram = render_box("RAM", &ram_lines, color);
    let gpu = render_box("GPU", &wrap(&snapshot.gpu.to_string(), WRAP_WIDTH), color);
    let storage = storage_block(&snapshot.storage, color);

    let mut out = Vec::new();
    out.push(HEADER.to_string());
    out.push(String::new());
    out.extend(side_by_side(&[cpu, motherboard]));
    out.extend(side_by_side(&[ram, gpu]));
    out.extend(storage.lines);

    let mut rendered = out.join("\n");
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::types::{
        Collected, CpuInfo, GpuInfo, MediaType, RamInfo, RamModule, Sentinel, StorageDevice,
    };
    use std::collections::BTreeMap;

    fn snapshot() -> HardwareSnapshot {
        let mut devices = BTreeMap::new();
        devices.insert(
            "Samsung SSD 980 PRO 1TB".to_string(),
            StorageDevice { size_gigabytes: 931.51, media_type: MediaType::Ssd },
        );
        devices.insert(
            "ST2000DM008".to_string(),
            StorageDevice { size_gigabytes: 1863.02, media_type: MediaType::Hdd },
        );

        HardwareSnapshot {
            cpu: Collected::Value(CpuInfo {
                brand: "AMD Ryzen 7 5800X".to_string(),
                physical_cores: 8,
                logical_cores: 16,
            }),
            motherboard: Collected::Sentinel(Sentinel::not_found("Motherboard info not found")),
            gpu: Collected::Value(GpuInfo { adapters: vec!["NVIDIA GeForce RTX 3070".to_string()] }),
            ram: RamInfo {
                total_gigabytes: 31.9,
                modules: vec![Collected::Value(RamModule {
                    capacity_gigabytes: 16.0,
                    speed_mhz: Some(3600),
                })],
            },
            storage: StorageReport::Devices(devices),
        }
    }

    #[test]
    fn test_render_contains_every_section() {
        let out = render_snapshot(&snapshot(), false);

        assert!(out.starts_with("System Hardware Information"));
        for title in ["CPU", "Motherboard", "RAM", "GPU", "Storage"] {
            assert!(out.contains(&format!("╭─ {} ", title)), "missing {}", title);
        }
        assert!(out.contains("Cores: 8, Threads: 16"));
        assert!(out.contains("Motherboard info not found"));
        assert!(out.contains("Total: 31.90 GB"));
        assert!(out.contains("Capacity: 16.00 GB, Speed: 3600 MHz"));
        assert!(out.contains("931.51 GB (SSD)"));
        assert!(out.contains("1863.02 GB (HDD)"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_render_storage_error_entry() {
        let mut snap = snapshot();
        snap.storage = StorageReport::Failed(Sentinel::category_failure("Invalid namespace"));

        let out = render_snapshot(&snap, false);
        assert!(out.contains("╭─ Error "));
        assert!(out.contains("Invalid namespace"));
    }

    #[test]
    fn test_storage_error_message_stays_on_one_line() {
        let mut snap = snapshot();
        snap.storage =
            StorageReport::Failed(Sentinel::category_failure("Query failed: Invalid namespace"));

        let out = render_snapshot(&snap, false);
        assert!(out.contains("│ Query failed: Invalid namespace"));
    }

    #[test]
    fn test_wrapped_ram_sentinel_keeps_indent() {
        let mut snap = snapshot();
        snap.ram.modules = vec![Collected::Sentinel(Sentinel::capability_unavailable(
            "Error: SMBIOS tables at /sys/firmware/dmi/tables/DMI is unavailable on this system",
        ))];

        let out = render_snapshot(&snap, false);
        assert!(out.contains("│ • Error: SMBIOS tables at "));
        assert!(out.contains("│   /sys/firmware/dmi/tables/DMI is unavailable on "));
        assert!(out.contains("│   this system "));
        assert!(!out.contains("│ this system"));
    }

    #[test]
    fn test_bullet_indents_continuation() {
        assert_eq!(bullet("one two three", 9), vec!["• one two", "  three"]);
    }

    #[test]
    fn test_color_titles_use_palette() {
        let out = render_snapshot(&snapshot(), true);
        assert!(out.contains("\x1b[38;2;26;188;156mCPU\x1b[0m"));
        assert!(out.contains("\x1b[38;2;241;196;15mStorage\x1b[0m"));
    }

    #[test]
    fn test_box_lines_share_width() {
        let block = render_box("GPU", &["short".to_string(), "a much longer line".to_string()], false);
        let widths: Vec<usize> = block
            .lines
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .collect();
        assert!(widths.iter().all(|w| *w == block.width));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("line\nbreak", 80), vec!["line", "break"]);
        assert_eq!(wrap("", 10), Vec::<String>::new());
    }

    #[test]
    fn test_hex_to_ansi() {
        assert_eq!(hex_to_ansi("#e74c3c"), "\x1b[38;2;231;76;60m");
        assert_eq!(hex_to_ansi("nope"), "\x1b[0m");
    }
}
