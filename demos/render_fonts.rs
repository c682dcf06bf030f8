//! Render sample text in every shipped banner font.
//!
//! Run with: cargo run --example render_fonts

use bannerd_core::{parse_font, render};
use std::fs;

fn main() -> anyhow::Result<()> {
    let mut names = Vec::new();
    for entry in fs::read_dir("fonts")? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();

    println!("{} banner fonts available\n", names.len());

    for name in &names {
        let raw = fs::read_to_string(format!("fonts/{}.txt", name))?;
        let table = parse_font(&raw);
        println!("--- {} ({} glyphs) ---", name, table.len());
        print!("{}", render("Hello!", &table));
        println!();
    }

    Ok(())
}
