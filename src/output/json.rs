use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::{Atlas, PlacedRect};
use crate::error::QuiltError;
use crate::output::page_png_filename;

#[derive(Serialize)]
struct JsonOutput {
    meta: Meta,
    pages: Vec<JsonPage>,
    sprites: Vec<JsonSprite>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
}

#[derive(Serialize)]
struct JsonPage {
    image: String,
    size: Size,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct JsonSprite {
    name: String,
    page: u32,
    frame: Frame,
}

#[derive(Serialize)]
struct Frame {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Write the JSON data file mapping every sprite name to its page and frame
pub fn write_data_file(atlas: &Atlas, output_dir: &Path, base_name: &str) -> Result<()> {
    let total = atlas.pages.len();
    let pages = atlas
        .pages
        .iter()
        .map(|page| JsonPage {
            image: page_png_filename(base_name, page.index, total),
            size: Size {
                w: page.width,
                h: page.height,
            },
        })
        .collect();

    let output = JsonOutput {
        meta: Meta {
            app: "quilt",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
        },
        pages,
        sprites: atlas.placements.iter().map(sprite_to_json).collect(),
    };

    let json_path = output_dir.join(format!("{}.json", base_name));
    let content = serde_json::to_string_pretty(&output)?;

    fs::write(&json_path, content).map_err(|e| QuiltError::OutputWrite {
        path: json_path,
        source: e,
    })?;

    Ok(())
}

fn sprite_to_json(placed: &PlacedRect) -> JsonSprite {
    JsonSprite {
        name: placed.name.clone(),
        page: placed.page,
        frame: Frame {
            x: placed.x,
            y: placed.y,
            w: placed.width,
            h: placed.height,
        },
    }
}
