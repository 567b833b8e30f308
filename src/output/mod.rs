mod format;
mod json;

pub use format::save_page_image;
pub use json::write_data_file;

/// File name for one page image. A single-page atlas drops the index suffix.
pub fn page_png_filename(base_name: &str, index: u32, total: usize) -> String {
    if total <= 1 {
        format!("{}.png", base_name)
    } else {
        format!("{}_{}.png", base_name, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_png_filename() {
        assert_eq!(page_png_filename("ui", 0, 1), "ui.png");
        assert_eq!(page_png_filename("ui", 0, 3), "ui_0.png");
        assert_eq!(page_png_filename("ui", 2, 3), "ui_2.png");
    }
}
