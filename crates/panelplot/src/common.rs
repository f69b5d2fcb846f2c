use once_cell::sync::Lazy;
use std::sync::Arc;
use usvg::Tree;

/// Family name of the bundled font, also registered as the generic monospace family
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans Mono";

// Loaded once and only read afterwards, so concurrent renders can share it
static FONT_DB: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(include_bytes!("../assets/fonts/DejaVuSansMono.ttf").to_vec());
    db.load_font_data(include_bytes!("../assets/fonts/DejaVuSansMono-Bold.ttf").to_vec());
    db.load_system_fonts();
    db.set_monospace_family(DEFAULT_FONT_FAMILY);
    Arc::new(db)
});

pub fn prepare_svg_tree(svg_data: &[u8]) -> Result<Tree, String> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONT_DB),
        font_family: DEFAULT_FONT_FAMILY.to_string(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_data(svg_data, &options).map_err(|e| e.to_string())?;
    Ok(tree)
}
