pub mod canvas;
pub mod contents_json;
pub mod error;
pub mod glyphs;
pub mod icon_gen;
pub mod inspect;
