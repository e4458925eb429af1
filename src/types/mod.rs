pub mod draft;
pub mod text_type;
