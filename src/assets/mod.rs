pub(crate) mod color;
pub(crate) mod fonts;
pub(crate) mod palette;
pub(crate) mod text;
