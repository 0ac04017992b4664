pub(crate) mod controls;
pub(crate) mod opts;
pub(crate) mod studio;
