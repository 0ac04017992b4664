pub(crate) mod entity;
