pub(crate) mod padding;
