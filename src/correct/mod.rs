pub(crate) mod aspect;
pub(crate) mod batch;
