pub(crate) mod match_output;
pub(crate) mod model;
pub(crate) mod validate;
