//! Cart item endpoints

pub(crate) mod handlers;
