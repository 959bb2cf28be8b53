mod common;

mod templates;
