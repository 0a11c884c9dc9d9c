//! Demo host for the interaction engine: the sample portfolio page and
//! the layout standing in for a real rendering pipeline.

pub mod demo;
