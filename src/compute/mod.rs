//! Input validation shared by configuration and index construction.

pub mod validation;
