//! Domain subsystems: the tag tree, documents, people, journals, and
//! bibliography formatting.

pub mod bib;
pub mod docs;
pub mod journals;
pub mod people;
pub mod tag_path;
pub mod tags;
