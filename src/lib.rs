//! # infopress
//!
//! Turns small hand-written `.info` descriptions of a piece of software into
//! markup for a WordPress publishing workflow.
//!
//! # Pipeline
//!
//! ```text
//! configs/*.info ─ parse ─▶ Record ─ render ─▶ fragment ─▶ output/<title>.html
//!                                      │                 └▶ contents/<title>_wordpress.txt
//!                                      └── preview ─▶ previews/<title>_preview.html
//! ```
//!
//! Parsing and rendering are pure functions over in-memory text. Reading and
//! writing files happens once, at the edges, in [`publish`]. Rendering the
//! same record twice yields byte-identical output, so re-running a build is
//! always safe.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | The typed software record and its screenshot and download entries |
//! | [`parse`] | Section-aware `.info` parser with defaulting and a fallback record |
//! | [`render`] | Record → content fragment (`h3`/`p`/`ol` plus short-codes) |
//! | [`preview`] | Fragment → standalone preview page, built with Maud |
//! | [`naming`] | Filename sanitizing and artifact names |
//! | [`config`] | `infopress.toml` loading, merging, and validation |
//! | [`publish`] | Discovery, generation, listing and cleaning of a project |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Never Fail on One Bad File
//!
//! A config that cannot be read still produces a degraded but valid output
//! set from [`record::Record::fallback`]. Batch builds collect write errors
//! per file and keep going.
//!
//! ## Fixed Vocabulary
//!
//! Section and key labels (`[软件信息]`, `标题`, ...) are matched
//! byte-for-byte. Existing config files are written against them, so they
//! are constants, not configuration.
//!
//! ## Short-codes Are Opaque
//!
//! `[insertimg]`, `[downloads]` and `[link]` belong to the publishing theme.
//! They are emitted verbatim with substituted attributes and never
//! interpreted here.

pub mod config;
pub mod naming;
pub mod output;
pub mod parse;
pub mod preview;
pub mod publish;
pub mod record;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
