//! Records exchanged with the history store
//!
//! A stored chat is an ordered list of [`message::Message`] records. Each record wraps an
//! optional [`content::MessageContent`], the role-tagged body shared with the rest of the
//! chat tooling. The content model follows the JSON shape the store already holds, so
//! histories written by other clients decode without translation.
pub mod content;
pub mod message;
pub mod role;
