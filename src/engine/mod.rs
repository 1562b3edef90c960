//! Plan-generation engines: pure logic that turns campaign state into
//! renderable output.

pub mod layout;
