//! Message generation for the delivery surface.
//!
//! # Submodules
//!
//! - [`message`]: Renders article records into one HTML-flavoured text block
//! - [`chunks`]: Splits that block into messages that fit the transport limit
//! - [`delivery`]: Prints the messages for whatever front end reads stdout
//!
//! # Output Shape
//!
//! ```text
//! [10:15] -- First headline <a href="https://www.example.com/news/1">[ Read article ]</a>
//! [10:02] -- Second headline <a href="https://www.example.com/news/2">[ Read article ]</a>
//! ```

pub mod chunks;
pub mod delivery;
pub mod message;
