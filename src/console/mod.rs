//! Interactive command console
//!
//! A thin text front end over the storage engine:
//! - create / show / destroy / all / count / update / help / quit
//! - `ClassName.method(args)` dotted calls, rewritten before dispatch
//! - fixed `** ... **` diagnostics for every user error

mod diagnostics;
mod errors;
mod interpreter;
mod parse;
mod rewrite;

pub use diagnostics::Diagnostic;
pub use errors::{ConsoleError, ConsoleResult};
pub use interpreter::{Console, Flow, DEFAULT_PROMPT};
pub use parse::{literal_value, parse_update, UpdateArgs};
pub use rewrite::{rewrite, Rewrite};
