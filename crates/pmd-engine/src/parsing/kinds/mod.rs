//! Built-in grammar modules, one per file. Each exposes a `module()`
//! constructor (two for files holding a pair of related modules) returning
//! its [`GrammarModule`](super::registry::GrammarModule) descriptor.

pub mod code_block;
pub mod collapse;
pub mod color;
pub mod empty_line;
pub mod heading;
pub mod inline_code;
pub mod lists;
pub mod notification;
pub mod paragraph;
pub mod raw_text;
pub mod table;
pub mod task_list;
pub mod text_style;
pub mod thematic_break;

pub use code_block::CodeBlock;
pub use collapse::CollapseBlock;
pub use color::Color;
pub use empty_line::EmptyLine;
pub use heading::Heading;
pub use inline_code::InlineCode;
pub use lists::{ListNode, OrderedList, UnorderedList};
pub use notification::{Notification, NotificationShape};
pub use paragraph::Paragraph;
pub use raw_text::{RawSpan, RawText};
pub use table::{Align, Table};
pub use task_list::TaskList;
pub use text_style::TextStyle;
pub use thematic_break::{BreakStyle, ThematicBreak};
