pub mod dedup;
pub mod exec;
pub mod output;
pub mod parse;
pub mod ticket;

pub use dedup::SeenMessages;
pub use exec::{collect_commits, exec, ReportOptions};
pub use output::{output_summary, render_xml, sort_by_date, write_xml, DEFAULT_OUTPUT};
pub use parse::{sum_numstat, LogParser, ParsedCommit};
pub use ticket::related_task_url;
