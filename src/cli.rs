use clap::{Parser, Subcommand};
use todoit::view::{PeriodTab, StatusFilter, TagFilter};

#[derive(Parser, Debug)]
#[command(name = "todoit")]
#[command(about = "A dated, tagged todo list with daily, weekly and monthly views", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        nickname: String,
        /// Image data URL used as the profile picture
        #[arg(long)]
        thumbnail: Option<String>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    Add {
        text: String,
        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(short, long, conflicts_with = "no_due")]
        due: Option<String>,
        /// Create the task without a due date
        #[arg(long)]
        no_due: bool,
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Change a task's text, due date or tag
    Edit {
        id: i64,
        #[arg(long)]
        text: Option<String>,
        #[arg(short, long, conflicts_with = "no_due")]
        due: Option<String>,
        #[arg(long)]
        no_due: bool,
        /// New tag; pass an empty string to remove it
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Mark a task done, or open again
    Toggle { id: i64 },
    /// Add or remove a task from favorites
    Fav { id: i64 },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move an open task to another open task's position within its tag group
    Move { id: i64, target: i64 },
    /// Show tasks for a day, week or month
    Show {
        #[arg(short, long)]
        period: Option<PeriodTab>,
        /// Any date inside the period (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        status: Option<StatusFilter>,
        /// Periods to move forward (negative moves back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        shift: i32,
    },
    /// Search all tasks by keyword and tag
    Search {
        #[arg(default_value = "")]
        keyword: String,
        /// `all`, `untagged`, or a tag name
        #[arg(short, long, default_value = "all")]
        tag: TagFilter,
    },
    /// List favorite tasks grouped by tag
    Favorites,
    /// List tags with their colors
    Tags,
    /// Manage tags
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagCommand {
    /// Rename a tag on every task
    Rename { old: String, new: String },
    /// Set a tag's color (default, gray, brown, orange, yellow, green, blue, purple, pink, red)
    Color { tag: String, color: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from([
            "todoit", "show", "--period", "weekly", "--status", "in-progress", "--shift", "-2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Show {
                period,
                status,
                shift,
                date,
            }) => {
                assert_eq!(period, Some(PeriodTab::Weekly));
                assert_eq!(status, Some(StatusFilter::InProgress));
                assert_eq!(shift, -2);
                assert_eq!(date, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_tag() {
        let cli = Cli::try_parse_from(["todoit", "search", "report", "--tag", "untagged"]).unwrap();
        match cli.command {
            Some(Commands::Search { keyword, tag }) => {
                assert_eq!(keyword, "report");
                assert_eq!(tag, TagFilter::Untagged);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_due_conflicts_with_no_due() {
        let result =
            Cli::try_parse_from(["todoit", "add", "x", "--due", "2024-03-15", "--no-due"]);
        assert!(result.is_err());
    }
}
