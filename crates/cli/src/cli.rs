use catalog_model::{BookId, BookPatch, BookStatus, Copies, Field};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Manage the library catalog from the terminal")]
pub struct Cli {
    /// API root; overrides `dashboard.api_base_url`
    #[arg(long, global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the dashboard (checks credentials and that the API answers)
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Close the dashboard
    Logout,
    /// Show whether the dashboard is open
    Status,
    /// Statistics and the most recent books
    Dashboard,
    /// All books, optionally filtered by title, author or category
    Books {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// One book with every stored field
    Show { id: BookId },
    /// Add a book
    Add(AddArgs),
    /// Change fields of a book; fields left out are kept
    Edit(EditArgs),
    /// Remove a book
    Delete { id: BookId },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub category: String,
    #[command(flatten)]
    pub details: DetailArgs,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: BookId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[command(flatten)]
    pub details: DetailArgs,
}

#[derive(Debug, Args)]
pub struct DetailArgs {
    /// Available, Borrowed, or any other label
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub copies: Option<i64>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub pages: Option<u32>,
    /// Publication date, YYYY-MM-DD
    #[arg(long)]
    pub published: Option<NaiveDate>,
}

impl DetailArgs {
    fn into_patch(self, title: Option<String>, author: Option<String>, category: Option<String>) -> BookPatch {
        BookPatch {
            title: title.map(Field::Typed),
            author: author.map(Field::Typed),
            category: category.map(Field::Typed),
            status: self.status.map(BookStatus::from),
            copies: self.copies.map(Copies::new),
            isbn: self.isbn.map(Field::Typed),
            pages: self.pages.map(Field::Typed),
            publication_date: self.published.map(Field::Typed),
            ..BookPatch::default()
        }
    }
}

impl From<AddArgs> for BookPatch {
    fn from(args: AddArgs) -> Self {
        args.details
            .into_patch(Some(args.title), Some(args.author), Some(args.category))
    }
}

impl EditArgs {
    pub fn into_parts(self) -> (BookId, BookPatch) {
        let patch = self.details.into_patch(self.title, self.author, self.category);
        (self.id, patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_builds_a_full_patch() {
        let cli = Cli::parse_from([
            "catalog", "add", "--title", "Dune", "--author", "Frank Herbert", "--category",
            "SF", "--copies", "2", "--published", "1965-08-01",
        ]);
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };

        let patch = BookPatch::from(args);
        assert_eq!(patch.title, Some("Dune".into()));
        assert_eq!(patch.copies, Some(Copies::new(2)));
        assert_eq!(
            patch.publication_date,
            NaiveDate::from_ymd_opt(1965, 8, 1).map(Field::Typed)
        );
        assert_eq!(patch.status, None);
    }

    #[test]
    fn edit_only_carries_given_fields() {
        let cli = Cli::parse_from(["catalog", "edit", "3", "--status", "Borrowed"]);
        let Commands::Edit(args) = cli.command else {
            panic!("expected edit");
        };

        let (id, patch) = args.into_parts();
        assert_eq!(id, 3);
        assert_eq!(
            patch,
            BookPatch {
                status: Some(BookStatus::Borrowed),
                ..BookPatch::default()
            }
        );
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["catalog", "edit", "1", "--published", "yesterday"]).is_err());
    }
}
