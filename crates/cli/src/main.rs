mod cli;
mod output;

use anyhow::Context;
use catalog_model::BookPatch;
use catalog_dashboard::{
    view, CatalogApi, Credentials, Dashboard, HttpCatalogClient, Session, SessionStore,
};
use catalog_kernel::settings::Settings;
use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_telemetry::init_cli();

    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;

    run(cli, settings).await
}

async fn run(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    let dashboard_settings = settings.dashboard;
    let api_base = cli
        .api
        .unwrap_or_else(|| dashboard_settings.api_base_url.clone());
    let client = HttpCatalogClient::new(api_base);

    let store = SessionStore::from_settings(&dashboard_settings)?;
    let expected = Credentials::new(dashboard_settings.username, dashboard_settings.password);
    let mut session = Session::open(store, expected)?;

    let command = match cli.command {
        Commands::Login { username, password } => {
            session
                .login(&Credentials::new(username, password), &client)
                .await
                .with_context(|| format!("login against {} failed", client.base_url()))?;
            println!("Logged in.");
            return Ok(());
        }
        Commands::Logout => {
            session.logout()?;
            println!("Logged out.");
            return Ok(());
        }
        Commands::Status => {
            let state = if session.is_logged_in() {
                "logged in"
            } else {
                "logged out"
            };
            println!("{state} (API: {})", client.base_url());
            return Ok(());
        }
        command => command,
    };

    session.require_logged_in()?;
    let mut dashboard = Dashboard::new(client);
    match command {
        Commands::Dashboard => {
            let view = dashboard.load_data().await?;
            print!("{}", output::dashboard(&view));
        }
        Commands::Books { search } => {
            let table = match search {
                Some(query) => {
                    dashboard.load_data().await?;
                    dashboard.search(&query).await?
                }
                None => dashboard.books_table().await?,
            };
            print!("{}", output::book_table(&table));
        }
        Commands::Show { id } => {
            let book = dashboard.api().get_book(id).await?;
            print!("{}", output::book_details(&book));
        }
        Commands::Add(args) => {
            let book = dashboard.save_book(None, BookPatch::from(args)).await?;
            println!("Book {} added.", book.id);
            print!("{}", output::stat_cards(&view::render_stats(dashboard.stats())));
        }
        Commands::Edit(args) => {
            let (id, patch) = args.into_parts();
            let book = dashboard.save_book(Some(id), patch).await?;
            println!("Book {} updated.", book.id);
            print!("{}", output::stat_cards(&view::render_stats(dashboard.stats())));
        }
        Commands::Delete { id } => {
            let book = dashboard.delete_book(id).await?;
            println!("Book {} ({}) deleted.", book.id, book.title());
            print!("{}", output::stat_cards(&view::render_stats(dashboard.stats())));
        }
        Commands::Login { .. } | Commands::Logout | Commands::Status => {}
    }

    Ok(())
}
