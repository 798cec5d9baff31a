use std::env;

use dotenvy::dotenv;
use folio::{Config, Database, Op, Paginated, RawSelect, Select};
use serde::Serialize;

#[derive(Debug, sqlx::FromRow, Serialize)]
struct Book {
    id: i64,
    title: String,
    author: String,
    year: i64,
}

#[derive(Debug, sqlx::FromRow, Serialize)]
struct AuthorShelf {
    author: String,
    titles: i64,
}

async fn seed(db: &Database) -> Result<(), folio::Error> {
    db.execute(
        "CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            year INTEGER NOT NULL
        )",
    )
    .await?;

    db.execute(
        "INSERT INTO books (id, title, author, year) VALUES
            (1, 'The Left Hand of Darkness', 'Le Guin', 1969),
            (2, 'The Dispossessed', 'Le Guin', 1974),
            (3, 'A Wizard of Earthsea', 'Le Guin', 1968),
            (4, 'Dune', 'Herbert', 1965),
            (5, 'Dune Messiah', 'Herbert', 1969),
            (6, 'The Third Policeman', 'O''Brien', 1967),
            (7, 'At Swim-Two-Birds', 'O''Brien', 1939)",
    )
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    // One connection so the demo works against sqlite::memory:
    let db = Database::builder().max_connections(1).connect(&url).await?;
    seed(&db).await?;

    // Structured path: parameterized filters, newest three books
    let page: Paginated<Book> = Config::new()
        .page(1)
        .size(3)
        .order_by(["year DESC"])
        .filter("year", Op::Ge, 1950i64)
        .show_sql(true)
        .paginate(&db, &Select::new("books"))
        .await?;
    println!("recent books:\n{}", serde_json::to_string_pretty(&page)?);

    // Raw path: grouped shelf counts over a caller-supplied from-clause
    let shelves: Paginated<AuthorShelf> = Config::new()
        .size(10)
        .group_by(["b.author"])
        .order_by(["titles DESC"])
        .paginate_raw(
            &db,
            &RawSelect::new("b.author, COUNT(*) AS titles", "books b"),
        )
        .await?;
    println!("shelves:\n{}", serde_json::to_string_pretty(&shelves)?);

    Ok(())
}
