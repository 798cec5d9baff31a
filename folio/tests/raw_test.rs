use folio::{Config, Database, Op, RawSelect};

#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
struct BookRow {
    title: String,
    author: String,
}

#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
struct AuthorCount {
    author: String,
    titles: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
struct TitleRow {
    title: String,
}

async fn seed() -> Result<Database, Box<dyn std::error::Error>> {
    let db = Database::builder().max_connections(1).connect("sqlite::memory:").await?;

    db.execute("CREATE TABLE authors (id INTEGER PRIMARY KEY, name TEXT NOT NULL)").await?;
    db.execute(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            author_id INTEGER NOT NULL,
            year INTEGER NOT NULL
        )",
    )
    .await?;

    db.execute("INSERT INTO authors (id, name) VALUES (1, 'O''Brien'), (2, 'Le Guin'), (3, 'Herbert')").await?;
    db.execute(
        "INSERT INTO books (id, title, author_id, year) VALUES
            (1, 'At Swim-Two-Birds', 1, 1939),
            (2, 'The Third Policeman', 1, 1967),
            (3, 'A Wizard of Earthsea', 2, 1968),
            (4, 'The Dispossessed', 2, 1974),
            (5, 'The Left Hand of Darkness', 2, 1969),
            (6, 'Dune', 3, 1965)",
    )
    .await?;

    Ok(db)
}

fn joined() -> RawSelect {
    RawSelect::new("b.title, a.name AS author", "books b JOIN authors a ON a.id = b.author_id")
}

#[tokio::test]
async fn test_raw_join_pagination() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed().await?;

    let page = Config::new()
        .size(2)
        .order_by(["b.title ASC"])
        .paginate_raw::<_, BookRow>(&db, &joined())
        .await?;

    assert_eq!(page.paginate.total, 6);
    assert_eq!(page.paginate.total_pages, 3);
    assert_eq!(page.paginate.next_page, Some(2));
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].title, "A Wizard of Earthsea");
    assert_eq!(page.data[0].author, "Le Guin");

    let last = Config::new()
        .page(3)
        .size(2)
        .order_by(["b.title ASC"])
        .paginate_raw::<_, BookRow>(&db, &joined())
        .await?;
    assert_eq!(last.paginate.next_page, None);
    assert_eq!(last.paginate.prev_page, Some(2));

    Ok(())
}

#[tokio::test]
async fn test_count_survives_from_inside_a_subquery() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed().await?;

    let raw = RawSelect::new("t.title", "(SELECT * FROM books WHERE year > 1950) t");
    let page = Config::new()
        .size(10)
        .order_by(["t.title ASC"])
        .paginate_raw::<_, TitleRow>(&db, &raw)
        .await?;

    assert_eq!(page.paginate.total, 5);
    assert_eq!(page.data.len(), 5);

    Ok(())
}

#[tokio::test]
async fn test_group_by_counts_rows_not_groups() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed().await?;

    let raw = RawSelect::new(
        "a.name AS author, COUNT(*) AS titles",
        "books b JOIN authors a ON a.id = b.author_id",
    );
    let page = Config::new()
        .size(10)
        .group_by(["a.name"])
        .order_by(["a.name ASC"])
        .paginate_raw::<_, AuthorCount>(&db, &raw)
        .await?;

    // Three grouped rows, but the total counts the rows before grouping
    assert_eq!(page.data.len(), 3);
    assert_eq!(page.paginate.total, 6);
    assert_eq!(page.data[0], AuthorCount { author: "Herbert".to_string(), titles: 1 });
    assert_eq!(page.data[1], AuthorCount { author: "Le Guin".to_string(), titles: 3 });

    Ok(())
}

#[tokio::test]
async fn test_literal_values_are_escaped() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed().await?;

    let page = Config::new()
        .size(10)
        .filter("a.name", Op::Eq, "O'Brien")
        .order_by(["b.year ASC"])
        .paginate_raw::<_, BookRow>(&db, &joined())
        .await?;

    assert_eq!(page.paginate.total, 2);
    assert_eq!(page.data[0].title, "At Swim-Two-Birds");

    Ok(())
}

#[tokio::test]
async fn test_raw_filters_mix_with_comparisons() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed().await?;

    let page = Config::new()
        .size(10)
        .filter("b.year", Op::Ge, 1960i64)
        .filter_raw("a.name <> 'Herbert'")
        .order_by(["b.year ASC"])
        .paginate_raw::<_, BookRow>(&db, &joined())
        .await?;

    assert_eq!(page.paginate.total, 4);
    assert_eq!(page.data[0].title, "The Third Policeman");

    Ok(())
}

#[tokio::test]
async fn test_raw_execution_errors_propagate() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed().await?;

    let result = Config::new()
        .paginate_raw::<_, TitleRow>(&db, &RawSelect::new("*", "missing_table"))
        .await;

    assert!(matches!(result, Err(folio::Error::Database(_))));

    Ok(())
}
