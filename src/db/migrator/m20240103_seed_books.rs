use crate::entities::books;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm_migration::sea_query::Query;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (author, launch date, price, title)
const CATALOGUE: [(&str, (i32, u32, u32), f64, &str); 15] = [
    (
        "Michael C. Feathers",
        (2017, 11, 29),
        49.00,
        "Working effectively with legacy code",
    ),
    (
        "Ralph Johnson, Erich Gamma, John Vlissides e Richard Helm",
        (2017, 11, 29),
        45.00,
        "Design Patterns",
    ),
    ("Robert C. Martin", (2009, 1, 10), 77.00, "Clean Code"),
    ("Crockford", (2017, 11, 7), 67.00, "JavaScript"),
    ("Steve McConnell", (2017, 11, 7), 58.00, "Code complete"),
    ("Martin Fowler e Kent Beck", (2017, 11, 7), 88.00, "Refactoring"),
    (
        "Eric Freeman, Elisabeth Freeman, Kathy Sierra, Bert Bates",
        (2017, 11, 7),
        110.00,
        "Head First Design Patterns",
    ),
    ("Eric Evans", (2017, 11, 7), 92.00, "Domain Driven Design"),
    (
        "Brian Goetz e Tim Peierls",
        (2017, 11, 7),
        80.00,
        "Java Concurrency in Practice",
    ),
    ("Susan Cain", (2017, 11, 7), 123.00, "O poder dos quietos"),
    (
        "Roger S. Pressman",
        (2017, 11, 7),
        56.00,
        "Engenharia de Software",
    ),
    (
        "Viktor Mayer-Schonberger e Kenneth Kukier",
        (2017, 11, 7),
        54.00,
        "Big Data",
    ),
    (
        "Richard Hunter e George Westerman",
        (2017, 11, 7),
        95.00,
        "O verdadeiro valor de TI",
    ),
    (
        "Marc J. Schiller",
        (2017, 11, 7),
        45.00,
        "Os 11 segredos de líderes de TI altamente influentes",
    ),
    (
        "Aguinaldo Aragon Fernandes e Vladimir Ferraz de Abreu",
        (2017, 11, 7),
        54.00,
        "Implantando a governança de TI",
    ),
];

fn launch_date((year, month, day): (i32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert()
            .into_table(Books)
            .columns([
                books::Column::Author,
                books::Column::LaunchDate,
                books::Column::Price,
                books::Column::Title,
            ])
            .to_owned();

        for (author, date, price, title) in CATALOGUE {
            insert.values_panic([
                author.into(),
                launch_date(date).into(),
                price.into(),
                title.into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Books).to_owned())
            .await
    }
}
