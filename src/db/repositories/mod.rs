pub mod book;
pub mod person;
pub mod user;

use anyhow::Result;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, Order, PaginatorTrait, QueryOrder, Select,
};

use crate::domain::{Page, PageRequest, SortOrder};

const fn order_for(sort: SortOrder) -> Order {
    match sort {
        SortOrder::Ascending => Order::Asc,
        SortOrder::Descending => Order::Desc,
    }
}

/// Runs `query` sorted on `column` and returns the requested page with totals.
async fn fetch_page<E, C>(
    conn: &DatabaseConnection,
    query: Select<E>,
    column: C,
    request: PageRequest,
) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'static,
    C: sea_orm::ColumnTrait,
{
    let paginator = query
        .order_by(column, order_for(request.order))
        .paginate(conn, request.size.max(1));

    let totals = paginator.num_items_and_pages().await?;
    let content = paginator.fetch_page(request.page).await?;

    Ok(Page::new(
        content,
        request,
        totals.number_of_items,
        totals.number_of_pages,
    ))
}
