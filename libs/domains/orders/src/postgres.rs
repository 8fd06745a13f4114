use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, page_value};
use domain_addresses::Address;
use sea_orm::{DbBackend, FromQueryResult, Statement, Value};
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{
    NewOrder, NewOrderItem, Order, OrderAddress, OrderFilter, OrderItem, OrderStatus, OrderSummary,
};
use crate::repository::OrderRepository;

const ORDER_COLUMNS: &str = "id, user_id, address_id, total_price, status, created_at, updated_at";
const ITEM_COLUMNS: &str =
    "id, order_id, product_id, quantity, price, sub_total, created_at, updated_at";
const ORDER_ADDRESS_COLUMNS: &str =
    "id, order_id, address_id, address_line, city, state, postal_code, phone";

fn stmt(sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

fn parse_status(raw: &str, order_id: Uuid) -> Result<OrderStatus, DbErr> {
    raw.parse()
        .map_err(|_| DbErr::Type(format!("unknown status '{}' for order {}", raw, order_id)))
}

#[derive(Debug, FromQueryResult)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    address_id: Uuid,
    total_price: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DbErr;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            status: parse_status(&row.status, row.id)?,
            id: row.id,
            user_id: row.user_id,
            address_id: row.address_id,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    id: Uuid,
    email: String,
    full_name: String,
    total_price: f64,
    phone: String,
    city: String,
    state: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SummaryRow> for OrderSummary {
    type Error = DbErr;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        Ok(OrderSummary {
            status: parse_status(&row.status, row.id)?,
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            total_price: row.total_price,
            phone: row.phone,
            city: row.city,
            state: row.state,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

async fn fetch_order<C: ConnectionTrait>(conn: &C, statement: Statement) -> OrderResult<Option<Order>> {
    let row = OrderRow::find_by_statement(statement).one(conn).await?;
    Ok(row.map(Order::try_from).transpose()?)
}

/// Listing query. Filters are optional and bound; paging is always bound.
fn list_statement(filter: &OrderFilter) -> Result<Statement, DbErr> {
    let mut values: Vec<Value> = Vec::with_capacity(4);
    let mut conditions = Vec::new();

    if let Some(status) = filter.status {
        values.push(status.to_string().into());
        conditions.push(format!("o.status = ${}", values.len()));
    }
    if let Some(user_id) = filter.user_id {
        values.push(user_id.into());
        conditions.push(format!("o.user_id = ${}", values.len()));
    }

    let mut sql = String::from(
        "SELECT o.id, u.email, u.full_name, o.total_price, oa.phone, oa.city, oa.state, \
         o.status, o.created_at, o.updated_at \
         FROM orders o \
         JOIN users u ON u.id = o.user_id \
         JOIN order_addresses oa ON oa.order_id = o.id",
    );
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    values.push(page_value(filter.limit)?);
    sql.push_str(&format!(" ORDER BY o.created_at DESC, o.id DESC LIMIT ${}", values.len()));
    values.push(page_value(filter.offset)?);
    sql.push_str(&format!(" OFFSET ${}", values.len()));

    Ok(stmt(&sql, values))
}

#[derive(Clone)]
pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert_order_in(&self, txn: &DatabaseTransaction, order: NewOrder) -> OrderResult<Order> {
        let sql = format!(
            "INSERT INTO orders (id, user_id, address_id, total_price, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            ORDER_COLUMNS
        );
        fetch_order(
            txn,
            stmt(
                &sql,
                vec![
                    order.id.into(),
                    order.user_id.into(),
                    order.address_id.into(),
                    order.total_price.into(),
                    OrderStatus::Pending.to_string().into(),
                ],
            ),
        )
        .await?
        .ok_or_else(|| DbErr::RecordNotInserted.into())
    }

    async fn insert_address_in(
        &self,
        txn: &DatabaseTransaction,
        order_id: Uuid,
        address: Address,
    ) -> OrderResult<OrderAddress> {
        let sql = format!(
            "INSERT INTO order_addresses \
             (id, order_id, address_id, address_line, city, state, postal_code, phone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            ORDER_ADDRESS_COLUMNS
        );
        let snapshot = OrderAddress::find_by_statement(stmt(
            &sql,
            vec![
                Uuid::now_v7().into(),
                order_id.into(),
                address.id.into(),
                address.address_line.into(),
                address.city.into(),
                address.state.into(),
                address.postal_code.into(),
                address.phone.into(),
            ],
        ))
        .one(txn)
        .await?
        .ok_or(DbErr::RecordNotInserted)?;
        Ok(snapshot)
    }

    async fn insert_items_in(
        &self,
        txn: &DatabaseTransaction,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> OrderResult<Vec<OrderItem>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut values: Vec<Value> = vec![order_id.into()];
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let sub_total = item.sub_total();
            let first = values.len() + 1;
            values.push(Uuid::now_v7().into());
            values.push(item.product_id.into());
            values.push(item.quantity.into());
            values.push(item.price.into());
            values.push(sub_total.into());
            rows.push(format!(
                "(${}, $1, ${}, ${}, ${}, ${})",
                first,
                first + 1,
                first + 2,
                first + 3,
                first + 4
            ));
        }

        let sql = format!(
            "INSERT INTO order_items (id, order_id, product_id, quantity, price, sub_total) \
             VALUES {} RETURNING {}",
            rows.join(", "),
            ITEM_COLUMNS
        );
        Ok(OrderItem::find_by_statement(stmt(&sql, values)).all(txn).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let sql = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        fetch_order(&self.db, stmt(&sql, vec![id.into()])).await
    }

    async fn items(&self, order_id: Uuid) -> OrderResult<Vec<OrderItem>> {
        let sql = format!(
            "SELECT {} FROM order_items WHERE order_id = $1 ORDER BY id ASC",
            ITEM_COLUMNS
        );
        Ok(OrderItem::find_by_statement(stmt(&sql, vec![order_id.into()]))
            .all(&self.db)
            .await?)
    }

    async fn address(&self, order_id: Uuid) -> OrderResult<Option<OrderAddress>> {
        let sql = format!(
            "SELECT {} FROM order_addresses WHERE order_id = $1",
            ORDER_ADDRESS_COLUMNS
        );
        Ok(OrderAddress::find_by_statement(stmt(&sql, vec![order_id.into()]))
            .one(&self.db)
            .await?)
    }

    async fn list(&self, filter: OrderFilter) -> OrderResult<Vec<OrderSummary>> {
        let rows = SummaryRow::find_by_statement(list_statement(&filter)?)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(OrderSummary::try_from)
            .collect::<Result<Vec<_>, DbErr>>()?)
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> OrderResult<Option<Order>> {
        let sql = format!(
            "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            ORDER_COLUMNS
        );
        fetch_order(&self.db, stmt(&sql, vec![status.to_string().into(), id.into()])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_listing() {
        let statement = list_statement(&OrderFilter::default()).unwrap();
        assert!(statement.sql.ends_with("ORDER BY o.created_at DESC, o.id DESC LIMIT $1 OFFSET $2"));
        assert!(!statement.sql.contains("WHERE"));
    }

    #[test]
    fn test_filtered_listing_numbers_placeholders() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Paid),
            user_id: Some(Uuid::now_v7()),
            ..Default::default()
        };
        let statement = list_statement(&filter).unwrap();
        assert!(statement.sql.contains("WHERE o.status = $1 AND o.user_id = $2"));
        assert!(statement.sql.ends_with("LIMIT $3 OFFSET $4"));
        assert_eq!(statement.values.unwrap().0.len(), 4);
    }

    #[test]
    fn test_unknown_status_is_a_type_error() {
        let err = parse_status("lost", Uuid::nil()).unwrap_err();
        assert!(matches!(err, DbErr::Type(_)));
    }
}
