use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
}
