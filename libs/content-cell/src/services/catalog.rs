//! Plain-row site content: the price list, the history timeline and FAQs.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use shared_models::AppError;
use shared_state::AppState;

use crate::models::{
    CreateFaq, CreatePrice, CreateTimelineItem, Faq, Price, TimelineItem, UpdateFaq, UpdatePrice,
    UpdateTimelineItem,
};

const PRICE_COLUMNS: &str = "id, category, name, amount, description, created_at";
const TIMELINE_COLUMNS: &str = "id, year, title, description, sort_order, created_at";
const FAQ_COLUMNS: &str = "id, question, answer, sort_order, created_at";

pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(state: &AppState) -> Self {
        Self {
            pool: state.pool.clone(),
        }
    }

    async fn delete_row(&self, table: &str, id: Uuid, label: &str) -> Result<(), AppError> {
        let query = format!("DELETE FROM {table} WHERE id = $1");
        let deleted = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{label} not found")));
        }
        info!("{} {} deleted", label, id);
        Ok(())
    }

    pub async fn list_prices(&self) -> Result<Vec<Price>, AppError> {
        // The price list renders grouped by category.
        let query = format!("SELECT {PRICE_COLUMNS} FROM prices ORDER BY category, name");
        Ok(sqlx::query_as::<_, Price>(&query).fetch_all(&self.pool).await?)
    }

    pub async fn create_price(&self, input: CreatePrice) -> Result<Price, AppError> {
        let query = format!(
            "INSERT INTO prices (id, category, name, amount, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PRICE_COLUMNS}"
        );
        let price = sqlx::query_as::<_, Price>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.category)
            .bind(&input.name)
            .bind(&input.amount)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        info!("Price {} created", price.id);
        Ok(price)
    }

    pub async fn update_price(&self, id: Uuid, input: UpdatePrice) -> Result<Price, AppError> {
        let query = format!(
            "UPDATE prices SET
                category = COALESCE($2, category),
                name = COALESCE($3, name),
                amount = COALESCE($4, amount),
                description = COALESCE($5, description)
             WHERE id = $1
             RETURNING {PRICE_COLUMNS}"
        );
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .bind(&input.category)
            .bind(&input.name)
            .bind(&input.amount)
            .bind(&input.description)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Price not found".to_string()))
    }

    pub async fn delete_price(&self, id: Uuid) -> Result<(), AppError> {
        self.delete_row("prices", id, "Price").await
    }

    pub async fn list_timeline(&self) -> Result<Vec<TimelineItem>, AppError> {
        let query = format!("SELECT {TIMELINE_COLUMNS} FROM timeline_items ORDER BY sort_order, year");
        Ok(sqlx::query_as::<_, TimelineItem>(&query).fetch_all(&self.pool).await?)
    }

    pub async fn create_timeline_item(
        &self,
        input: CreateTimelineItem,
    ) -> Result<TimelineItem, AppError> {
        let query = format!(
            "INSERT INTO timeline_items (id, year, title, description, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TIMELINE_COLUMNS}"
        );
        let item = sqlx::query_as::<_, TimelineItem>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.year)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_one(&self.pool)
            .await?;
        info!("Timeline item {} created", item.id);
        Ok(item)
    }

    pub async fn update_timeline_item(
        &self,
        id: Uuid,
        input: UpdateTimelineItem,
    ) -> Result<TimelineItem, AppError> {
        let query = format!(
            "UPDATE timeline_items SET
                year = COALESCE($2, year),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {TIMELINE_COLUMNS}"
        );
        sqlx::query_as::<_, TimelineItem>(&query)
            .bind(id)
            .bind(&input.year)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Timeline item not found".to_string()))
    }

    pub async fn delete_timeline_item(&self, id: Uuid) -> Result<(), AppError> {
        self.delete_row("timeline_items", id, "Timeline item").await
    }

    pub async fn list_faqs(&self) -> Result<Vec<Faq>, AppError> {
        let query = format!("SELECT {FAQ_COLUMNS} FROM faqs ORDER BY sort_order, question");
        Ok(sqlx::query_as::<_, Faq>(&query).fetch_all(&self.pool).await?)
    }

    pub async fn create_faq(&self, input: CreateFaq) -> Result<Faq, AppError> {
        let query = format!(
            "INSERT INTO faqs (id, question, answer, sort_order)
             VALUES ($1, $2, $3, $4)
             RETURNING {FAQ_COLUMNS}"
        );
        let faq = sqlx::query_as::<_, Faq>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.sort_order)
            .fetch_one(&self.pool)
            .await?;
        info!("FAQ {} created", faq.id);
        Ok(faq)
    }

    pub async fn update_faq(&self, id: Uuid, input: UpdateFaq) -> Result<Faq, AppError> {
        let query = format!(
            "UPDATE faqs SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                sort_order = COALESCE($4, sort_order)
             WHERE id = $1
             RETURNING {FAQ_COLUMNS}"
        );
        sqlx::query_as::<_, Faq>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.sort_order)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))
    }

    pub async fn delete_faq(&self, id: Uuid) -> Result<(), AppError> {
        self.delete_row("faqs", id, "FAQ").await
    }
}
